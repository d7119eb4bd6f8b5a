//! `opsgrid ranking / series / counts / durations / summary / board` —
//! derive and print configured tables.

use std::io;
use std::path::Path;

use opsgrid_engine::{board, extract, reshape, rollup, value};
use opsgrid_engine::{LayoutConfig, Session};
use opsgrid_io::CachedSource;

use crate::fetch::{self, AnySource};
use crate::render::{fmt_value, print_section, print_table};
use crate::{auth, CliError, Format};

/// Everything a table command needs for one run.
pub(crate) struct TableCtx {
    pub config: LayoutConfig,
    pub cache: CachedSource<AnySource>,
    pub session: Option<Session>,
    pub quiet: bool,
}

/// Read and parse the layout file.
pub(crate) fn load_layout(path: &Path) -> Result<LayoutConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::args(format!("cannot read layout {}: {e}", path.display()))
            .with_hint("pass --config or create opsgrid.toml")
    })?;
    LayoutConfig::from_toml(&text).map_err(CliError::layout)
}

/// Build the run context: layout, source cache and stored session.
pub(crate) fn table_ctx(
    config_path: &Path,
    input: Option<&Path>,
    url: Option<&str>,
    quiet: bool,
) -> Result<TableCtx, CliError> {
    let config = load_layout(config_path)?;
    let cache = fetch::resolve_source(&config.source, input, url, quiet)?;
    Ok(TableCtx {
        config,
        cache,
        session: auth::load_session(),
        quiet,
    })
}

/// Run notice on stderr: what was derived, from where, for whom.
fn notice(ctx: &TableCtx, what: &str, rows: usize) {
    if ctx.quiet {
        return;
    }
    let mut line = format!("{what}: {rows} row(s) — {}", ctx.cache.describe());
    if let Some(at) = ctx.cache.fetched_at() {
        line.push_str(&format!(" (fetched {})", at.format("%H:%M:%S")));
    }
    if let Some(session) = &ctx.session {
        if !session.is_admin() {
            line.push_str(&format!(" [scoped to {}]", session.display_name));
        }
    }
    eprintln!("{line}");
}

fn print_json<T: serde::Serialize>(data: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(data).map_err(|e| CliError::io(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn print_csv<T: serde::Serialize>(rows: &[T]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| CliError::io(e.to_string()))?;
    }
    writer.flush().map_err(|e| CliError::io(e.to_string()))
}

// ── ranking ─────────────────────────────────────────────────────────

pub(crate) fn cmd_ranking(ctx: &mut TableCtx, name: &str, format: Format) -> Result<(), CliError> {
    // Resolve the block before fetching; an unknown name shouldn't
    // cost a network round trip.
    let block = ctx.config.ranking(name).map_err(CliError::layout)?.clone();

    let (entries, caption) = {
        let grid = ctx.cache.grid().map_err(CliError::source)?;
        let mut entries = extract::ranking(grid, &block);
        if let Some(session) = &ctx.session {
            entries = session.scope_ranking(entries);
        }
        let header = grid.cell(block.header_row, block.value_col).trim();
        let caption = if header.is_empty() {
            "value".to_string()
        } else {
            header.to_string()
        };
        (entries, caption)
    };

    notice(ctx, name, entries.len());
    match format {
        Format::Table => {
            let rows: Vec<Vec<String>> = entries
                .iter()
                .enumerate()
                .map(|(i, e)| vec![(i + 1).to_string(), e.name.clone(), fmt_value(e.value)])
                .collect();
            print_table(&["#", "operator", &caption], &rows);
            Ok(())
        }
        Format::Json => print_json(&entries),
        Format::Csv => print_csv(&entries),
    }
}

// ── series ──────────────────────────────────────────────────────────

pub(crate) fn cmd_series(ctx: &mut TableCtx, name: &str, format: Format) -> Result<(), CliError> {
    let block = ctx.config.series(name).map_err(CliError::layout)?.clone();

    let points = {
        let grid = ctx.cache.grid().map_err(CliError::source)?;
        let mut points = reshape::series(grid, &block);
        if let Some(session) = &ctx.session {
            points = session.scope_series(points);
        }
        points
    };

    notice(ctx, name, points.len());
    match format {
        Format::Table => {
            let rows: Vec<Vec<String>> = points
                .iter()
                .map(|p| {
                    vec![
                        p.operator.clone(),
                        p.metric.clone(),
                        p.period.clone(),
                        fmt_value(p.value),
                    ]
                })
                .collect();
            print_table(&["operator", "metric", "period", "value"], &rows);
            Ok(())
        }
        Format::Json => print_json(&points),
        Format::Csv => print_csv(&points),
    }
}

// ── counts ──────────────────────────────────────────────────────────

pub(crate) fn cmd_counts(ctx: &mut TableCtx, name: &str, format: Format) -> Result<(), CliError> {
    let block = ctx.config.counts(name).map_err(CliError::layout)?.clone();

    let table = {
        let grid = ctx.cache.grid().map_err(CliError::source)?;
        let table = reshape::counts(grid, &block);
        match &ctx.session {
            Some(session) => session.scope_counts(table),
            None => table,
        }
    };

    notice(ctx, name, table.samples.len());
    match format {
        Format::Table => {
            let rows: Vec<Vec<String>> = table
                .samples
                .iter()
                .map(|s| vec![s.operator.clone(), s.period.clone(), s.count.to_string()])
                .collect();
            print_table(&["operator", "period", "count"], &rows);
            if !ctx.quiet {
                eprintln!("scale max: {}", table.scale_max);
            }
            Ok(())
        }
        Format::Json => print_json(&table),
        Format::Csv => print_csv(&table.samples),
    }
}

// ── durations ───────────────────────────────────────────────────────

pub(crate) fn cmd_durations(
    ctx: &mut TableCtx,
    name: &str,
    format: Format,
) -> Result<(), CliError> {
    let block = ctx.config.durations(name).map_err(CliError::layout)?.clone();

    let samples = {
        let grid = ctx.cache.grid().map_err(CliError::source)?;
        reshape::durations(grid, &block)
    };

    notice(ctx, name, samples.len());
    match format {
        Format::Table => {
            let rows: Vec<Vec<String>> = samples
                .iter()
                .map(|s| {
                    vec![
                        s.period.clone(),
                        value::format_hms(s.minutes),
                        fmt_value(s.minutes),
                    ]
                })
                .collect();
            print_table(&["period", "time", "minutes"], &rows);
            Ok(())
        }
        Format::Json => print_json(&samples),
        Format::Csv => print_csv(&samples),
    }
}

// ── summary ─────────────────────────────────────────────────────────

pub(crate) fn cmd_summary(ctx: &mut TableCtx, format: Format) -> Result<(), CliError> {
    let values = {
        let grid = ctx.cache.grid().map_err(CliError::source)?;
        rollup::summarize(grid, ctx.config.source.header_row, &ctx.config.summary)
    };

    notice(ctx, "summary", values.len());
    match format {
        Format::Table => {
            let rows: Vec<Vec<String>> = values
                .iter()
                .map(|v| vec![v.label.clone(), v.value.clone()])
                .collect();
            print_table(&["metric", "value"], &rows);
            Ok(())
        }
        Format::Json => print_json(&values),
        Format::Csv => print_csv(&values),
    }
}

// ── board ───────────────────────────────────────────────────────────

pub(crate) fn cmd_board(ctx: &mut TableCtx, json: bool) -> Result<(), CliError> {
    let source = ctx.cache.describe();
    let board = {
        let grid = ctx.cache.grid().map_err(CliError::source)?;
        board::build(&ctx.config, grid, ctx.session.as_ref(), &source)
    };

    if json {
        return print_json(&board);
    }

    let mut first = true;
    let mut gap = |first: &mut bool| {
        if !*first {
            println!();
        }
        *first = false;
    };

    if !board.summary.is_empty() {
        gap(&mut first);
        print_section("summary", "");
        let rows: Vec<Vec<String>> = board
            .summary
            .iter()
            .map(|v| vec![v.label.clone(), v.value.clone()])
            .collect();
        print_table(&["metric", "value"], &rows);
    }

    for (name, entries) in &board.rankings {
        gap(&mut first);
        print_section("ranking", name);
        let rows: Vec<Vec<String>> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| vec![(i + 1).to_string(), e.name.clone(), fmt_value(e.value)])
            .collect();
        print_table(&["#", "operator", "value"], &rows);
    }

    for (name, points) in &board.series {
        gap(&mut first);
        print_section("series", name);
        let rows: Vec<Vec<String>> = points
            .iter()
            .map(|p| {
                vec![
                    p.operator.clone(),
                    p.metric.clone(),
                    p.period.clone(),
                    fmt_value(p.value),
                ]
            })
            .collect();
        print_table(&["operator", "metric", "period", "value"], &rows);
    }

    for (name, table) in &board.counts {
        gap(&mut first);
        print_section("counts", name);
        let rows: Vec<Vec<String>> = table
            .samples
            .iter()
            .map(|s| vec![s.operator.clone(), s.period.clone(), s.count.to_string()])
            .collect();
        print_table(&["operator", "period", "count"], &rows);
    }

    for (name, samples) in &board.durations {
        gap(&mut first);
        print_section("durations", name);
        let rows: Vec<Vec<String>> = samples
            .iter()
            .map(|s| vec![s.period.clone(), value::format_hms(s.minutes)])
            .collect();
        print_table(&["period", "time"], &rows);
    }

    if !ctx.quiet {
        let scoped = board
            .meta
            .scoped_to
            .as_deref()
            .map(|name| format!(" [scoped to {name}]"))
            .unwrap_or_default();
        eprintln!("board '{}' — {}{}", board.meta.layout, board.meta.source, scoped);
    }
    Ok(())
}
