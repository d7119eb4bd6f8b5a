//! `opsgrid check` — validate the layout, then prove it still fits the
//! live grid.
//!
//! Sheets drift: someone inserts a column, renames a header, moves a
//! block. The extractors tolerate that silently (out-of-range reads are
//! empty), so this command exists to make drift loud instead. Findings
//! go to stdout; exit 3 means "found drift", not "crashed".

use std::path::Path;

use opsgrid_engine::rollup;

use crate::exit_codes::EXIT_CHECK_DRIFT;
use crate::{fetch, tables, CliError};

pub(crate) fn cmd_check(
    config_path: &Path,
    input: Option<&Path>,
    url: Option<&str>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = tables::load_layout(config_path)?;

    let blocks = config.rankings.len() + config.series.len() + config.counts.len()
        + config.durations.len();
    println!(
        "layout OK: {blocks} block(s), {} summary entr(ies), {} user(s)",
        config.summary.len(),
        config.users.len()
    );

    let no_source = input.is_none()
        && url.is_none()
        && config.source.file.is_none()
        && config.source.url.is_none();
    if no_source {
        println!("no grid source configured; skipped drift check");
        return Ok(());
    }

    let mut cache = fetch::resolve_source(&config.source, input, url, quiet)?;
    let grid = cache.grid().map_err(CliError::source)?;

    let mut drift: Vec<String> = Vec::new();

    if grid.is_blank() {
        drift.push("grid is blank: the source returned no data".to_string());
    } else {
        let rows = grid.row_count();
        let cols = grid.col_count();

        let mut need = |kind: &str, name: &str, extent: (usize, usize)| {
            let (max_row, max_col) = extent;
            if max_row >= rows || max_col >= cols {
                drift.push(format!(
                    "{kind} '{name}': needs row {max_row}, col {max_col}; grid is {rows}x{cols}"
                ));
            }
        };

        for (name, block) in &config.rankings {
            need("ranking", name, block.extent());
        }
        for (name, block) in &config.series {
            need("series", name, block.extent());
        }
        for (name, block) in &config.counts {
            need("counts", name, block.extent());
        }
        for (name, block) in &config.durations {
            need("duration", name, block.extent());
        }

        for entry in &config.summary {
            if rollup::column_index(grid, config.source.header_row, &entry.column).is_none() {
                drift.push(format!(
                    "summary '{}': column '{}' not found in header row {}",
                    entry.label, entry.column, config.source.header_row
                ));
            }
        }

        if drift.is_empty() {
            println!("grid OK: {rows} rows x {cols} cols, all blocks in range");
        }
    }

    if drift.is_empty() {
        return Ok(());
    }
    for finding in &drift {
        println!("drift: {finding}");
    }
    Err(CliError {
        code: EXIT_CHECK_DRIFT,
        message: format!("{} drift finding(s)", drift.len()),
        hint: Some("the sheet structure changed; update the layout coordinates".into()),
    })
}
