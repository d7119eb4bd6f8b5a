//! One-pass derivation of every configured table.

use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::grid::Grid;
use crate::model::{Board, BoardMeta};
use crate::session::Session;
use crate::{extract, reshape, rollup};

/// Derive all configured tables from one grid snapshot.
///
/// `source` describes where the grid came from, for the output meta.
/// A non-admin `session` scopes operator-keyed tables to the viewer;
/// the summary rollup is team-wide and is never scoped.
pub fn build(
    config: &LayoutConfig,
    grid: &Grid,
    session: Option<&Session>,
    source: &str,
) -> Board {
    let mut rankings = BTreeMap::new();
    for (name, block) in &config.rankings {
        let mut entries = extract::ranking(grid, block);
        if let Some(session) = session {
            entries = session.scope_ranking(entries);
        }
        rankings.insert(name.clone(), entries);
    }

    let mut series = BTreeMap::new();
    for (name, block) in &config.series {
        let mut points = reshape::series(grid, block);
        if let Some(session) = session {
            points = session.scope_series(points);
        }
        series.insert(name.clone(), points);
    }

    let mut counts = BTreeMap::new();
    for (name, block) in &config.counts {
        let mut table = reshape::counts(grid, block);
        if let Some(session) = session {
            table = session.scope_counts(table);
        }
        counts.insert(name.clone(), table);
    }

    let mut durations = BTreeMap::new();
    for (name, block) in &config.durations {
        durations.insert(name.clone(), reshape::durations(grid, block));
    }

    let summary = rollup::summarize(grid, config.source.header_row, &config.summary);

    Board {
        meta: BoardMeta {
            layout: config.name.clone(),
            source: source.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            scoped_to: session
                .filter(|s| !s.is_admin())
                .map(|s| s.display_name.clone()),
        },
        rankings,
        series,
        counts,
        durations,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::authenticate;
    use crate::testutil::grid;

    const LAYOUT: &str = r#"
name = "Support Ops"

[source]
header_row = 0

[rankings.diamond]
header_row = 0
first_row = 1
last_row = 3
name_col = 0
value_col = 1

[durations.team_time]
label_row = 0
value_row = 4
first_col = 2
last_col = 3

[[summary]]
label = "Compliance"
column = "Conf"
stat = "last"

[users.erika]
password = "hunter2"
display_name = "Erika"
role = "admin"

[users.bruno]
password = "swordfish"
display_name = "Bruno"
role = "agent"
"#;

    fn sheet() -> Grid {
        grid(&[
            &["Op", "Conf", "01/08", "02/08"],
            &["Bruno", "92,5%", "", ""],
            &["Carla", "97,0%", "", ""],
            &["Dan", "-", "", ""],
            &["", "", "0:30:00", "1:00:00"],
        ])
    }

    #[test]
    fn unscoped_board_has_every_table() {
        let config = LayoutConfig::from_toml(LAYOUT).unwrap();
        let board = build(&config, &sheet(), None, "fixture");
        assert_eq!(board.meta.layout, "Support Ops");
        assert_eq!(board.meta.source, "fixture");
        assert!(board.meta.scoped_to.is_none());
        assert_eq!(board.rankings["diamond"].len(), 2);
        assert_eq!(board.rankings["diamond"][0].name, "Carla");
        assert_eq!(board.durations["team_time"].len(), 2);
        assert_eq!(board.summary[0].value, "97,0%");
    }

    #[test]
    fn agent_board_is_scoped() {
        let config = LayoutConfig::from_toml(LAYOUT).unwrap();
        let session = authenticate(&config.users, "bruno", "swordfish").unwrap();
        let board = build(&config, &sheet(), Some(&session), "fixture");
        assert_eq!(board.meta.scoped_to.as_deref(), Some("Bruno"));
        assert_eq!(board.rankings["diamond"].len(), 1);
        assert_eq!(board.rankings["diamond"][0].name, "Bruno");
        // Team tables stay team-wide.
        assert_eq!(board.durations["team_time"].len(), 2);
        assert_eq!(board.summary[0].value, "97,0%");
    }

    #[test]
    fn admin_board_is_not_marked_scoped() {
        let config = LayoutConfig::from_toml(LAYOUT).unwrap();
        let session = authenticate(&config.users, "erika", "hunter2").unwrap();
        let board = build(&config, &sheet(), Some(&session), "fixture");
        assert!(board.meta.scoped_to.is_none());
        assert_eq!(board.rankings["diamond"].len(), 2);
    }

    #[test]
    fn blank_grid_yields_empty_tables() {
        let config = LayoutConfig::from_toml(LAYOUT).unwrap();
        let board = build(&config, &Grid::new(), None, "fixture");
        assert!(board.rankings["diamond"].is_empty());
        assert!(board.durations["team_time"].is_empty());
        assert_eq!(board.summary[0].value, "-");
    }
}
