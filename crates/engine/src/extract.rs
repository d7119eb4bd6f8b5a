//! Ranking extraction from fixed rectangles.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use crate::config::{RankingBlock, ValueKind};
use crate::grid::Grid;
use crate::model::RankingEntry;
use crate::value;

/// Parse one raw cell under a block's declared kind.
pub(crate) fn parse_cell(kind: ValueKind, cell: &str) -> f64 {
    match kind {
        ValueKind::Percent => value::parse_percent(cell),
        ValueKind::Number => value::parse_decimal(cell),
        ValueKind::Duration => value::parse_duration_minutes(cell),
    }
}

/// Read one ranking out of its declared rectangle.
///
/// A row participates only when both its name cell and its raw value
/// cell hold data; marker rows are placeholder rows on the sheet, not
/// zero scores. Survivors sort descending by parsed value, and the sort
/// is stable so tied rows keep their sheet order.
pub fn ranking(grid: &Grid, block: &RankingBlock) -> Vec<RankingEntry> {
    let mut entries = Vec::new();
    for row in block.first_row..=block.last_row {
        let name = grid.cell(row, block.name_col).trim();
        let raw = grid.cell(row, block.value_col);
        if value::is_marker(name) || value::is_marker(raw) {
            continue;
        }
        entries.push(RankingEntry {
            name: name.to_string(),
            value: parse_cell(block.value_kind, raw),
        });
    }
    entries.sort_by_key(|e| Reverse(OrderedFloat(e.value)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::grid;

    fn block(first_row: usize, last_row: usize) -> RankingBlock {
        RankingBlock {
            header_row: 0,
            first_row,
            last_row,
            name_col: 0,
            value_col: 2,
            value_kind: ValueKind::Percent,
        }
    }

    #[test]
    fn extracts_and_sorts_descending() {
        let g = grid(&[
            &["Op", "Meta", "%"],
            &["Alice", "Meta", "90,0"],
            &["Bob", "Meta", "95,5%"],
            &["Carla", "Meta", "80"],
        ]);
        let entries = ranking(&g, &block(1, 3));
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Alice", "Carla"]);
        assert_eq!(entries[0].value, 95.5);
    }

    #[test]
    fn marker_rows_are_skipped_not_zeroed() {
        let g = grid(&[
            &["Op", "Meta", "%"],
            &["Alice", "Meta", "90,0"],
            &["Bob", "Meta", "-"],
            &["", "Meta", "70,0"],
            &["#N/A", "Meta", "60,0"],
        ]);
        let entries = ranking(&g, &block(1, 4));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Alice");
        assert_eq!(entries[0].value, 90.0);
    }

    #[test]
    fn ties_keep_sheet_order() {
        let g = grid(&[
            &["Alice", "", "50"],
            &["Bob", "", "50"],
            &["Carla", "", "50"],
            &["Dan", "", "60"],
        ]);
        let entries = ranking(
            &g,
            &RankingBlock {
                header_row: 0,
                first_row: 0,
                last_row: 3,
                name_col: 0,
                value_col: 2,
                value_kind: ValueKind::Number,
            },
        );
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Dan", "Alice", "Bob", "Carla"]);
    }

    #[test]
    fn rectangle_outside_grid_is_empty() {
        let g = grid(&[&["Alice", "", "90"]]);
        assert!(ranking(&g, &block(5, 9)).is_empty());
    }

    #[test]
    fn all_blank_rectangle_is_empty() {
        let g = grid(&[
            &["", "", ""],
            &["", "", ""],
            &["", "", ""],
        ]);
        assert!(ranking(&g, &block(0, 2)).is_empty());
    }

    #[test]
    fn duration_kind_parses_to_minutes() {
        let g = grid(&[
            &["Alice", "", "01:30:00"],
            &["Bob", "", "0:45:00"],
        ]);
        let entries = ranking(
            &g,
            &RankingBlock {
                header_row: 0,
                first_row: 0,
                last_row: 1,
                name_col: 0,
                value_col: 2,
                value_kind: ValueKind::Duration,
            },
        );
        assert_eq!(entries[0].value, 90.0);
        assert_eq!(entries[1].value, 45.0);
    }

    #[test]
    fn live_and_placeholder_rows_mixed() {
        // Operator sheet with one live row and one placeholder row.
        let g = grid(&[
            &["Op", "Meta", "%"],
            &["Alice", "Meta", "90,0"],
            &["Bob", "Meta", "-"],
        ]);
        let entries = ranking(&g, &block(1, 2));
        assert_eq!(
            entries,
            vec![RankingEntry {
                name: "Alice".to_string(),
                value: 90.0
            }]
        );
    }
}
