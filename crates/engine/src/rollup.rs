//! Header-keyed summary stats over a whole worksheet.
//!
//! The rollup reads full columns rather than declared rectangles:
//! entries name a column by its header text, so day rows can keep
//! accumulating under it without layout changes.

use crate::config::{SummaryColumn, SummaryStat};
use crate::grid::Grid;
use crate::model::SummaryValue;
use crate::value;

/// Position of `name` in the header row, by exact trimmed match.
pub fn column_index(grid: &Grid, header_row: usize, name: &str) -> Option<usize> {
    (0..grid.col_count()).find(|&col| grid.cell(header_row, col).trim() == name)
}

/// Bottom-up first non-blank data cell of a column, as written.
/// Placeholder markers don't count as recorded data.
pub fn last_value(grid: &Grid, header_row: usize, col: usize) -> Option<String> {
    (header_row + 1..grid.row_count())
        .rev()
        .map(|row| grid.cell(row, col).trim())
        .find(|cell| !value::is_marker(cell))
        .map(str::to_string)
}

/// Mean elapsed minutes over a column's data rows, markers skipped.
/// `None` when the column has no data rows at all.
pub fn mean_duration_minutes(grid: &Grid, header_row: usize, col: usize) -> Option<f64> {
    let mut total = 0.0;
    let mut n = 0usize;
    for row in header_row + 1..grid.row_count() {
        let cell = grid.cell(row, col);
        if value::is_marker(cell) {
            continue;
        }
        total += value::parse_duration_minutes(cell);
        n += 1;
    }
    if n > 0 {
        Some(total / n as f64)
    } else {
        None
    }
}

/// Derive every configured rollup entry. A missing column or an empty
/// one yields `-` for that entry; the rollup never fails a refresh.
pub fn summarize(grid: &Grid, header_row: usize, columns: &[SummaryColumn]) -> Vec<SummaryValue> {
    columns
        .iter()
        .map(|entry| {
            let value = column_index(grid, header_row, &entry.column)
                .and_then(|col| match entry.stat {
                    SummaryStat::Last => last_value(grid, header_row, col),
                    SummaryStat::MeanDuration => {
                        mean_duration_minutes(grid, header_row, col).map(value::format_hms)
                    }
                })
                .unwrap_or_else(|| "-".to_string());
            SummaryValue {
                label: entry.label.clone(),
                column: entry.column.clone(),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::grid;

    fn sheet() -> Grid {
        grid(&[
            &["Data", "Conformidade", "TMA"],
            &["01/08", "97,2%", "0:04:30"],
            &["02/08", "98,1%", "0:05:30"],
            &["03/08", "-", "-"],
        ])
    }

    #[test]
    fn finds_column_by_header_text() {
        let g = sheet();
        assert_eq!(column_index(&g, 0, "TMA"), Some(2));
        assert_eq!(column_index(&g, 0, "Data"), Some(0));
        assert_eq!(column_index(&g, 0, "tma"), None);
        assert_eq!(column_index(&g, 0, "Missing"), None);
    }

    #[test]
    fn last_value_skips_trailing_placeholders() {
        let g = sheet();
        // 03/08 has no data yet; the last recorded value is 02/08's.
        assert_eq!(last_value(&g, 0, 1).as_deref(), Some("98,1%"));
    }

    #[test]
    fn last_value_none_for_empty_column() {
        let g = grid(&[&["Data", "X"], &["01/08", "-"], &["02/08", ""]]);
        assert_eq!(last_value(&g, 0, 1), None);
    }

    #[test]
    fn mean_duration_skips_markers() {
        let g = sheet();
        // (4.5 + 5.5) / 2 minutes; the marker row is not a zero sample.
        assert_eq!(mean_duration_minutes(&g, 0, 2), Some(5.0));
    }

    #[test]
    fn summarize_formats_and_defaults() {
        let g = sheet();
        let columns = vec![
            SummaryColumn {
                label: "Compliance".to_string(),
                column: "Conformidade".to_string(),
                stat: SummaryStat::Last,
            },
            SummaryColumn {
                label: "Avg handle time".to_string(),
                column: "TMA".to_string(),
                stat: SummaryStat::MeanDuration,
            },
            SummaryColumn {
                label: "Ghost".to_string(),
                column: "NoSuchColumn".to_string(),
                stat: SummaryStat::Last,
            },
        ];
        let values = summarize(&g, 0, &columns);
        assert_eq!(values[0].value, "98,1%");
        assert_eq!(values[1].value, "00:05:00");
        assert_eq!(values[2].value, "-");
    }
}
