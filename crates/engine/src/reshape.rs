//! Wide-to-long reshaping of evolution, count and duration blocks.
//!
//! Sheets store these blocks wide, one column per period, because
//! that's how humans maintain them. Charts want long tuples. Melting
//! happens here, in declared sheet order, with no sorting or
//! aggregation on top.

use crate::config::{CountBlock, DurationBlock, SeriesBlock};
use crate::extract::parse_cell;
use crate::grid::Grid;
use crate::model::{CountSample, CountTable, DurationSample, MetricPoint};
use crate::value;

/// Melt one evolution block: each surviving row crossed with each
/// period column yields one point.
///
/// Rows missing an operator or metric label are dropped whole. Columns
/// whose header label is blank sit outside the block's live data (the
/// declared rectangle is often wider than the filled part of the sheet)
/// and are skipped for every row. Blank value cells under a live header
/// are real points with value 0.
pub fn series(grid: &Grid, block: &SeriesBlock) -> Vec<MetricPoint> {
    let periods = period_columns(grid, block.header_row, block.first_value_col, block.last_value_col);
    let mut points = Vec::new();
    for row in block.first_row..=block.last_row {
        let operator = grid.cell(row, block.operator_col).trim();
        let metric = grid.cell(row, block.metric_col).trim();
        if value::is_marker(operator) || value::is_marker(metric) {
            continue;
        }
        for (col, period) in &periods {
            points.push(MetricPoint {
                operator: operator.to_string(),
                metric: metric.to_string(),
                period: period.clone(),
                value: parse_cell(block.value_kind, grid.cell(row, *col)),
            });
        }
    }
    points
}

/// Melt one count block the same way, carrying the block's display
/// ceiling along unclamped.
pub fn counts(grid: &Grid, block: &CountBlock) -> CountTable {
    let periods = period_columns(grid, block.header_row, block.first_value_col, block.last_value_col);
    let mut samples = Vec::new();
    for row in block.first_row..=block.last_row {
        let operator = grid.cell(row, block.operator_col).trim();
        if value::is_marker(operator) {
            continue;
        }
        for (col, period) in &periods {
            samples.push(CountSample {
                operator: operator.to_string(),
                period: period.clone(),
                count: value::parse_count(grid.cell(row, *col)),
            });
        }
    }
    CountTable {
        scale_max: block.scale_max,
        samples,
    }
}

/// Read a duration strip: the label row names the periods, the value
/// row holds the elapsed times. Columns with a blank label are skipped.
pub fn durations(grid: &Grid, block: &DurationBlock) -> Vec<DurationSample> {
    (block.first_col..=block.last_col)
        .filter_map(|col| {
            let label = grid.cell(block.label_row, col).trim();
            if value::is_marker(label) {
                return None;
            }
            Some(DurationSample {
                period: label.to_string(),
                minutes: value::parse_duration_minutes(grid.cell(block.value_row, col)),
            })
        })
        .collect()
}

/// Live period columns of a header row: `(column, label)` pairs for
/// every non-blank header cell in the declared span.
fn period_columns(
    grid: &Grid,
    header_row: usize,
    first_col: usize,
    last_col: usize,
) -> Vec<(usize, String)> {
    (first_col..=last_col)
        .filter_map(|col| {
            let label = grid.cell(header_row, col).trim();
            if value::is_marker(label) {
                None
            } else {
                Some((col, label.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueKind;
    use crate::testutil::grid;

    fn series_block() -> SeriesBlock {
        SeriesBlock {
            header_row: 0,
            first_row: 1,
            last_row: 2,
            operator_col: 0,
            metric_col: 1,
            first_value_col: 2,
            last_value_col: 3,
            value_kind: ValueKind::Percent,
        }
    }

    #[test]
    fn two_by_two_melts_to_four_points() {
        let g = grid(&[
            &["Operator", "Metric", "01/08", "02/08"],
            &["Alice", "Compliance", "98,5%", "97,0%"],
            &["Bob", "Compliance", "90,0%", "91,5%"],
        ]);
        let points = series(&g, &series_block());
        assert_eq!(points.len(), 4);
        assert_eq!(
            points[0],
            MetricPoint {
                operator: "Alice".to_string(),
                metric: "Compliance".to_string(),
                period: "01/08".to_string(),
                value: 98.5,
            }
        );
        assert_eq!(points[3].operator, "Bob");
        assert_eq!(points[3].period, "02/08");
        assert_eq!(points[3].value, 91.5);
    }

    #[test]
    fn blank_header_columns_are_skipped_entirely() {
        let g = grid(&[
            &["Operator", "Metric", "01/08", "", "03/08"],
            &["Alice", "Compliance", "98,5", "99,9", "97,0"],
        ]);
        let block = SeriesBlock {
            last_value_col: 4,
            ..series_block()
        };
        let points = series(&g, &block);
        let periods: Vec<&str> = points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, ["01/08", "03/08"]);
    }

    #[test]
    fn blank_value_under_live_header_is_zero_point() {
        let g = grid(&[
            &["Operator", "Metric", "01/08", "02/08"],
            &["Alice", "Compliance", "98,5", "-"],
        ]);
        let points = series(&g, &series_block());
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].value, 0.0);
    }

    #[test]
    fn unlabeled_rows_are_dropped_whole() {
        let g = grid(&[
            &["Operator", "Metric", "01/08", "02/08"],
            &["", "Compliance", "98,5", "97,0"],
            &["Bob", "Compliance", "90,0", "91,5"],
        ]);
        let points = series(&g, &series_block());
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.operator == "Bob"));
    }

    #[test]
    fn counts_melt_and_truncate() {
        let g = grid(&[
            &["Operator", "01/08", "02/08"],
            &["Alice", "7", "12"],
            &["Bob", "-", "3,9"],
        ]);
        let table = counts(
            &g,
            &CountBlock {
                header_row: 0,
                first_row: 1,
                last_row: 2,
                operator_col: 0,
                first_value_col: 1,
                last_value_col: 2,
                scale_max: 42,
            },
        );
        assert_eq!(table.scale_max, 42);
        assert_eq!(table.samples.len(), 4);
        assert_eq!(table.samples[2].count, 0);
        assert_eq!(table.samples[3].count, 3);
    }

    #[test]
    fn duration_strip_pairs_labels_with_values() {
        let g = grid(&[
            &["", "01/08", "02/08", "03/08"],
            &["Team", "01:30:00", "0:45:00", "-"],
        ]);
        let samples = durations(
            &g,
            &DurationBlock {
                label_row: 0,
                value_row: 1,
                first_col: 1,
                last_col: 3,
            },
        );
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].minutes, 90.0);
        assert_eq!(samples[1].minutes, 45.0);
        assert_eq!(samples[2].minutes, 0.0);
    }

    #[test]
    fn strip_outside_grid_is_empty() {
        let g = grid(&[&["x"]]);
        let samples = durations(
            &g,
            &DurationBlock {
                label_row: 4,
                value_row: 5,
                first_col: 0,
                last_col: 9,
            },
        );
        assert!(samples.is_empty());
    }
}
