//! Small helpers shared by the unit tests.

use crate::grid::Grid;

/// Build a grid from string-slice rows.
pub fn grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}
