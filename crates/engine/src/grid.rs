/// Raw worksheet snapshot: rows of cell text exactly as exported.
///
/// Rows are stored unpadded (CSV exports drop trailing empty cells), so
/// every accessor is total: coordinates outside the stored data read as
/// empty cells. Callers never index the backing vectors directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Cell text at `(row, col)`; `""` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row extent. Rows are unpadded, so this scans all of them.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when the grid holds no data at all, counting rows of empty
    /// strings as no data.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(|c| c.is_empty()))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
