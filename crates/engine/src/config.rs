use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::LayoutError;
use crate::session::Role;

// ---------------------------------------------------------------------------
// Top-level layout
// ---------------------------------------------------------------------------

/// Declarative worksheet layout: every derived table reads its cells
/// from a named block declared here, never from inline coordinates.
///
/// All row and column indices are 0-based and all ranges are inclusive,
/// matching what a maintainer counts off the sheet. When the sheet is
/// restructured this file is the only thing that changes.
///
/// Blocks live in maps, so tables render in name order.
#[derive(Debug, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub rankings: BTreeMap<String, RankingBlock>,
    #[serde(default)]
    pub series: BTreeMap<String, SeriesBlock>,
    #[serde(default)]
    pub counts: BTreeMap<String, CountBlock>,
    #[serde(default)]
    pub durations: BTreeMap<String, DurationBlock>,
    #[serde(default)]
    pub summary: Vec<SummaryColumn>,
    #[serde(default)]
    pub users: BTreeMap<String, UserConfig>,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Where the worksheet snapshot comes from and how long it stays fresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Local CSV export path.
    pub file: Option<String>,
    /// Published-sheet CSV URL.
    pub url: Option<String>,
    /// Worksheet description, echoed in output meta.
    pub worksheet: Option<String>,
    /// Explicit field delimiter; sniffed from content when unset.
    pub delimiter: Option<char>,
    /// Snapshot time-to-live in seconds.
    pub ttl_secs: u64,
    /// Header row consulted by the summary rollup.
    pub header_row: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            file: None,
            url: None,
            worksheet: None,
            delimiter: None,
            ttl_secs: 600,
            header_row: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// How a block's raw value cells are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Comma-decimal percentage with optional trailing `%`, kept 0..=100.
    Percent,
    /// Plain comma-decimal number.
    Number,
    /// Elapsed time, normalized to minutes.
    Duration,
}

fn default_value_kind() -> ValueKind {
    ValueKind::Percent
}

/// Fixed rectangle holding one (collaborator, value) ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingBlock {
    pub header_row: usize,
    pub first_row: usize,
    pub last_row: usize,
    pub name_col: usize,
    pub value_col: usize,
    #[serde(default = "default_value_kind")]
    pub value_kind: ValueKind,
}

impl RankingBlock {
    /// `(max row, max col)` the block reads, for extent checks.
    pub fn extent(&self) -> (usize, usize) {
        (
            self.last_row.max(self.header_row),
            self.name_col.max(self.value_col),
        )
    }
}

/// Wide evolution block: two label columns naming (operator, metric),
/// then one value column per period under a header label.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBlock {
    pub header_row: usize,
    pub first_row: usize,
    pub last_row: usize,
    pub operator_col: usize,
    pub metric_col: usize,
    pub first_value_col: usize,
    pub last_value_col: usize,
    #[serde(default = "default_value_kind")]
    pub value_kind: ValueKind,
}

impl SeriesBlock {
    pub fn extent(&self) -> (usize, usize) {
        (
            self.last_row.max(self.header_row),
            self.last_value_col
                .max(self.operator_col)
                .max(self.metric_col),
        )
    }
}

/// Wide block of per-period whole counts, one row per operator.
#[derive(Debug, Clone, Deserialize)]
pub struct CountBlock {
    pub header_row: usize,
    pub first_row: usize,
    pub last_row: usize,
    pub operator_col: usize,
    pub first_value_col: usize,
    pub last_value_col: usize,
    /// Display ceiling for heat coloring. A rendering hint only; counts
    /// above it are carried through unclamped.
    #[serde(default = "default_scale_max")]
    pub scale_max: i64,
}

fn default_scale_max() -> i64 {
    42
}

impl CountBlock {
    pub fn extent(&self) -> (usize, usize) {
        (
            self.last_row.max(self.header_row),
            self.last_value_col.max(self.operator_col),
        )
    }
}

/// Horizontal strip of elapsed times: one row of period labels directly
/// paired with one row of duration cells.
#[derive(Debug, Clone, Deserialize)]
pub struct DurationBlock {
    pub label_row: usize,
    pub value_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl DurationBlock {
    pub fn extent(&self) -> (usize, usize) {
        (self.label_row.max(self.value_row), self.last_col)
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Statistic a summary entry derives from its header-named column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStat {
    /// Bottom-up first non-blank cell, as written.
    Last,
    /// Mean of the column read as elapsed time, shown `HH:MM:SS`.
    MeanDuration,
}

/// One rollup entry, keyed by header text rather than position so the
/// sheet can gain or reorder columns without touching the layout.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryColumn {
    pub label: String,
    pub column: String,
    pub stat: SummaryStat,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// One dashboard account. `display_name` is what operator cells in the
/// sheet are matched against when a non-admin session scopes a table.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub password: String,
    pub display_name: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Parsing / validation
// ---------------------------------------------------------------------------

impl LayoutConfig {
    pub fn from_toml(input: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig =
            toml::from_str(input).map_err(|e| LayoutError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.source.file.is_some() && self.source.url.is_some() {
            return Err(LayoutError::Validation(
                "source: set either file or url, not both".into(),
            ));
        }

        for (name, block) in &self.rankings {
            if block.last_row < block.first_row {
                return Err(LayoutError::Validation(format!(
                    "ranking '{name}': last_row {} is before first_row {}",
                    block.last_row, block.first_row
                )));
            }
            if block.name_col == block.value_col {
                return Err(LayoutError::Validation(format!(
                    "ranking '{name}': name_col and value_col are both {}",
                    block.name_col
                )));
            }
        }

        for (name, block) in &self.series {
            if block.last_row < block.first_row {
                return Err(LayoutError::Validation(format!(
                    "series '{name}': last_row {} is before first_row {}",
                    block.last_row, block.first_row
                )));
            }
            if block.last_value_col < block.first_value_col {
                return Err(LayoutError::Validation(format!(
                    "series '{name}': last_value_col {} is before first_value_col {}",
                    block.last_value_col, block.first_value_col
                )));
            }
            if block.operator_col == block.metric_col {
                return Err(LayoutError::Validation(format!(
                    "series '{name}': operator_col and metric_col are both {}",
                    block.operator_col
                )));
            }
            for label_col in [block.operator_col, block.metric_col] {
                if (block.first_value_col..=block.last_value_col).contains(&label_col) {
                    return Err(LayoutError::Validation(format!(
                        "series '{name}': value columns {}..={} overlap label column {label_col}",
                        block.first_value_col, block.last_value_col
                    )));
                }
            }
        }

        for (name, block) in &self.counts {
            if block.last_row < block.first_row {
                return Err(LayoutError::Validation(format!(
                    "counts '{name}': last_row {} is before first_row {}",
                    block.last_row, block.first_row
                )));
            }
            if block.last_value_col < block.first_value_col {
                return Err(LayoutError::Validation(format!(
                    "counts '{name}': last_value_col {} is before first_value_col {}",
                    block.last_value_col, block.first_value_col
                )));
            }
            if (block.first_value_col..=block.last_value_col).contains(&block.operator_col) {
                return Err(LayoutError::Validation(format!(
                    "counts '{name}': value columns overlap operator_col {}",
                    block.operator_col
                )));
            }
            if block.scale_max < 1 {
                return Err(LayoutError::Validation(format!(
                    "counts '{name}': scale_max must be at least 1, got {}",
                    block.scale_max
                )));
            }
        }

        for (name, block) in &self.durations {
            if block.last_col < block.first_col {
                return Err(LayoutError::Validation(format!(
                    "duration '{name}': last_col {} is before first_col {}",
                    block.last_col, block.first_col
                )));
            }
            if block.label_row == block.value_row {
                return Err(LayoutError::Validation(format!(
                    "duration '{name}': label_row and value_row are both {}",
                    block.label_row
                )));
            }
        }

        for entry in &self.summary {
            if entry.label.trim().is_empty() {
                return Err(LayoutError::Validation(
                    "summary entry with empty label".into(),
                ));
            }
            if entry.column.trim().is_empty() {
                return Err(LayoutError::Validation(format!(
                    "summary '{}': empty column name",
                    entry.label
                )));
            }
        }

        for (username, user) in &self.users {
            if user.display_name.trim().is_empty() {
                return Err(LayoutError::Validation(format!(
                    "user '{username}': empty display_name"
                )));
            }
            if user.password.is_empty() {
                return Err(LayoutError::Validation(format!(
                    "user '{username}': empty password"
                )));
            }
        }

        Ok(())
    }

    pub fn ranking(&self, name: &str) -> Result<&RankingBlock, LayoutError> {
        self.rankings
            .get(name)
            .ok_or_else(|| unknown("ranking", name, self.rankings.keys()))
    }

    pub fn series(&self, name: &str) -> Result<&SeriesBlock, LayoutError> {
        self.series
            .get(name)
            .ok_or_else(|| unknown("series", name, self.series.keys()))
    }

    pub fn counts(&self, name: &str) -> Result<&CountBlock, LayoutError> {
        self.counts
            .get(name)
            .ok_or_else(|| unknown("counts", name, self.counts.keys()))
    }

    pub fn durations(&self, name: &str) -> Result<&DurationBlock, LayoutError> {
        self.durations
            .get(name)
            .ok_or_else(|| unknown("duration", name, self.durations.keys()))
    }
}

fn unknown<'a, I>(kind: &'static str, name: &str, known: I) -> LayoutError
where
    I: Iterator<Item = &'a String>,
{
    LayoutError::UnknownTable {
        kind,
        name: name.to_string(),
        known: known.cloned().collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
