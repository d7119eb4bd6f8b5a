//! Derived table types. Everything here is the output side of the
//! engine: plain serializable values with no back-reference to the grid
//! they came from.

use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// One collaborator row of a ranking block, post-parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub name: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// One melted point of an evolution block. A wide row with N period
/// columns becomes N of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub operator: String,
    pub metric: String,
    pub period: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Whole count for one operator on one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSample {
    pub operator: String,
    pub period: String,
    pub count: i64,
}

/// A count block's samples plus its display ceiling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountTable {
    pub scale_max: i64,
    pub samples: Vec<CountSample>,
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// Elapsed minutes for one period label of a duration strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSample {
    pub period: String,
    pub minutes: f64,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// One formatted rollup stat. `value` is display text: either a cell as
/// written or an `HH:MM:SS` mean, with `-` standing in for no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryValue {
    pub label: String,
    pub column: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Every configured table, derived in one pass over one grid snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub meta: BoardMeta,
    pub rankings: BTreeMap<String, Vec<RankingEntry>>,
    pub series: BTreeMap<String, Vec<MetricPoint>>,
    pub counts: BTreeMap<String, CountTable>,
    pub durations: BTreeMap<String, Vec<DurationSample>>,
    pub summary: Vec<SummaryValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardMeta {
    /// Layout name from the config.
    pub layout: String,
    /// Human-readable description of where the grid came from.
    pub source: String,
    pub engine_version: String,
    /// Derivation time, RFC 3339 UTC.
    pub generated_at: String,
    /// Display name the tables were scoped to, when a non-admin session
    /// was applied.
    pub scoped_to: Option<String>,
}
