//! `opsgrid-engine` — Worksheet grid extraction and dashboard tables.
//!
//! Pure engine crate: receives an already-fetched grid of cell text,
//! returns derived tables. No CLI, network or filesystem dependencies.

pub mod board;
pub mod config;
pub mod error;
pub mod extract;
pub mod grid;
pub mod model;
pub mod reshape;
pub mod rollup;
pub mod session;
pub mod value;

#[cfg(test)]
pub mod testutil;

pub use config::LayoutConfig;
pub use error::LayoutError;
pub use grid::Grid;
pub use model::{Board, CountSample, CountTable, DurationSample, MetricPoint, RankingEntry, SummaryValue};
pub use session::{authenticate, Role, Session};
