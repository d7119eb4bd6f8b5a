//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | check            | Layout-vs-grid drift codes               |
//! | 10-19   | layout           | Layout config codes                      |
//! | 20-29   | source           | Grid acquisition codes                   |
//! | 30-39   | auth             | Login / session store codes              |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Check (3-9)
// =============================================================================

/// The layout no longer matches the fetched grid (a declared block
/// falls outside the data, or a summary column is gone from the
/// header row). Like `diff(1)`, a nonzero small code means "found
/// something", not "crashed".
pub const EXIT_CHECK_DRIFT: u8 = 3;

// =============================================================================
// Layout (10-19)
// =============================================================================

/// Layout TOML failed to parse or deserialize.
pub const EXIT_LAYOUT_PARSE: u8 = 10;

/// Layout parsed but failed validation (inverted range, overlapping
/// columns, empty credential).
pub const EXIT_LAYOUT_INVALID: u8 = 11;

/// A table name was requested that the layout does not declare.
pub const EXIT_UNKNOWN_TABLE: u8 = 12;

// =============================================================================
// Source (20-29)
// =============================================================================

/// Local file open/read failure.
pub const EXIT_SOURCE_IO: u8 = 20;

/// Network/HTTP failure fetching a published sheet (after retries).
pub const EXIT_SOURCE_HTTP: u8 = 21;

/// Fetched content could not be parsed as CSV.
pub const EXIT_SOURCE_DECODE: u8 = 22;

// =============================================================================
// Auth (30-39)
// =============================================================================

/// Login rejected: unknown username or wrong password. Deliberately
/// one code for both; the CLI never says which half was wrong.
pub const EXIT_AUTH_FAILED: u8 = 30;

/// A command needed a stored session and none exists.
pub const EXIT_NOT_LOGGED_IN: u8 = 31;

/// Session store read/write failure.
pub const EXIT_AUTH_STORE: u8 = 32;
