use std::fmt;

#[derive(Debug)]
pub enum LayoutError {
    /// TOML parse / deserialization error.
    Parse(String),
    /// Layout validation error (inverted range, duplicate column, etc.).
    Validation(String),
    /// A table name was requested that the layout does not declare.
    UnknownTable {
        kind: &'static str,
        name: String,
        known: Vec<String>,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "layout parse error: {msg}"),
            Self::Validation(msg) => write!(f, "layout validation error: {msg}"),
            Self::UnknownTable { kind, name, .. } => {
                write!(f, "unknown {kind} '{name}'")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
