//! Screener preset lookup errors

/// Error type for resolving screener controls by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// No preset exists for the given column.
    #[error("no screener option for column '{0}'")]
    UnknownColumn(String),

    /// The column exists but has no choice with that label.
    #[error("column '{column}' has no choice labelled '{label}'")]
    UnknownChoice { column: String, label: String },

    /// The name does not match any tag, sector or grid cell.
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
}

impl SelectError {
    /// Creates an unknown-choice error.
    pub fn unknown_choice(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self::UnknownChoice {
            column: column.into(),
            label: label.into(),
        }
    }

    /// Creates an unknown-name error.
    pub fn unknown_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }
}
