//! Error types for workspace building

use thiserror::Error;

pub type Result<T, E = WorkspaceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The row source did not yield a well-formed table
    #[error("malformed input{}: {reason}", at_row(.row))]
    InputShape { row: Option<usize>, reason: String },

    /// An invariant of the document did not hold after assembly
    #[error("workspace build failed{}: {reason}", at_row(.row))]
    Build { row: Option<usize>, reason: String },

    #[error("invalid {field} '{value}': {message}")]
    InvalidConfig {
        field: &'static str,
        value: String,
        message: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WorkspaceError {
    pub fn input_shape(row: Option<usize>, reason: impl Into<String>) -> Self {
        Self::InputShape {
            row,
            reason: reason.into(),
        }
    }

    pub fn build(row: Option<usize>, reason: impl Into<String>) -> Self {
        Self::Build {
            row,
            reason: reason.into(),
        }
    }

    /// Row that triggered the failure, if any
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::InputShape { row, .. } | Self::Build { row, .. } => *row,
            _ => None,
        }
    }
}

fn at_row(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" at row {row}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_row() {
        let err = WorkspaceError::input_shape(Some(3), "expected an array of cells");
        assert_eq!(err.to_string(), "malformed input at row 3: expected an array of cells");
        assert_eq!(err.row(), Some(3));
    }

    #[test]
    fn test_message_without_row() {
        let err = WorkspaceError::build(None, "dialog node count mismatch");
        assert_eq!(err.to_string(), "workspace build failed: dialog node count mismatch");
        assert_eq!(err.row(), None);
    }
}
