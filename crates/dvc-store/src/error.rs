//! Store error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One problem found while validating an imported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted location of the offending value, e.g. `layers.0.filters.1.type`.
    /// Empty for the document root.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Import failure. The store is left untouched whenever one of these is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration format: {}", join_issues(.issues))]
    Invalid { issues: Vec<ValidationIssue> },
}

impl ImportError {
    /// Validation issues, empty for syntax errors.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Json(_) => &[],
            Self::Invalid { issues } => issues,
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from reading or writing layer documents on disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to {operation} layer document: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize layer document")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to complete save of {}", .target_path.display())]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
