use std::path::Path;

use thiserror::Error;

/// Failures that make an input source unreadable. None of these are recoverable within a batch.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to read [{path}]: {source}")]
    Io {
        path: String,
        source: std::io::Error
    },
    #[error("Malformed JSON in [{path}]: {source}")]
    Json {
        path: String,
        source: serde_json::Error
    },
    #[error("Malformed CSV in [{path}]: {source}")]
    Csv {
        path: String,
        source: csv::Error
    },
    #[error("Required column [{column}] is missing from [{path}]")]
    MissingColumn {
        path: String,
        column: &'static str
    },
    #[error("No transaction files were found in [{path}]")]
    NoFiles {
        path: String
    }
}

impl SourceError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json { path: path.display().to_string(), source }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv { path: path.display().to_string(), source }
    }

    pub fn missing_column(path: &Path, column: &'static str) -> Self {
        Self::MissingColumn { path: path.display().to_string(), column }
    }

    pub fn no_files(path: &Path) -> Self {
        Self::NoFiles { path: path.display().to_string() }
    }
}
