use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::{Deserializer, Value};
use tracing::{debug, warn};

use crate::models::TransactionRecord;
use crate::sources::SourceError;

const JSON_EXTENSION: &str = "json";

/// The set of JSON files making up one batch of transactions.
///
/// A file may hold a JSON array of records, a stream of concatenated or
/// newline-delimited objects, or any mix of both.
#[derive(Debug, Clone)]
pub struct TransactionSource {
    files: Vec<PathBuf>
}

impl TransactionSource {
    /// Resolves the batch input, either a single file or every `.json` file of a directory in name order.
    ///
    /// # Errors
    /// Returns `SourceError` if the path does not exist or a directory holds no JSON files.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let metadata = fs::metadata(path).map_err(|error| SourceError::io(path, error))?;

        if !metadata.is_dir() {
            return Ok(Self { files: vec![path.to_path_buf()] })
        }

        let mut files = Vec::new();

        for entry in fs::read_dir(path).map_err(|error| SourceError::io(path, error))? {
            let entry_path = entry.map_err(|error| SourceError::io(path, error))?.path();

            if entry_path.is_file() && entry_path.extension().is_some_and(|extension| extension == JSON_EXTENSION) {
                files.push(entry_path);
            }
        }

        if files.is_empty() {
            return Err(SourceError::no_files(path))
        }

        files.sort();

        Ok(Self { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Streams every record of the batch into `emit` and returns how many were read.
    ///
    /// Documents that do not map onto a transaction record are logged and skipped.
    /// Reading stops early once `emit` returns `false`.
    ///
    /// # Errors
    /// Returns `SourceError` on I/O failures and JSON syntax errors, the rest of the file cannot be trusted.
    pub fn read<F>(&self, mut emit: F) -> Result<usize, SourceError>
    where
        F: FnMut(TransactionRecord) -> bool,
    {
        let mut count = 0;

        for path in &self.files {
            debug!("Reading transactions from [{}]", path.display());

            let file = File::open(path).map_err(|error| SourceError::io(path, error))?;

            for document in Deserializer::from_reader(BufReader::new(file)).into_iter::<Value>() {
                let documents = match document.map_err(|error| SourceError::json(path, error))? {
                    Value::Array(items) => items,
                    value => vec![value]
                };

                for value in documents {
                    match serde_json::from_value::<TransactionRecord>(value) {
                        Ok(record) => {
                            count += 1;

                            if !emit(record) {
                                return Ok(count)
                            }
                        }
                        Err(error) => {
                            warn!("Skipping transaction document in [{}]: {error}", path.display());
                        }
                    }
                }
            }
        }

        Ok(count)
    }
}
