mod errors;
mod json_lines_sink;
#[cfg(test)]
mod memory_sink;

use crate::models::EnrichedTransactionRecord;

pub use errors::SinkError;
pub use json_lines_sink::JsonLinesSink;
#[cfg(test)]
pub use memory_sink::MemorySink;

/// Append-only destination for the enriched records of a batch.
pub trait RecordSink {
    fn append(&mut self, record: &EnrichedTransactionRecord) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
}
