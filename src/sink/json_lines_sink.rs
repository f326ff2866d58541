use std::io::{BufWriter, Write};

use crate::models::EnrichedTransactionRecord;
use crate::sink::{RecordSink, SinkError};

/// Writes each record as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: BufWriter<W>
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer)
        }
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn append(&mut self, record: &EnrichedTransactionRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;

        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;

        Ok(())
    }
}
