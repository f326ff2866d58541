use crate::models::EnrichedTransactionRecord;
use crate::sink::{RecordSink, SinkError};

#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<EnrichedTransactionRecord>,
    flushes: usize
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EnrichedTransactionRecord] {
        &self.records
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &EnrichedTransactionRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());

        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;

        Ok(())
    }
}
