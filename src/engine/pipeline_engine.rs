use std::path::Path;
use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};

use crate::engine::PipelineConfig;
use crate::models::{EnrichedTransactionRecord, TransactionRecord};
use crate::sink::RecordSink;
use crate::sources::{SourceError, TransactionSource};
use crate::stages::{admit, CardholderIndex};
use crate::workers::ScoringWorker;

/// Counts describing one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub read: usize,
    pub rejected: usize,
    pub emitted: usize,
    pub matched: usize,
    pub unmatched: usize
}

/// Async batch engine running validation, categorization, the cardholder join and scoring.
pub struct PipelineEngine {
    index: Arc<CardholderIndex>,
    config: PipelineConfig
}

impl PipelineEngine {
    /// Creates an engine over a fully loaded cardholder index.
    pub fn new(index: Arc<CardholderIndex>, config: PipelineConfig) -> Self {
        Self {
            index,
            config
        }
    }

    /// Orchestrates the end-to-end processing of one batch of transaction files into `sink`.
    ///
    /// Rejected records are counted and dropped. Records reach the sink in no particular order.
    ///
    /// # Errors
    /// Fails when the transaction source is absent or unreadable, or when the sink refuses a write.
    /// Records appended before the failure stay with the sink.
    pub async fn run<S: RecordSink>(&self, path: &Path, sink: &mut S) -> anyhow::Result<BatchReport> {
        let source = TransactionSource::open(path)?;

        info!("Processing [{}] transaction file(s) from [{}]", source.files().len(), path.display());

        let (record_sender, record_receiver) = mpsc::channel::<TransactionRecord>(self.config.backpressure);
        let (output_sender, mut output_receiver) = mpsc::channel::<EnrichedTransactionRecord>(self.config.backpressure);

        let reader_handle = self.spawn_reader(source, record_sender);
        let dispatch_handle = self.spawn_dispatcher(record_receiver, output_sender);

        let mut report = BatchReport::default();

        while let Some(record) = output_receiver.recv().await {
            sink.append(&record)?;

            if record.cardholder_matched {
                report.matched += 1;
            } else {
                report.unmatched += 1;
            }

            report.emitted += 1;
        }

        report.rejected = dispatch_handle.await?;
        report.read = reader_handle.await??;

        sink.flush()?;

        Ok(report)
    }

    fn spawn_reader(&self, source: TransactionSource, sender: mpsc::Sender<TransactionRecord>) -> JoinHandle<Result<usize, SourceError>> {
        spawn_blocking(move || {
            let result = source.read(|record| sender.blocking_send(record).is_ok());

            if let Err(error) = &result {
                error!("Transaction ingestion failed: {error}");
            }

            result
        })
    }

    fn spawn_dispatcher(
        &self,
        mut receiver: mpsc::Receiver<TransactionRecord>,
        output: mpsc::Sender<EnrichedTransactionRecord>
    ) -> JoinHandle<usize> {
        let workers: Vec<_> = (0..self.config.workers)
            .map(|worker_id| ScoringWorker::spawn(worker_id, self.index.clone(), output.clone(), self.config.backpressure))
            .collect();

        //NOTE: Only the workers may hold the output open, otherwise the final drain never ends
        drop(output);

        spawn(async move {
            let mut rejected = 0;
            let mut next = 0;

            while let Some(record) = receiver.recv().await {
                match admit(record) {
                    Ok(transaction) => {
                        if workers[next].send(transaction).await.is_err() {
                            error!("Scoring worker [{next}] is no longer accepting transactions");
                            break;
                        }

                        next = (next + 1) % workers.len();
                    }
                    Err(reason) => {
                        rejected += 1;
                        debug!("Dropping transaction: {reason}");
                    }
                }
            }

            rejected
        })
    }
}
