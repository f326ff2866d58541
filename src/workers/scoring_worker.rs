use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::models::{EnrichedTransactionRecord, ValidTransaction};
use crate::stages::{process_record, CardholderIndex};

pub struct ScoringWorker;

impl ScoringWorker {
    /// Spawns a new worker and returns its input channel.
    ///
    /// The worker shares the immutable index and forwards every scored record to `output`.
    /// It exits once its input is closed, releasing its handle on `output`.
    pub fn spawn(
        worker_id: usize,
        index: Arc<CardholderIndex>,
        output: mpsc::Sender<EnrichedTransactionRecord>,
        capacity: usize
    ) -> mpsc::Sender<ValidTransaction> {
        let (sender, mut receiver) = mpsc::channel::<ValidTransaction>(capacity);

        spawn(async move {
            let mut processed = 0usize;

            while let Some(transaction) = receiver.recv().await {
                let record = process_record(transaction, &index);

                if output.send(record).await.is_err() {
                    warn!("Output closed, scoring worker [{worker_id}] is stopping early");
                    break;
                }

                processed += 1;
            }

            debug!("Scoring worker [{worker_id}] finished after [{processed}] transactions");
        });

        sender
    }
}
