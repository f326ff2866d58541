const DEFAULT_WORKERS: usize = 4;
const DEFAULT_BACKPRESSURE: usize = 256;

/// Execution settings of a batch run.
///
/// None of these affect results, only how the work is spread and buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub workers: usize,
    pub backpressure: usize
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            backpressure: DEFAULT_BACKPRESSURE
        }
    }

    /// Number of scoring workers, at least one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Capacity of every channel between stages, at least one.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
