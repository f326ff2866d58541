mod scoring_worker;

pub use scoring_worker::ScoringWorker;
