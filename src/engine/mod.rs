mod config;
mod pipeline_engine;
#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use pipeline_engine::{BatchReport, PipelineEngine};
