//! Credit card transaction enrichment pipeline.
//!
//! Validates a batch of raw transactions, joins them with the cardholder reference
//! table and derives risk and loyalty fields before handing them to a sink.

pub mod engine;
pub mod models;
pub mod sink;
pub mod sources;
pub mod stages;
pub mod types;
pub mod workers;
