mod cardholder;
mod enriched;
mod errors;
mod lenient;
mod transaction;

use serde::Serialize;

pub use cardholder::CardholderRecord;
pub use enriched::{CategorizedTransaction, EnrichedTransaction, EnrichedTransactionRecord, OUTPUT_COLUMNS};
pub use errors::ValidationError;
pub use transaction::{TransactionRecord, ValidTransaction};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
    Failed,
    Pending
}

impl TransactionStatus {
    /// Matches the upstream status code exactly, casing included.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            "PENDING" => Some(Self::Pending),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum TransactionCategory {
    Low,
    Medium,
    High
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum FraudRiskLevel {
    Critical,
    High,
    Low
}
