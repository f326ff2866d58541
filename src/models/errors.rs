use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TransactionRecord;

const UNKNOWN_TRANSACTION: &str = "<unknown>";

/// Reasons a raw record is not admitted into the batch.
///
/// These are data-quality outcomes, not failures: the engine logs them and drops the record.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Amount is missing for transaction [{transaction_id}]")]
    MissingAmount {
        transaction_id: String
    },
    #[error("Amount [{amount}] is negative for transaction [{transaction_id}]")]
    NegativeAmount {
        transaction_id: String,
        amount: Decimal
    },
    #[error("Status [{status}] is not admissible for transaction [{transaction_id}]")]
    InvalidStatus {
        transaction_id: String,
        status: String
    },
    #[error("Cardholder is missing for transaction [{transaction_id}]")]
    MissingCardholder {
        transaction_id: String
    },
    #[error("Merchant is missing for transaction [{transaction_id}]")]
    MissingMerchant {
        transaction_id: String
    }
}

impl ValidationError {
    pub fn missing_amount(record: &TransactionRecord) -> Self {
        Self::MissingAmount { transaction_id: label(record) }
    }

    pub fn negative_amount(record: &TransactionRecord, amount: Decimal) -> Self {
        Self::NegativeAmount { transaction_id: label(record), amount }
    }

    pub fn invalid_status(record: &TransactionRecord) -> Self {
        Self::InvalidStatus {
            transaction_id: label(record),
            status: record.transaction_status.clone().unwrap_or_else(|| "null".to_string())
        }
    }

    pub fn missing_cardholder(record: &TransactionRecord) -> Self {
        Self::MissingCardholder { transaction_id: label(record) }
    }

    pub fn missing_merchant(record: &TransactionRecord) -> Self {
        Self::MissingMerchant { transaction_id: label(record) }
    }
}

fn label(record: &TransactionRecord) -> String {
    record.transaction_id.clone().unwrap_or_else(|| UNKNOWN_TRANSACTION.to_string())
}
