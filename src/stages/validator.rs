use rust_decimal::Decimal;

use crate::models::{TransactionRecord, TransactionStatus, ValidTransaction, ValidationError};

/// Returns whether a raw record is admissible into the batch.
pub fn validate(record: &TransactionRecord) -> bool {
    admit(record.clone()).is_ok()
}

/// Admits a raw record, narrowing its checked fields.
///
/// # Errors
/// Returns the first rule the record breaks, checked in this order:
/// - The amount is missing or negative.
/// - The status is not one of `SUCCESS`, `FAILED` or `PENDING`.
/// - The cardholder or merchant identifier is missing or empty.
pub fn admit(record: TransactionRecord) -> Result<ValidTransaction, ValidationError> {
    let amount = record.transaction_amount
        .ok_or_else(|| ValidationError::missing_amount(&record))?;

    if amount < Decimal::ZERO {
        return Err(ValidationError::negative_amount(&record, amount))
    }

    let status = record.transaction_status.as_deref()
        .and_then(TransactionStatus::parse)
        .ok_or_else(|| ValidationError::invalid_status(&record))?;

    let cardholder_id = present(&record.cardholder_id)
        .ok_or_else(|| ValidationError::missing_cardholder(&record))?
        .to_string();

    let merchant_id = present(&record.merchant_id)
        .ok_or_else(|| ValidationError::missing_merchant(&record))?
        .to_string();

    Ok(ValidTransaction {
        transaction_id: record.transaction_id,
        cardholder_id,
        merchant_id,
        merchant_name: record.merchant_name,
        merchant_location: record.merchant_location,
        transaction_amount: amount,
        transaction_status: status,
        transaction_timestamp: record.transaction_timestamp,
        fraud_flag: record.fraud_flag,
        risk_score: record.risk_score
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
