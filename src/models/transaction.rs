use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::lenient;
use crate::models::TransactionStatus;
use crate::types::{CardholderId, MerchantId, TransactionId};

/// Represents a single raw transaction as delivered by the upstream source.
///
/// Every field is nullable because nothing about the record has been checked yet.
/// Unknown fields in the source document are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub transaction_id: Option<TransactionId>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub cardholder_id: Option<CardholderId>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub merchant_id: Option<MerchantId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub merchant_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub merchant_location: Option<String>,
    /// An unreadable amount is nulled here and rejected by validation.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub transaction_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub transaction_status: Option<String>,
    /// Kept raw, normalization happens during categorization.
    #[serde(default, deserialize_with = "lenient::text")]
    pub transaction_timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub fraud_flag: Option<bool>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub risk_score: Option<Decimal>
}

/// A transaction that passed every admissibility check.
///
/// The checked fields are no longer optional, the rest are carried as they arrived.
#[derive(Debug, Clone)]
pub struct ValidTransaction {
    pub transaction_id: Option<TransactionId>,
    pub cardholder_id: CardholderId,
    pub merchant_id: MerchantId,
    pub merchant_name: Option<String>,
    pub merchant_location: Option<String>,
    pub transaction_amount: Decimal,
    pub transaction_status: TransactionStatus,
    pub transaction_timestamp: Option<String>,
    pub fraud_flag: Option<bool>,
    pub risk_score: Option<Decimal>
}
