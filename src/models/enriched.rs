use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{FraudRiskLevel, TransactionCategory, TransactionStatus, ValidTransaction};
use crate::types::{CardholderId, MerchantId, RewardPoints, TransactionId};

/// A valid transaction with the fields derived from the record alone.
#[derive(Debug, Clone)]
pub struct CategorizedTransaction {
    pub transaction: ValidTransaction,
    /// `None` when the raw timestamp could not be parsed.
    pub transaction_timestamp: Option<DateTime<Utc>>,
    pub transaction_category: TransactionCategory,
    pub high_risk: bool,
    pub merchant_info: Option<String>
}

/// A categorized transaction joined with its cardholder, or with nulls when there was no match.
#[derive(Debug, Clone)]
pub struct EnrichedTransaction {
    pub categorized: CategorizedTransaction,
    pub cardholder_matched: bool,
    pub reward_points: Option<RewardPoints>,
    /// Always holds every attribute column of the reference table so unmatched rows keep the schema.
    pub cardholder_attributes: BTreeMap<String, Option<String>>
}

/// The final output row handed to the sink.
///
/// Field order here is the column order of the serialized record. Cardholder
/// attribute columns are flattened in after `reward_points`.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedTransactionRecord {
    pub transaction_id: Option<TransactionId>,
    pub cardholder_id: CardholderId,
    pub merchant_id: MerchantId,
    pub merchant_name: Option<String>,
    pub merchant_location: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub transaction_amount: Decimal,
    pub transaction_status: TransactionStatus,
    pub transaction_timestamp: Option<DateTime<Utc>>,
    pub fraud_flag: Option<bool>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub risk_score: Option<Decimal>,
    pub transaction_category: TransactionCategory,
    pub high_risk: bool,
    pub merchant_info: Option<String>,
    pub reward_points: Option<RewardPoints>,
    #[serde(flatten)]
    pub cardholder_attributes: BTreeMap<String, Option<String>>,
    pub updated_reward_points: Option<RewardPoints>,
    pub fraud_risk_level: FraudRiskLevel,
    #[serde(skip)]
    pub cardholder_matched: bool
}

/// Names of every column the output owns, used to keep cardholder attributes from shadowing them.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "transaction_id",
    "cardholder_id",
    "merchant_id",
    "merchant_name",
    "merchant_location",
    "transaction_amount",
    "transaction_status",
    "transaction_timestamp",
    "fraud_flag",
    "risk_score",
    "transaction_category",
    "high_risk",
    "merchant_info",
    "reward_points",
    "updated_reward_points",
    "fraud_risk_level"
];
