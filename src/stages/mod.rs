mod categorizer;
mod enricher;
mod scorer;
mod validator;

use crate::models::{EnrichedTransactionRecord, ValidTransaction};

pub use categorizer::{categorize, categorize_amount, format_merchant_info, is_high_risk};
pub use enricher::{enrich, CardholderIndex};
pub use scorer::{fraud_risk_level, score, updated_reward_points, RiskSignals};
pub use validator::{admit, validate};

/// Runs an admitted transaction through categorization, the cardholder join and scoring.
pub fn process_record(transaction: ValidTransaction, index: &CardholderIndex) -> EnrichedTransactionRecord {
    score(enrich(categorize(transaction), index))
}
