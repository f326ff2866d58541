use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{EnrichedTransaction, EnrichedTransactionRecord, FraudRiskLevel};
use crate::types::RewardPoints;

const POINTS_PER_AMOUNT: Decimal = Decimal::TEN;
const RISK_SCORE_THRESHOLD: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Inputs of the fraud risk classification.
#[derive(Debug, Clone, Copy)]
pub struct RiskSignals {
    pub high_risk: bool,
    pub risk_score: Option<Decimal>,
    pub fraud_flag: bool
}

type RiskGuard = (fn(&RiskSignals) -> bool, FraudRiskLevel);

// Evaluated in order, the first guard that holds decides the level.
const RISK_GUARDS: [RiskGuard; 2] = [
    (is_critical, FraudRiskLevel::Critical),
    (is_elevated, FraudRiskLevel::High)
];

fn is_critical(signals: &RiskSignals) -> bool {
    signals.high_risk
}

fn is_elevated(signals: &RiskSignals) -> bool {
    signals.risk_score.is_some_and(|score| score > RISK_SCORE_THRESHOLD) || signals.fraud_flag
}

pub fn fraud_risk_level(signals: &RiskSignals) -> FraudRiskLevel {
    RISK_GUARDS.iter()
        .find(|(guard, _)| guard(signals))
        .map(|(_, level)| *level)
        .unwrap_or(FraudRiskLevel::Low)
}

/// Adds one point per ten spent, rounded half up, onto the existing balance.
///
/// `None` when there is no balance to accumulate onto or the sum does not fit.
pub fn updated_reward_points(existing: Option<RewardPoints>, amount: Decimal) -> Option<RewardPoints> {
    let earned = (amount / POINTS_PER_AMOUNT)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()?;

    existing?.checked_add(earned)
}

/// Computes the loyalty and fraud fields and flattens the record into its output shape.
pub fn score(enriched: EnrichedTransaction) -> EnrichedTransactionRecord {
    let EnrichedTransaction { categorized, cardholder_matched, reward_points, cardholder_attributes } = enriched;
    let transaction = categorized.transaction;

    let updated_reward_points = if cardholder_matched {
        updated_reward_points(reward_points, transaction.transaction_amount)
    } else {
        None
    };

    let fraud_risk_level = fraud_risk_level(&RiskSignals {
        high_risk: categorized.high_risk,
        risk_score: transaction.risk_score,
        fraud_flag: transaction.fraud_flag.unwrap_or(false)
    });

    EnrichedTransactionRecord {
        transaction_id: transaction.transaction_id,
        cardholder_id: transaction.cardholder_id,
        merchant_id: transaction.merchant_id,
        merchant_name: transaction.merchant_name,
        merchant_location: transaction.merchant_location,
        transaction_amount: transaction.transaction_amount,
        transaction_status: transaction.transaction_status,
        transaction_timestamp: categorized.transaction_timestamp,
        fraud_flag: transaction.fraud_flag,
        risk_score: transaction.risk_score,
        transaction_category: categorized.transaction_category,
        high_risk: categorized.high_risk,
        merchant_info: categorized.merchant_info,
        reward_points,
        cardholder_attributes,
        updated_reward_points,
        fraud_risk_level,
        cardholder_matched
    }
}
