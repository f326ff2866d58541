use rust_decimal::Decimal;

use crate::models::{CategorizedTransaction, TransactionCategory, ValidTransaction};
use crate::types::parse_timestamp;

const LOW_CEILING: Decimal = Decimal::ONE_HUNDRED;
const MEDIUM_CEILING: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
const HIGH_RISK_AMOUNT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
const MERCHANT_SEPARATOR: &str = "-";

type CategoryGuard = (fn(Decimal) -> bool, TransactionCategory);

// First match wins, anything past the last guard is High.
const CATEGORY_GUARDS: [CategoryGuard; 2] = [
    (is_low, TransactionCategory::Low),
    (is_medium, TransactionCategory::Medium)
];

fn is_low(amount: Decimal) -> bool {
    amount <= LOW_CEILING
}

fn is_medium(amount: Decimal) -> bool {
    amount > LOW_CEILING && amount <= MEDIUM_CEILING
}

/// Derives the per-record fields of an admitted transaction.
///
/// Total over valid input: an unparseable timestamp becomes `None` and a missing
/// fraud flag counts as not flagged.
pub fn categorize(transaction: ValidTransaction) -> CategorizedTransaction {
    let amount = transaction.transaction_amount;
    let transaction_category = categorize_amount(amount);
    let high_risk = is_high_risk(transaction.fraud_flag.unwrap_or(false), amount, transaction_category);
    let merchant_info = format_merchant_info(transaction.merchant_name.as_deref(), transaction.merchant_location.as_deref());
    let transaction_timestamp = transaction.transaction_timestamp.as_deref().and_then(parse_timestamp);

    CategorizedTransaction {
        transaction,
        transaction_timestamp,
        transaction_category,
        high_risk,
        merchant_info
    }
}

pub fn categorize_amount(amount: Decimal) -> TransactionCategory {
    CATEGORY_GUARDS.iter()
        .find(|(guard, _)| guard(amount))
        .map(|(_, category)| *category)
        .unwrap_or(TransactionCategory::High)
}

pub fn is_high_risk(fraud_flag: bool, amount: Decimal, category: TransactionCategory) -> bool {
    fraud_flag || amount > HIGH_RISK_AMOUNT || category == TransactionCategory::High
}

/// Joins name and location with a hyphen. Null in either part nulls the whole value.
pub fn format_merchant_info(name: Option<&str>, location: Option<&str>) -> Option<String> {
    match (name, location) {
        (Some(name), Some(location)) => Some(format!("{name}{MERCHANT_SEPARATOR}{location}")),
        _ => None
    }
}
