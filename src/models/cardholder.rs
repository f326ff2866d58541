use std::collections::BTreeMap;

use crate::types::{CardholderId, RewardPoints};

/// A single row of the cardholder reference table.
///
/// Columns other than the key and the reward balance are kept as opaque profile
/// attributes and passed through to the output untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CardholderRecord {
    pub cardholder_id: CardholderId,
    pub reward_points: Option<RewardPoints>,
    pub attributes: BTreeMap<String, Option<String>>
}
