mod timestamp;

pub use timestamp::parse_timestamp;

pub type TransactionId = String;
pub type CardholderId = String;
pub type MerchantId = String;
pub type RewardPoints = i64;
