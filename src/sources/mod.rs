mod cardholder_source;
mod errors;
mod transaction_source;

pub use cardholder_source::load_cardholders;
pub use errors::SourceError;
pub use transaction_source::TransactionSource;
