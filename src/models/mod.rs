//! Core data models for tally
//!
//! Money, wallets, the known vocabulary, and the draft/persisted forms of a
//! transaction.

pub mod ids;
pub mod money;
pub mod transaction;
pub mod vocabulary;
pub mod wallet;

pub use ids::TransactionId;
pub use money::Money;
pub use transaction::{DraftTransaction, TransactionRecord};
pub use vocabulary::KnownVocabulary;
pub use wallet::{Wallet, WalletType};
