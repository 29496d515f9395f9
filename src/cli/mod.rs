//! CLI command handlers
//!
//! Bridges the clap argument structs with the parser, the entry session and
//! the store.

pub mod audit;
pub mod draft;
pub mod transaction;
pub mod vocab;

pub use audit::handle_audit_command;
pub use draft::{
    handle_add_command, handle_parse_command, handle_suggest_command, DraftArgs,
};
pub use transaction::handle_list_command;
pub use vocab::handle_vocab_command;

use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{KnownVocabulary, Wallet};

/// Pick the wallet for a new entry: the requested one, else the configured
/// default, else the first wallet in the vocabulary
pub fn resolve_wallet(
    vocabulary: &KnownVocabulary,
    settings: &Settings,
    requested: Option<&str>,
) -> TallyResult<Wallet> {
    if let Some(name) = requested {
        return vocabulary
            .find_wallet(name)
            .cloned()
            .ok_or_else(|| TallyError::wallet_not_found(name));
    }
    if let Some(name) = settings.default_wallet.as_deref() {
        return vocabulary
            .find_wallet(name)
            .cloned()
            .ok_or_else(|| TallyError::wallet_not_found(name));
    }
    vocabulary
        .default_wallet()
        .cloned()
        .ok_or_else(|| TallyError::Config("No wallets configured in the vocabulary".into()))
}
