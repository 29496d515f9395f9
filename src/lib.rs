//! tally - type a sentence, get a transaction
//!
//! This library turns short free-form sentences such as
//! `"250 jollibee lunch tomorrow"` into draft transactions, proposes
//! completions for the word being typed, and hands finished drafts to a
//! transaction store.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, wallets, vocabulary and transactions
//! - `parser`: Tokenizer, entity extraction, amount/date resolution,
//!   suggestions and draft composition
//! - `session`: The interactive entry session and the sink it submits to
//! - `storage`: JSON transaction store and YAML vocabulary file
//! - `audit`: Audit logging of saved transactions
//! - `display`: Terminal tables and one-line previews
//! - `cli`: Command handlers
//! - `tui`: The interactive entry screen
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_cli::parser::{Selection, TransactionParser};
//! use tally_cli::models::{Wallet, WalletType};
//!
//! let parser = TransactionParser::default();
//! let selection = Selection::new(Wallet::new("Cash", WalletType::Cash));
//! let today = chrono::Local::now().date_naive();
//! let draft = parser.preview("250 jollibee lunch tomorrow", &selection, today, today);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod parser;
pub mod session;
pub mod storage;
pub mod tui;

pub use error::{TallyError, TallyResult};
