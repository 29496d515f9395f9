//! Display formatting for terminal output
//!
//! Plain-text renderings of drafts, stored records and the vocabulary for
//! the CLI. Tables go through `tabled`.

pub mod draft;
pub mod transaction;
pub mod vocabulary;

pub use draft::{format_draft_details, format_preview_line, format_suggestion};
pub use transaction::{format_transaction_details, format_transaction_table};
pub use vocabulary::format_vocabulary;
