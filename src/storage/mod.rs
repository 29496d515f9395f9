//! Storage layer for tally
//!
//! JSON file storage for submitted transactions (atomic writes) and the
//! YAML vocabulary file.

pub mod file_io;
pub mod init;
pub mod transactions;
pub mod vocabulary;

pub use file_io::{read_json, read_yaml, write_json_atomic, write_yaml_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use transactions::TransactionRepository;
pub use vocabulary::VocabularyRepository;

use crate::config::paths::TallyPaths;
use crate::error::TallyResult;

/// Storage coordinator giving access to both repositories
pub struct Storage {
    paths: TallyPaths,
    pub transactions: TransactionRepository,
    pub vocabulary: VocabularyRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TallyPaths) -> TallyResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file(), paths.audit_log()),
            vocabulary: VocabularyRepository::new(paths.vocabulary_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Load stored transactions from disk
    pub fn load_all(&self) -> TallyResult<()> {
        self.transactions.load()
    }
}
