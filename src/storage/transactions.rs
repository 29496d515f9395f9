//! Transaction repository for JSON storage
//!
//! Keeps submitted records in `data/transactions.json`, newest first, and
//! appends one audit line per created record. Records are only ever created
//! and listed.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{TallyError, TallyResult};
use crate::models::{DraftTransaction, TransactionId, TransactionRecord};
use crate::session::TransactionSink;

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<TransactionRecord>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    audit: AuditLogger,
    data: RwLock<HashMap<TransactionId, TransactionRecord>>,
    /// Index: lowercased wallet name -> transaction ids
    by_wallet: RwLock<HashMap<String, Vec<TransactionId>>>,
}

fn lock_error(e: impl std::fmt::Display) -> TallyError {
    TallyError::Storage(format!("Failed to acquire lock: {}", e))
}

fn wallet_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Newest first: later date, then later creation
fn sort_newest_first(records: &mut [TransactionRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl TransactionRepository {
    /// Create a repository over the given data file and audit log
    pub fn new(path: PathBuf, audit_log: PathBuf) -> Self {
        Self {
            path,
            audit: AuditLogger::new(audit_log),
            data: RwLock::new(HashMap::new()),
            by_wallet: RwLock::new(HashMap::new()),
        }
    }

    /// The audit log records are appended to
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load transactions from disk and build the wallet index
    pub fn load(&self) -> TallyResult<()> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_wallet = self.by_wallet.write().map_err(lock_error)?;

        data.clear();
        by_wallet.clear();

        for record in file_data.transactions {
            by_wallet
                .entry(wallet_key(&record.wallet))
                .or_default()
                .push(record.id);
            data.insert(record.id, record);
        }

        debug!(count = data.len(), path = %self.path.display(), "transactions loaded");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> TallyResult<()> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> TallyResult<Vec<TransactionRecord>> {
        let data = self.data.read().map_err(lock_error)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions paid from or into a wallet (name is case-insensitive)
    pub fn get_by_wallet(&self, wallet: &str) -> TallyResult<Vec<TransactionRecord>> {
        let data = self.data.read().map_err(lock_error)?;
        let by_wallet = self.by_wallet.read().map_err(lock_error)?;

        let ids = by_wallet
            .get(&wallet_key(wallet))
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Count transactions
    pub fn count(&self) -> TallyResult<usize> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }

    /// Create a record from a draft, persist it, and audit it.
    ///
    /// Once the record is saved the call succeeds: a failed audit write is
    /// logged as a warning and does not turn the save into an error.
    pub fn create(&self, draft: &DraftTransaction) -> TallyResult<TransactionRecord> {
        if !draft.is_submittable() {
            return Err(TallyError::Validation(
                "Transaction amount must not be zero".into(),
            ));
        }
        if draft.wallet.trim().is_empty() {
            return Err(TallyError::Validation("Transaction needs a wallet".into()));
        }

        let record = TransactionRecord::from_draft(draft);
        {
            let mut data = self.data.write().map_err(lock_error)?;
            let mut by_wallet = self.by_wallet.write().map_err(lock_error)?;
            by_wallet
                .entry(wallet_key(&record.wallet))
                .or_default()
                .push(record.id);
            data.insert(record.id, record.clone());
        }

        if let Err(e) = self.save() {
            self.forget(record.id)?;
            return Err(e);
        }

        let entry = AuditEntry::create(
            EntityType::Transaction,
            record.id.to_string(),
            Some(record.merchant.clone()),
            &record,
        );
        if let Err(e) = self.audit.log(&entry) {
            warn!(id = %record.id, error = %e, "transaction saved but audit entry not written");
        }

        info!(id = %record.id, amount = %record.amount, wallet = %record.wallet, "transaction created");
        Ok(record)
    }

    /// Drop an in-memory record whose save failed
    fn forget(&self, id: TransactionId) -> TallyResult<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_wallet = self.by_wallet.write().map_err(lock_error)?;
        if let Some(record) = data.remove(&id) {
            if let Some(ids) = by_wallet.get_mut(&wallet_key(&record.wallet)) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(())
    }
}

impl TransactionSink for TransactionRepository {
    fn submit(&self, draft: &DraftTransaction) -> TallyResult<TransactionRecord> {
        self.create(draft)
    }
}
