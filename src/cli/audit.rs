//! Audit log command

use crate::error::TallyResult;
use crate::storage::Storage;

/// `tally audit`: print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> TallyResult<()> {
    let audit = storage.transactions.audit();
    if !audit.exists() {
        println!("No audit entries yet ({}).", audit.path().display());
        return Ok(());
    }

    let entries = audit.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet ({}).", audit.path().display());
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
