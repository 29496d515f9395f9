//! Stored transaction listing

use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::TallyResult;
use crate::storage::Storage;

/// `tally list`: newest records first, optionally for one wallet
pub fn handle_list_command(
    storage: &Storage,
    settings: &Settings,
    wallet: Option<&str>,
    limit: usize,
) -> TallyResult<()> {
    let mut records = match wallet {
        Some(name) => storage.transactions.get_by_wallet(name)?,
        None => storage.transactions.get_all()?,
    };
    let total = records.len();
    records.truncate(limit);

    println!(
        "{}",
        format_transaction_table(&records, &settings.currency_symbol, &settings.date_format)
    );
    if total > records.len() {
        println!("Showing {} of {} transactions", records.len(), total);
    }
    Ok(())
}
