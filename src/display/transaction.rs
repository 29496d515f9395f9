//! Stored transaction display

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::TransactionRecord;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Merchant")]
    merchant: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Table of stored records in the given order
pub fn format_transaction_table(
    records: &[TransactionRecord],
    symbol: &str,
    date_format: &str,
) -> String {
    if records.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = records.iter().map(|r| Row {
        id: r.id.to_string(),
        date: r.date.format(date_format).to_string(),
        merchant: r.merchant.clone(),
        category: r.category.clone(),
        wallet: r.wallet.clone(),
        amount: r.amount.format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::last(), Alignment::right());
    table.to_string()
}

/// Multi-line details of one stored record
pub fn format_transaction_details(record: &TransactionRecord, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", record.id));
    output.push_str(&format!("Date:        {}\n", record.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Wallet:      {} ({})\n",
        record.wallet, record.wallet_type
    ));

    if !record.merchant.is_empty() {
        output.push_str(&format!("Merchant:    {}\n", record.merchant));
    }
    if !record.category.is_empty() {
        output.push_str(&format!("Category:    {}\n", record.category));
    }
    if let Some(note) = &record.description {
        output.push_str(&format!("Note:        {}\n", note));
    }

    output
}
