//! Draft transaction display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::DraftTransaction;
use crate::parser::Suggestion;

#[derive(Tabled)]
struct Field {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// One-line preview: direction, amount, merchant, category, date, wallet
pub fn format_preview_line(draft: &DraftTransaction, symbol: &str, date_format: &str) -> String {
    let direction = if draft.is_inflow() { "+" } else { "−" };
    let mut parts = vec![format!(
        "{} {}",
        direction,
        draft.amount.abs().format_with_symbol(symbol)
    )];
    if !draft.merchant.is_empty() {
        parts.push(draft.merchant.clone());
    }
    if !draft.category.is_empty() {
        parts.push(draft.category.clone());
    }
    parts.push(draft.date.format(date_format).to_string());
    parts.push(format!("{} ({})", draft.wallet, draft.wallet_type));
    parts.join(" · ")
}

/// Field/value table of a draft
pub fn format_draft_details(draft: &DraftTransaction, symbol: &str, date_format: &str) -> String {
    let direction = if draft.is_inflow() { "inflow" } else { "outflow" };
    let rows = vec![
        Field {
            name: "Amount",
            value: format!("{} ({})", draft.amount.format_with_symbol(symbol), direction),
        },
        Field {
            name: "Date",
            value: draft.date.format(date_format).to_string(),
        },
        Field {
            name: "Merchant",
            value: or_dash(&draft.merchant),
        },
        Field {
            name: "Category",
            value: or_dash(&draft.category),
        },
        Field {
            name: "Wallet",
            value: format!("{} ({})", draft.wallet, draft.wallet_type),
        },
        Field {
            name: "Note",
            value: or_dash(draft.description.as_deref().unwrap_or("")),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// `Sunburst  [Merchant]`
pub fn format_suggestion(suggestion: &Suggestion) -> String {
    format!("{}  [{}]", suggestion.text, suggestion.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, WalletType};
    use crate::parser::SuggestionKind;
    use chrono::NaiveDate;

    fn draft(cents: i64) -> DraftTransaction {
        DraftTransaction {
            amount: Money::from_cents(cents),
            merchant: "Sunburst".into(),
            category: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            description: None,
            wallet: "Cash".into(),
            wallet_type: WalletType::Cash,
        }
    }

    #[test]
    fn test_preview_line() {
        assert_eq!(
            format_preview_line(&draft(-250_000), "₱", "%Y-%m-%d"),
            "− ₱2,500.00 · Sunburst · 2024-03-11 · Cash (cash)"
        );
        assert!(format_preview_line(&draft(1000), "₱", "%b %d").starts_with("+ ₱10.00"));
    }

    #[test]
    fn test_details_table() {
        let table = format_draft_details(&draft(-25_000), "₱", "%Y-%m-%d");
        assert!(table.contains("-₱250.00 (outflow)"));
        assert!(table.contains("Sunburst"));
        assert!(table.contains("2024-03-11"));
        assert!(table.contains("Category"));
    }

    #[test]
    fn test_suggestion() {
        let suggestion = Suggestion::new("Sunburst", SuggestionKind::Merchant);
        assert_eq!(format_suggestion(&suggestion), "Sunburst  [Merchant]");
    }
}
