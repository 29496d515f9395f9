//! Draft composition
//!
//! Combines the resolved amount and date with what the user picked by hand.
//! Anything picked by hand wins over what was inferred from the text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DraftTransaction, Money, Wallet};

/// Values chosen outside the text input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub wallet: Wallet,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Explicitly picked date; beats any date typed in the text
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Selection {
    /// A selection with only the wallet set
    pub fn new(wallet: Wallet) -> Self {
        Self {
            wallet,
            merchant: None,
            category: None,
            date: None,
            description: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Assemble a draft; `None` whenever there is no amount
pub fn compose(
    amount: Option<Money>,
    resolved_date: NaiveDate,
    selection: &Selection,
) -> Option<DraftTransaction> {
    let amount = amount?;

    Some(DraftTransaction {
        amount,
        merchant: non_empty(&selection.merchant).unwrap_or_default().to_string(),
        category: non_empty(&selection.category).unwrap_or_default().to_string(),
        date: selection.date.unwrap_or(resolved_date),
        description: non_empty(&selection.description).map(str::to_string),
        wallet: selection.wallet.name.clone(),
        wallet_type: selection.wallet.wallet_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WalletType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash() -> Selection {
        Selection::new(Wallet::new("Cash", WalletType::Cash))
    }

    #[test]
    fn test_no_amount_no_draft() {
        assert!(compose(None, ymd(2024, 3, 11), &cash().with_merchant("Sunburst")).is_none());
    }

    #[test]
    fn test_defaults_are_empty_strings() {
        let draft = compose(Some(Money::from_units(-250)), ymd(2024, 3, 11), &cash()).unwrap();
        assert_eq!(draft.merchant, "");
        assert_eq!(draft.category, "");
        assert_eq!(draft.description, None);
        assert_eq!(draft.wallet, "Cash");
        assert_eq!(draft.wallet_type, WalletType::Cash);
        assert_eq!(draft.date, ymd(2024, 3, 11));
    }

    #[test]
    fn test_selection_overrides() {
        let selection = cash()
            .with_merchant("Sunburst")
            .with_category("Meals")
            .with_date(ymd(2024, 1, 2))
            .with_description("lunch with team");
        let draft = compose(Some(Money::from_units(-250)), ymd(2024, 3, 11), &selection).unwrap();
        assert_eq!(draft.merchant, "Sunburst");
        assert_eq!(draft.category, "Meals");
        assert_eq!(draft.date, ymd(2024, 1, 2));
        assert_eq!(draft.description.as_deref(), Some("lunch with team"));
    }

    #[test]
    fn test_blank_overrides_count_as_unset() {
        let selection = cash().with_merchant("  ").with_description("");
        let draft = compose(Some(Money::from_units(10)), ymd(2024, 3, 11), &selection).unwrap();
        assert_eq!(draft.merchant, "");
        assert_eq!(draft.description, None);
    }
}
