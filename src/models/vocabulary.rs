//! Known vocabulary
//!
//! The ordered lists of merchants, categories and wallets the suggestion
//! engine completes against. Order is significant: the first entry that
//! matches wins.

use serde::{Deserialize, Serialize};

use super::wallet::{Wallet, WalletType};

/// Reference lists supplied to the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownVocabulary {
    /// Merchant names, in match priority order
    #[serde(default)]
    pub merchants: Vec<String>,

    /// Category names, in match priority order
    #[serde(default)]
    pub categories: Vec<String>,

    /// Wallets, in match priority order; the first is the default selection
    #[serde(default)]
    pub wallets: Vec<Wallet>,
}

impl KnownVocabulary {
    /// Create an empty vocabulary
    pub fn empty() -> Self {
        Self {
            merchants: Vec::new(),
            categories: Vec::new(),
            wallets: Vec::new(),
        }
    }

    /// Find a merchant by name (case-insensitive), returning the stored spelling
    pub fn find_merchant(&self, name: &str) -> Option<&str> {
        find_name(&self.merchants, name)
    }

    /// Find a category by name (case-insensitive), returning the stored spelling
    pub fn find_category(&self, name: &str) -> Option<&str> {
        find_name(&self.categories, name)
    }

    /// Find a wallet by name (case-insensitive)
    pub fn find_wallet(&self, name: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.matches_name(name))
    }

    /// The wallet selected when nothing else was asked for
    pub fn default_wallet(&self) -> Option<&Wallet> {
        self.wallets.first()
    }
}

fn find_name<'a>(names: &'a [String], name: &str) -> Option<&'a str> {
    let wanted = name.trim().to_lowercase();
    names
        .iter()
        .find(|n| n.to_lowercase() == wanted)
        .map(String::as_str)
}

impl Default for KnownVocabulary {
    fn default() -> Self {
        Self {
            merchants: [
                "SM Supermarket",
                "Cardinal Bakeshop",
                "Henry's Camera",
                "Rustan's",
                "Sunburst",
                "Bow & Wow",
                "7 Eleven",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            categories: [
                "Groceries",
                "Snacks",
                "Hobbies",
                "Quality of Life",
                "Meals",
                "Dogs Stuff",
                "Stuff",
                "Inflow",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            wallets: vec![
                Wallet::new("UB Platinum", WalletType::Card),
                Wallet::new("Cash", WalletType::Cash),
                Wallet::new("Personal & Payroll", WalletType::Personal),
                Wallet::new("Seabank", WalletType::Card),
                Wallet::new("Maya", WalletType::Card),
                Wallet::new("GCash", WalletType::Card),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocab = KnownVocabulary::default();
        assert_eq!(vocab.merchants.len(), 7);
        assert_eq!(vocab.categories.len(), 8);
        assert_eq!(vocab.default_wallet().unwrap().name, "UB Platinum");
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let vocab = KnownVocabulary::default();
        assert_eq!(vocab.find_merchant("sunburst"), Some("Sunburst"));
        assert_eq!(vocab.find_category("QUALITY OF LIFE"), Some("Quality of Life"));
        assert_eq!(
            vocab.find_wallet("gcash").map(|w| w.wallet_type),
            Some(WalletType::Card)
        );
        assert!(vocab.find_merchant("Jollibee").is_none());
    }

    #[test]
    fn test_empty_vocabulary_has_no_default_wallet() {
        assert!(KnownVocabulary::empty().default_wallet().is_none());
    }

    #[test]
    fn test_yaml_shape() {
        let yaml = "merchants: [Jollibee]\nwallets:\n  - name: Cash\n    type: cash\n";
        let vocab: KnownVocabulary = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(vocab.merchants, vec!["Jollibee".to_string()]);
        assert!(vocab.categories.is_empty());
        assert_eq!(vocab.wallets[0].wallet_type, WalletType::Cash);
    }
}
