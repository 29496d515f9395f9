//! Wallet model
//!
//! A wallet is where money for a transaction comes from or goes to: a card,
//! physical cash, or a personal/payroll account.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    /// Debit/credit card or e-wallet
    #[default]
    Card,
    /// Physical cash
    Cash,
    /// Personal or payroll account
    Personal,
}

impl WalletType {
    /// Parse wallet type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "card" | "credit" | "debit" => Some(Self::Card),
            "cash" => Some(Self::Cash),
            "personal" | "payroll" => Some(Self::Personal),
            _ => None,
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Cash => write!(f, "cash"),
            Self::Personal => write!(f, "personal"),
        }
    }
}

/// A named wallet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallet {
    /// Display name (e.g. "GCash")
    pub name: String,

    /// Type of wallet
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
}

impl Wallet {
    /// Create a new wallet
    pub fn new(name: impl Into<String>, wallet_type: WalletType) -> Self {
        Self {
            name: name.into(),
            wallet_type,
        }
    }

    /// Check if this wallet matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_type_parse() {
        assert_eq!(WalletType::parse("card"), Some(WalletType::Card));
        assert_eq!(WalletType::parse("CASH"), Some(WalletType::Cash));
        assert_eq!(WalletType::parse("payroll"), Some(WalletType::Personal));
        assert_eq!(WalletType::parse("crypto"), None);
    }

    #[test]
    fn test_matches_name() {
        let wallet = Wallet::new("UB Platinum", WalletType::Card);
        assert!(wallet.matches_name("ub platinum"));
        assert!(wallet.matches_name("  UB PLATINUM "));
        assert!(!wallet.matches_name("UB"));
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let wallet = Wallet::new("Cash", WalletType::Cash);
        let json = serde_json::to_string(&wallet).unwrap();
        assert_eq!(json, r#"{"name":"Cash","type":"cash"}"#);
    }
}
