//! Vocabulary display

use crate::models::KnownVocabulary;

/// List merchants, categories and wallets in match priority order
pub fn format_vocabulary(vocabulary: &KnownVocabulary) -> String {
    let mut output = String::new();

    output.push_str("Merchants:\n");
    for (i, merchant) in vocabulary.merchants.iter().enumerate() {
        output.push_str(&format!("  {:>2}. {}\n", i + 1, merchant));
    }

    output.push_str("\nCategories:\n");
    for (i, category) in vocabulary.categories.iter().enumerate() {
        output.push_str(&format!("  {:>2}. {}\n", i + 1, category));
    }

    output.push_str("\nWallets:\n");
    for (i, wallet) in vocabulary.wallets.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        output.push_str(&format!(
            "  {:>2}. {} [{}]{}\n",
            i + 1,
            wallet.name,
            wallet.wallet_type,
            marker
        ));
    }

    output
}
