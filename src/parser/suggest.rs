//! Inline suggestions
//!
//! Looks only at the last whitespace-delimited token of the input and
//! proposes at most one completion. Strategies run in a fixed order and the
//! first hit wins, so a merchant prefix always beats a category prefix.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::extract::{Extractor, Match};
use super::lexicon::Lexicon;
use crate::models::KnownVocabulary;

/// Tokens shorter than this never get a suggestion
const MIN_TOKEN_CHARS: usize = 2;

/// What a suggestion completes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Merchant,
    Category,
    Date,
    Amount,
    Wallet,
}

impl SuggestionKind {
    /// Label shown next to the suggestion
    pub fn label(self) -> &'static str {
        match self {
            Self::Merchant => "Merchant",
            Self::Category => "Category",
            Self::Date => "Date",
            Self::Amount => "Amount",
            Self::Wallet => "Wallet",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A proposed completion for the last token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub kind: SuggestionKind,
    pub label: String,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, kind: SuggestionKind) -> Self {
        Self {
            text: text.into(),
            kind,
            label: kind.label().to_string(),
        }
    }
}

type Strategy = fn(&SuggestionEngine<'_>, &str) -> Option<Suggestion>;

const STRATEGIES: &[Strategy] = &[
    suggest_merchant,
    suggest_category,
    suggest_wallet,
    suggest_amount,
    suggest_month_day,
    suggest_relative_day,
];

/// Suggestion engine over a vocabulary snapshot
pub struct SuggestionEngine<'a> {
    vocabulary: &'a KnownVocabulary,
    extractor: &'a Extractor,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(vocabulary: &'a KnownVocabulary, extractor: &'a Extractor) -> Self {
        Self {
            vocabulary,
            extractor,
        }
    }

    /// Suggest a completion for a single token
    pub fn suggest(&self, token: &str) -> Option<Suggestion> {
        if token.chars().count() < MIN_TOKEN_CHARS {
            return None;
        }
        STRATEGIES.iter().find_map(|strategy| strategy(self, token))
    }

    /// Suggest a completion for the last token of `text`
    pub fn suggest_for(&self, text: &str) -> Option<Suggestion> {
        self.suggest(last_token(text))
    }
}

/// The last whitespace-delimited token; empty when the text ends in whitespace
pub fn last_token(text: &str) -> &str {
    text.rsplit(char::is_whitespace).next().unwrap_or("")
}

/// Replace the last token of `text` with the suggestion and append a space.
/// Everything before the last token is kept exactly as typed.
pub fn apply_suggestion(text: &str, suggestion: &Suggestion) -> String {
    let prefix = &text[..text.len() - last_token(text).len()];
    format!("{}{} ", prefix, suggestion.text)
}

fn prefix_match<'n>(names: impl IntoIterator<Item = &'n str>, token: &str) -> Option<&'n str> {
    let wanted = token.to_lowercase();
    names
        .into_iter()
        .find(|name| name.to_lowercase().starts_with(&wanted))
}

fn suggest_merchant(engine: &SuggestionEngine<'_>, token: &str) -> Option<Suggestion> {
    let names = engine.vocabulary.merchants.iter().map(String::as_str);
    prefix_match(names, token).map(|name| Suggestion::new(name, SuggestionKind::Merchant))
}

fn suggest_category(engine: &SuggestionEngine<'_>, token: &str) -> Option<Suggestion> {
    let names = engine.vocabulary.categories.iter().map(String::as_str);
    prefix_match(names, token).map(|name| Suggestion::new(name, SuggestionKind::Category))
}

fn suggest_wallet(engine: &SuggestionEngine<'_>, token: &str) -> Option<Suggestion> {
    let names = engine.vocabulary.wallets.iter().map(|w| w.name.as_str());
    prefix_match(names, token).map(|name| Suggestion::new(name, SuggestionKind::Wallet))
}

fn suggest_amount(engine: &SuggestionEngine<'_>, token: &str) -> Option<Suggestion> {
    match engine.extractor.match_word(token) {
        Match::Money(_) | Match::Number(_) => Some(Suggestion::new(token, SuggestionKind::Amount)),
        _ => None,
    }
}

fn month_day_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s*(\d{1,2})$")
            .unwrap_or_else(|e| panic!("month-day pattern is invalid: {e}"))
    })
}

fn suggest_month_day(_engine: &SuggestionEngine<'_>, token: &str) -> Option<Suggestion> {
    let captures = month_day_pattern().captures(token)?;
    Some(Suggestion::new(
        format!("{} {}", &captures[1], &captures[2]),
        SuggestionKind::Date,
    ))
}

fn suggest_relative_day(_engine: &SuggestionEngine<'_>, token: &str) -> Option<Suggestion> {
    Lexicon::relative_keywords()
        .find(|keyword| keyword.eq_ignore_ascii_case(token))
        .map(|_| Suggestion::new(token, SuggestionKind::Date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Wallet, WalletType};

    fn suggest(token: &str) -> Option<Suggestion> {
        let vocabulary = KnownVocabulary::default();
        let extractor = Extractor::default();
        SuggestionEngine::new(&vocabulary, &extractor).suggest(token)
    }

    fn kind_and_text(token: &str) -> Option<(SuggestionKind, String)> {
        suggest(token).map(|s| (s.kind, s.text))
    }

    #[test]
    fn test_merchant_prefix() {
        let suggestion = suggest("sun").unwrap();
        assert_eq!(suggestion.text, "Sunburst");
        assert_eq!(suggestion.kind, SuggestionKind::Merchant);
        assert_eq!(suggestion.label, "Merchant");
    }

    #[test]
    fn test_merchant_beats_category() {
        let vocabulary = KnownVocabulary {
            merchants: vec!["Snack Shack".into()],
            categories: vec!["Snacks".into()],
            wallets: Vec::new(),
        };
        let extractor = Extractor::default();
        let engine = SuggestionEngine::new(&vocabulary, &extractor);
        assert_eq!(engine.suggest("sna").unwrap().kind, SuggestionKind::Merchant);
    }

    #[test]
    fn test_first_entry_wins_within_kind() {
        // "Dogs Stuff" contains "st" but only prefixes count
        assert_eq!(
            kind_and_text("st"),
            Some((SuggestionKind::Category, "Stuff".into()))
        );
        assert_eq!(
            kind_and_text("SM"),
            Some((SuggestionKind::Merchant, "SM Supermarket".into()))
        );
    }

    #[test]
    fn test_category_and_wallet() {
        assert_eq!(
            kind_and_text("groc"),
            Some((SuggestionKind::Category, "Groceries".into()))
        );
        assert_eq!(
            kind_and_text("gca"),
            Some((SuggestionKind::Wallet, "GCash".into()))
        );
    }

    #[test]
    fn test_amount_keeps_token_as_typed() {
        assert_eq!(kind_and_text("250k"), Some((SuggestionKind::Amount, "250k".into())));
        assert_eq!(kind_and_text("₱99"), Some((SuggestionKind::Amount, "₱99".into())));
        assert_eq!(kind_and_text("25"), Some((SuggestionKind::Amount, "25".into())));
    }

    #[test]
    fn test_month_day() {
        assert_eq!(
            kind_and_text("march11"),
            Some((SuggestionKind::Date, "mar 11".into()))
        );
        assert_eq!(
            kind_and_text("Dec25"),
            Some((SuggestionKind::Date, "Dec 25".into()))
        );
    }

    #[test]
    fn test_relative_keyword() {
        assert_eq!(
            kind_and_text("tomorrow"),
            Some((SuggestionKind::Date, "tomorrow".into()))
        );
        assert_eq!(kind_and_text("tm"), Some((SuggestionKind::Date, "tm".into())));
    }

    #[test]
    fn test_short_or_unknown_tokens() {
        assert_eq!(suggest(""), None);
        assert_eq!(suggest("s"), None);
        assert_eq!(suggest("5"), None);
        assert_eq!(suggest("jollibee"), None);
    }

    #[test]
    fn test_last_token() {
        assert_eq!(last_token("250 jollibee sun"), "sun");
        assert_eq!(last_token("250 "), "");
        assert_eq!(last_token(""), "");
        assert_eq!(last_token("single"), "single");
    }

    #[test]
    fn test_suggest_for_uses_last_token_only() {
        let mut vocabulary = KnownVocabulary::empty();
        vocabulary.wallets.push(Wallet::new("Maya", WalletType::Card));
        let extractor = Extractor::default();
        let engine = SuggestionEngine::new(&vocabulary, &extractor);
        assert_eq!(engine.suggest_for("250 lunch ma").unwrap().text, "Maya");
        assert_eq!(engine.suggest_for("ma lunch "), None);
    }

    #[test]
    fn test_apply_replaces_last_token() {
        let suggestion = Suggestion::new("Sunburst", SuggestionKind::Merchant);
        assert_eq!(apply_suggestion("250  lunch sun", &suggestion), "250  lunch Sunburst ");
        assert_eq!(apply_suggestion("sun", &suggestion), "Sunburst ");
    }
}
