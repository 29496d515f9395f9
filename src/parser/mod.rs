//! Natural-language transaction parser
//!
//! Turns a free-form sentence such as "250 jollibee lunch tomorrow" into a
//! draft transaction, and proposes a completion for the word being typed.
//!
//! Pipeline: [`Extractor`] → [`resolve_amount`] + [`resolve_date`] →
//! [`compose`] for the preview, and [`SuggestionEngine`] on the last token
//! for the inline suggestion. Every step is a pure function of its inputs.

pub mod amount;
pub mod compose;
pub mod date;
pub mod extract;
pub mod lexicon;
pub mod suggest;
pub mod tokenizer;

use chrono::NaiveDate;

use crate::models::{DraftTransaction, KnownVocabulary};

pub use amount::{is_inflow, resolve_amount};
pub use compose::{compose, Selection};
pub use date::resolve_date;
pub use extract::{Entity, Extractor, Match};
pub use lexicon::{Lexicon, RelativeDay, WordClass};
pub use suggest::{apply_suggestion, last_token, Suggestion, SuggestionEngine, SuggestionKind};
pub use tokenizer::{tokenize, Token, TokenKind};

/// Preview and suggestion computed from one snapshot of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub draft: Option<DraftTransaction>,
    pub suggestion: Option<Suggestion>,
}

/// The full parsing pipeline over a fixed vocabulary and lexicon
#[derive(Debug, Clone)]
pub struct TransactionParser {
    extractor: Extractor,
    vocabulary: KnownVocabulary,
}

impl TransactionParser {
    pub fn new(vocabulary: KnownVocabulary, lexicon: Lexicon) -> Self {
        Self {
            extractor: Extractor::new(lexicon),
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &KnownVocabulary {
        &self.vocabulary
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Draft transaction for `text`, or `None` when no amount can be found.
    /// `fallback` is used when the text names no date.
    pub fn preview(
        &self,
        text: &str,
        selection: &Selection,
        fallback: NaiveDate,
        today: NaiveDate,
    ) -> Option<DraftTransaction> {
        let entities = self.extractor.extract(text);
        let amount = resolve_amount(text, &entities);
        let date = resolve_date(&entities, fallback, today);
        compose(amount, date, selection)
    }

    /// Suggestion for the last token of `text`
    pub fn suggest(&self, text: &str) -> Option<Suggestion> {
        SuggestionEngine::new(&self.vocabulary, &self.extractor).suggest_for(text)
    }

    /// Preview and suggestion together
    pub fn parse(
        &self,
        text: &str,
        selection: &Selection,
        fallback: NaiveDate,
        today: NaiveDate,
    ) -> Parsed {
        Parsed {
            draft: self.preview(text, selection, fallback, today),
            suggestion: self.suggest(text),
        }
    }
}

impl Default for TransactionParser {
    fn default() -> Self {
        Self::new(KnownVocabulary::default(), Lexicon::default())
    }
}
