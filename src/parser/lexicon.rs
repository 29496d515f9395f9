//! Word-class dictionary
//!
//! Before any pattern runs, words are tagged with a class: a month name, a
//! relative-date keyword, a value multiplier (`k`), or a currency marker.
//! The dictionary is a plain value handed to the extractor, so callers can
//! extend it (extra currency words from settings) without shared state.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

/// A relative-date keyword, resolved against "today" at parse time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeDay {
    Yesterday,
    Today,
    Tomorrow,
}

impl RelativeDay {
    /// Offset from today in days
    pub fn offset_days(self) -> i64 {
        match self {
            Self::Yesterday => -1,
            Self::Today => 0,
            Self::Tomorrow => 1,
        }
    }

    /// Resolve against the given current date
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(self.offset_days())
    }
}

/// Class assigned to a dictionary word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    /// Month name or abbreviation, 1-based
    Month(u32),
    /// today / tomorrow / yesterday and their short forms
    RelativeDate(RelativeDay),
    /// Value multiplier suffix such as `k` (×1000)
    Multiplier(i64),
    /// Currency word or symbol (`php`, `p`, `₱`, ...)
    Currency,
}

const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("january", 1),
    ("feb", 2),
    ("february", 2),
    ("mar", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("jun", 6),
    ("june", 6),
    ("jul", 7),
    ("july", 7),
    ("aug", 8),
    ("august", 8),
    ("sep", 9),
    ("sept", 9),
    ("september", 9),
    ("oct", 10),
    ("october", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
];

const RELATIVE_DAYS: &[(&str, RelativeDay)] = &[
    ("today", RelativeDay::Today),
    ("t", RelativeDay::Today),
    ("tomorrow", RelativeDay::Tomorrow),
    ("tm", RelativeDay::Tomorrow),
    ("yesterday", RelativeDay::Yesterday),
    ("y", RelativeDay::Yesterday),
];

const CURRENCIES: &[&str] = &["peso", "pesos", "p", "php", "₱", "$"];

/// Word-class dictionary used by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    words: HashMap<String, WordClass>,
}

impl Lexicon {
    /// Create a dictionary with no words at all
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Register a word (stored lowercased); a later registration wins
    pub fn add_word(&mut self, word: &str, class: WordClass) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() {
            self.words.insert(word, class);
        }
    }

    /// Register an additional currency word or symbol
    pub fn add_currency(&mut self, word: &str) {
        self.add_word(word, WordClass::Currency);
    }

    /// Look up the class of a word (case-insensitive)
    pub fn classify(&self, word: &str) -> Option<WordClass> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Whether a single character is registered as a currency symbol
    pub fn is_currency_symbol(&self, c: char) -> bool {
        !c.is_alphanumeric()
            && self.classify(c.encode_utf8(&mut [0; 4])) == Some(WordClass::Currency)
    }

    /// The relative-date keywords, in dictionary order
    pub fn relative_keywords() -> impl Iterator<Item = &'static str> {
        RELATIVE_DAYS.iter().map(|(word, _)| *word)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut lexicon = Self::empty();
        for (word, month) in MONTHS {
            lexicon.add_word(word, WordClass::Month(*month));
        }
        for (word, day) in RELATIVE_DAYS {
            lexicon.add_word(word, WordClass::RelativeDate(*day));
        }
        lexicon.add_word("k", WordClass::Multiplier(1000));
        for word in CURRENCIES {
            lexicon.add_currency(word);
        }
        lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classes() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.classify("Mar"), Some(WordClass::Month(3)));
        assert_eq!(lexicon.classify("sept"), Some(WordClass::Month(9)));
        assert_eq!(
            lexicon.classify("TM"),
            Some(WordClass::RelativeDate(RelativeDay::Tomorrow))
        );
        assert_eq!(lexicon.classify("K"), Some(WordClass::Multiplier(1000)));
        assert_eq!(lexicon.classify("PHP"), Some(WordClass::Currency));
        assert_eq!(lexicon.classify("jollibee"), None);
    }

    #[test]
    fn test_currency_symbols() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_currency_symbol('₱'));
        assert!(lexicon.is_currency_symbol('$'));
        // "p" is a currency word but not a symbol prefix
        assert!(!lexicon.is_currency_symbol('p'));
        assert!(!lexicon.is_currency_symbol('€'));
    }

    #[test]
    fn test_extension_is_per_instance() {
        let mut custom = Lexicon::default();
        custom.add_currency("€");
        custom.add_currency("usd");

        assert!(custom.is_currency_symbol('€'));
        assert_eq!(custom.classify("USD"), Some(WordClass::Currency));
        assert_eq!(Lexicon::default().classify("usd"), None);
    }

    #[test]
    fn test_relative_day_resolution() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            RelativeDay::Yesterday.resolve(today),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(RelativeDay::Today.resolve(today), today);
        assert_eq!(
            RelativeDay::Tomorrow.resolve(today),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }
}
