//! Tokenizer
//!
//! Splits input on whitespace, remembers byte positions, and tags each token
//! as a numeric literal, an ISO date, an ordinal day, or a (possibly
//! dictionary-classified) word.

use chrono::NaiveDate;

use super::lexicon::{Lexicon, WordClass};
use crate::models::Money;

/// Punctuation ignored at the end of a token ("250," or "tomorrow.")
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// A number as typed, with any attached currency marker or multiplier applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLiteral {
    /// Value after applying the multiplier, carrying the literal's own sign
    pub value: Money,
    /// A currency symbol or word was attached to the digits (`₱250`, `250php`)
    pub currency: bool,
    /// Multiplier applied from a suffix such as `k` (1 when absent)
    pub multiplier: i64,
    /// The digits as a small plain integer (no sign, separators, decimals or markers)
    pub plain_integer: Option<u32>,
}

impl NumericLiteral {
    /// Whether the literal on its own already reads as money
    pub fn is_money(&self) -> bool {
        self.currency || self.multiplier != 1
    }
}

/// What a token was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Numeric(NumericLiteral),
    /// `2024-03-11`
    IsoDate(NaiveDate),
    /// `11th`, `2nd`
    Ordinal(u32),
    /// Anything else, with its dictionary class if it has one
    Word(Option<WordClass>),
}

/// A whitespace-delimited token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token text without trailing punctuation
    pub text: &'a str,
    /// Byte offset of the token in the input
    pub start: usize,
    /// Byte offset one past the end of the raw token (punctuation included)
    pub end: usize,
    pub kind: TokenKind,
}

impl Token<'_> {
    /// Dictionary class, if this token is a classified word
    pub fn word_class(&self) -> Option<WordClass> {
        match self.kind {
            TokenKind::Word(class) => class,
            _ => None,
        }
    }
}

/// Split `text` into classified tokens
pub fn tokenize<'a>(text: &'a str, lexicon: &Lexicon) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut end = start;
        while let Some(&(i, ch)) = chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            end = i + ch.len_utf8();
            chars.next();
        }

        let raw = &text[start..end];
        let trimmed = raw.trim_end_matches(TRAILING_PUNCTUATION);
        // A token made only of punctuation is kept as-is
        let core = if trimmed.is_empty() { raw } else { trimmed };

        tokens.push(Token {
            text: core,
            start,
            end,
            kind: classify_token(core, lexicon),
        });
    }

    tokens
}

/// Classify a single token's text
pub fn classify_token(text: &str, lexicon: &Lexicon) -> TokenKind {
    if let Some(date) = parse_iso_date(text) {
        return TokenKind::IsoDate(date);
    }
    if let Some(day) = parse_ordinal(text) {
        return TokenKind::Ordinal(day);
    }
    if let Some(literal) = parse_numeric(text, lexicon) {
        return TokenKind::Numeric(literal);
    }
    TokenKind::Word(lexicon.classify(text))
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn parse_ordinal(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| lower.strip_suffix(suffix))?;
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse digits with an optional sign, leading currency symbol, and a suffix
/// made of an optional multiplier followed by an optional currency word
fn parse_numeric(text: &str, lexicon: &Lexicon) -> Option<NumericLiteral> {
    let (sign, rest) = match text.chars().next()? {
        c @ ('+' | '-') => (Some(c), &text[1..]),
        _ => (None, text),
    };

    let mut currency = false;
    let mut rest = rest;
    if let Some(c) = rest.chars().next() {
        if lexicon.is_currency_symbol(c) {
            currency = true;
            rest = &rest[c.len_utf8()..];
        }
    }

    let body_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(rest.len());
    let (body, suffix) = rest.split_at(body_len);
    if !body.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let (multiplier, suffix_currency) = parse_suffix(suffix, lexicon)?;
    currency |= suffix_currency;

    let magnitude = Money::parse_scaled(body, multiplier).ok()?;
    let value = if sign == Some('-') { -magnitude } else { magnitude };

    let plain_integer = if sign.is_none()
        && !currency
        && multiplier == 1
        && body.len() <= 4
        && body.chars().all(|c| c.is_ascii_digit())
    {
        body.parse().ok()
    } else {
        None
    };

    Some(NumericLiteral {
        value,
        currency,
        multiplier,
        plain_integer,
    })
}

/// Re-read a numeric token with a further multiplier taken from the next
/// token (`1.234 k`), keeping the fraction digits the multiplier shifts into
/// whole cents
pub fn scale_numeric(token: &Token<'_>, factor: i64) -> Option<Money> {
    let TokenKind::Numeric(literal) = token.kind else {
        return None;
    };
    let text = token.text;
    let start = text.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(rest.len());
    let factor = literal.multiplier.checked_mul(factor)?;
    let magnitude = Money::parse_scaled(&rest[..len], factor).ok()?;
    Some(if text.starts_with('-') { -magnitude } else { magnitude })
}

/// `""`, `"k"`, `"php"`, `"kphp"`, `"k₱"` → (multiplier, has currency)
fn parse_suffix(suffix: &str, lexicon: &Lexicon) -> Option<(i64, bool)> {
    if suffix.is_empty() {
        return Some((1, false));
    }
    match lexicon.classify(suffix) {
        Some(WordClass::Multiplier(factor)) => return Some((factor, false)),
        Some(WordClass::Currency) => return Some((1, true)),
        _ => {}
    }
    for (split, _) in suffix.char_indices().skip(1) {
        let (head, tail) = suffix.split_at(split);
        if let (Some(WordClass::Multiplier(factor)), Some(WordClass::Currency)) =
            (lexicon.classify(head), lexicon.classify(tail))
        {
            return Some((factor, true));
        }
    }
    None
}
