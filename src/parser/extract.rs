//! Entity extraction
//!
//! Runs an ordered set of matchers over the token stream. Date matchers run
//! first and claim their tokens, so the day of "mar 11" never shows up as an
//! amount candidate; money and number matchers run over what is left.

use chrono::{Datelike, NaiveDate};

use super::lexicon::{Lexicon, RelativeDay, WordClass};
use super::tokenizer::{scale_numeric, tokenize, Token, TokenKind};
use crate::models::Money;

/// Result of running a matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    NoMatch,
    /// Digits with a currency marker and/or multiplier; carries the literal's sign
    Money(Money),
    /// A bare numeric literal; carries the literal's sign
    Number(Money),
    /// An absolute date; `year` is `None` when only month and day were typed
    Date { year: Option<i32>, month: u32, day: u32 },
    RelativeDate(RelativeDay),
}

impl Match {
    /// Resolve a date match to a calendar day. A missing year means the
    /// current year; `None` if that day does not exist (Feb 29 off leap years)
    pub fn resolve_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::Date { year, month, day } => {
                NaiveDate::from_ymd_opt(year.unwrap_or_else(|| today.year()), month, day)
            }
            Self::RelativeDate(relative) => Some(relative.resolve(today)),
            _ => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date { .. } | Self::RelativeDate(_))
    }
}

/// A match together with the byte range it covers in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub matched: Match,
    pub start: usize,
    pub end: usize,
}

/// Matcher over the token stream: given the tokens and a start index, return
/// the match and how many tokens it consumed
type Matcher = fn(&[Token<'_>], usize, &[bool]) -> (Match, usize);

const DATE_MATCHERS: &[Matcher] = &[match_month_day, match_iso_date, match_relative_date];
const AMOUNT_MATCHERS: &[Matcher] = &[match_money, match_number];

/// Entity extractor configured with a word-class dictionary
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    lexicon: Lexicon,
}

impl Extractor {
    /// Create an extractor using the given dictionary
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Tokenize `text` with this extractor's dictionary
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        tokenize(text, &self.lexicon)
    }

    /// Extract all entities from `text`, ordered by position
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let tokens = self.tokenize(text);
        let mut claimed = vec![false; tokens.len()];
        let mut entities = Vec::new();

        for matchers in [DATE_MATCHERS, AMOUNT_MATCHERS] {
            let mut i = 0;
            while i < tokens.len() {
                if claimed[i] {
                    i += 1;
                    continue;
                }
                let found = matchers.iter().find_map(|matcher| {
                    match matcher(&tokens, i, &claimed) {
                        (Match::NoMatch, _) => None,
                        (matched, consumed) => Some((matched, consumed.max(1))),
                    }
                });
                match found {
                    Some((matched, consumed)) => {
                        let last = (i + consumed).min(tokens.len()) - 1;
                        entities.push(Entity {
                            matched,
                            start: tokens[i].start,
                            end: tokens[last].end,
                        });
                        for flag in &mut claimed[i..=last] {
                            *flag = true;
                        }
                        i = last + 1;
                    }
                    None => i += 1,
                }
            }
        }

        entities.sort_by_key(|e| e.start);
        entities
    }

    /// Classify a single word on its own, without looking at neighbours
    pub fn match_word(&self, word: &str) -> Match {
        let tokens = self.tokenize(word);
        let [token] = tokens.as_slice() else {
            return Match::NoMatch;
        };
        match token.kind {
            TokenKind::Numeric(literal) if literal.is_money() => Match::Money(literal.value),
            TokenKind::Numeric(literal) => Match::Number(literal.value),
            TokenKind::IsoDate(date) => Match::Date {
                year: Some(date.year()),
                month: date.month(),
                day: date.day(),
            },
            TokenKind::Word(Some(WordClass::RelativeDate(day))) => Match::RelativeDate(day),
            _ => Match::NoMatch,
        }
    }
}

fn is_free(claimed: &[bool], i: usize) -> bool {
    !claimed.get(i).copied().unwrap_or(true)
}

/// `mar 11`, `march 11th`, `mar 11 2024`
fn match_month_day(tokens: &[Token<'_>], i: usize, claimed: &[bool]) -> (Match, usize) {
    let Some(WordClass::Month(month)) = tokens[i].word_class() else {
        return (Match::NoMatch, 0);
    };
    if !is_free(claimed, i + 1) {
        return (Match::NoMatch, 0);
    }
    let day = match tokens[i + 1].kind {
        TokenKind::Numeric(literal) => literal.plain_integer.filter(|d| *d <= 99),
        TokenKind::Ordinal(day) => Some(day),
        _ => None,
    };
    let Some(day) = day else {
        return (Match::NoMatch, 0);
    };

    // A trailing 4-digit number is only a year when some other number is
    // left to be the amount: "mar 11 2500" is a date and an amount
    let year = tokens
        .get(i + 2)
        .filter(|_| is_free(claimed, i + 2))
        .filter(|_| has_other_number(tokens, i..=i + 2, claimed))
        .and_then(|t| match t.kind {
            TokenKind::Numeric(literal) => literal.plain_integer.filter(|y| *y >= 1000),
            _ => None,
        })
        .and_then(|y| i32::try_from(y).ok())
        .filter(|y| NaiveDate::from_ymd_opt(*y, month, day).is_some());

    // Without a year, validate against a leap year so "feb 29" stays a date
    if NaiveDate::from_ymd_opt(year.unwrap_or(2000), month, day).is_none() {
        return (Match::NoMatch, 0);
    }

    let consumed = if year.is_some() { 3 } else { 2 };
    (Match::Date { year, month, day }, consumed)
}

fn has_other_number(
    tokens: &[Token<'_>],
    span: std::ops::RangeInclusive<usize>,
    claimed: &[bool],
) -> bool {
    tokens.iter().enumerate().any(|(j, t)| {
        !span.contains(&j) && is_free(claimed, j) && matches!(t.kind, TokenKind::Numeric(_))
    })
}

fn match_iso_date(tokens: &[Token<'_>], i: usize, _claimed: &[bool]) -> (Match, usize) {
    match tokens[i].kind {
        TokenKind::IsoDate(date) => (
            Match::Date {
                year: Some(date.year()),
                month: date.month(),
                day: date.day(),
            },
            1,
        ),
        _ => (Match::NoMatch, 0),
    }
}

fn match_relative_date(tokens: &[Token<'_>], i: usize, _claimed: &[bool]) -> (Match, usize) {
    match tokens[i].word_class() {
        Some(WordClass::RelativeDate(day)) => (Match::RelativeDate(day), 1),
        _ => (Match::NoMatch, 0),
    }
}

/// Digits carrying their own marker (`₱250`, `250k`), or digits next to a
/// currency word / multiplier token (`₱ 250`, `250 php`, `250 k php`)
fn match_money(tokens: &[Token<'_>], i: usize, claimed: &[bool]) -> (Match, usize) {
    let TokenKind::Numeric(literal) = tokens[i].kind else {
        return (Match::NoMatch, 0);
    };

    let mut value = literal.value;
    let mut money = literal.is_money();
    let mut consumed = 1;

    if i > 0 && is_free(claimed, i - 1) && tokens[i - 1].word_class() == Some(WordClass::Currency)
    {
        money = true;
    }

    if let Some(WordClass::Multiplier(factor)) = tokens
        .get(i + consumed)
        .filter(|_| is_free(claimed, i + consumed))
        .and_then(Token::word_class)
    {
        match scale_numeric(&tokens[i], factor) {
            Some(scaled) => {
                value = scaled;
                money = true;
                consumed += 1;
            }
            None => return (Match::NoMatch, 0),
        }
    }

    if tokens
        .get(i + consumed)
        .filter(|_| is_free(claimed, i + consumed))
        .and_then(Token::word_class)
        == Some(WordClass::Currency)
    {
        money = true;
        consumed += 1;
    }

    if money {
        (Match::Money(value), consumed)
    } else {
        (Match::NoMatch, 0)
    }
}

fn match_number(tokens: &[Token<'_>], i: usize, _claimed: &[bool]) -> (Match, usize) {
    match tokens[i].kind {
        TokenKind::Numeric(literal) => (Match::Number(literal.value), 1),
        _ => (Match::NoMatch, 0),
    }
}
