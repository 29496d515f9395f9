//! Amount resolution
//!
//! Picks the amount out of the extracted entities and applies the sign rule:
//! everything is an outflow unless the input starts with `+`.

use super::extract::{Entity, Match};
use crate::models::Money;

/// Whether the input is marked as an inflow (leading `+`)
pub fn is_inflow(text: &str) -> bool {
    text.trim_start().starts_with('+')
}

/// Resolve the signed amount for `text`
///
/// The first money span wins over the first bare number. The literal's own
/// sign is ignored: `-250` is an outflow like `250`, `+ -250` an inflow. A zero
/// amount is no amount.
pub fn resolve_amount(text: &str, entities: &[Entity]) -> Option<Money> {
    let literal = entities
        .iter()
        .find_map(|e| match e.matched {
            Match::Money(value) => Some(value),
            _ => None,
        })
        .or_else(|| {
            entities.iter().find_map(|e| match e.matched {
                Match::Number(value) => Some(value),
                _ => None,
            })
        })?;

    let magnitude = literal.abs();
    if magnitude.is_zero() {
        return None;
    }

    Some(if is_inflow(text) { magnitude } else { -magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Extractor;

    fn amount(text: &str) -> Option<Money> {
        resolve_amount(text, &Extractor::default().extract(text))
    }

    #[test]
    fn test_bare_number_is_outflow() {
        assert_eq!(amount("250 jollibee lunch"), Some(Money::from_units(-250)));
        assert_eq!(amount("lunch 99.50"), Some(Money::from_cents(-9950)));
    }

    #[test]
    fn test_plus_marks_inflow() {
        assert_eq!(amount("+50000 salary"), Some(Money::from_units(50_000)));
        assert_eq!(amount("  +250"), Some(Money::from_units(250)));
        assert_eq!(amount("+ 250 refund"), Some(Money::from_units(250)));
        assert_eq!(amount("+ -250"), Some(Money::from_units(250)));
    }

    #[test]
    fn test_minus_is_still_outflow() {
        assert_eq!(amount("-250 taxi"), Some(Money::from_units(-250)));
    }

    #[test]
    fn test_plus_must_lead() {
        assert_eq!(amount("refund +250"), Some(Money::from_units(-250)));
    }

    #[test]
    fn test_k_multiplier() {
        assert_eq!(amount("250k car"), Some(Money::from_units(-250_000)));
        assert_eq!(amount("+1.5k bonus"), Some(Money::from_units(1_500)));
    }

    #[test]
    fn test_money_span_beats_earlier_number() {
        assert_eq!(amount("2 coffees ₱180"), Some(Money::from_units(-180)));
        assert_eq!(amount("3 items 450 php"), Some(Money::from_units(-450)));
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(amount("120 then 80"), Some(Money::from_units(-120)));
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(amount(""), None);
        assert_eq!(amount("lunch tomorrow"), None);
        assert_eq!(amount("0 lunch"), None);
        assert_eq!(amount("+0.00"), None);
        assert_eq!(amount("mar 11"), None);
    }
}
