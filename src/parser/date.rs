//! Date resolution

use chrono::NaiveDate;

use super::extract::Entity;

/// Resolve the transaction date: the first date entity that names a real
/// day, otherwise `fallback` unchanged
pub fn resolve_date(entities: &[Entity], fallback: NaiveDate, today: NaiveDate) -> NaiveDate {
    entities
        .iter()
        .filter(|e| e.matched.is_date())
        .find_map(|e| e.matched.resolve_date(today))
        .unwrap_or(fallback)
}
