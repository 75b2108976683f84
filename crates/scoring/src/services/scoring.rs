//! Oral-marks scoring engine.
//!
//! Pure functions over [`ScoreEntry`] snapshots. Every operation returns a new
//! value; callers replace the state they hold with the result. None of these
//! functions fail: malformed numeric input is rejected by leaving the entry
//! unchanged, and totals read malformed values as zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::{Criterion, CriterionScores, OVERALL_COMMENTS, PreparedScores, ScoreEntry};

/// Cleared sheet: every criterion and the comment set to the empty string.
pub fn initialize_scores() -> ScoreEntry {
    ScoreEntry::new()
}

/// Applies one field edit.
///
/// - `overall_comments` and fields outside the rubric are stored verbatim.
/// - An empty value clears the criterion (it does not become zero).
/// - A numeric value is clamped into `[0, max]`. Input that is already in
///   range is kept as typed, so `"7.50"` survives mid-edit. Magnitudes a
///   decimal cannot hold (`1e30`, `inf`) clamp like any other number.
/// - Anything else is rejected and the entry is returned unchanged.
pub fn set_score(entry: &ScoreEntry, field: &str, raw: &str) -> ScoreEntry {
    let mut next = entry.clone();

    if field == OVERALL_COMMENTS {
        next.set_comments(raw.to_string());
        return next;
    }

    let Some(criterion) = Criterion::from_id(field) else {
        next.set_extra(field.to_string(), raw.to_string());
        return next;
    };

    if raw.is_empty() {
        next.set_raw(criterion, String::new());
        return next;
    }

    let stored = match parse_score(raw) {
        Some(value) => {
            let clamped = clamp_score(criterion, value);
            if clamped == value {
                raw.trim().to_string()
            } else {
                clamped.normalize().to_string()
            }
        }
        None => match clamp_oversized(criterion, raw) {
            Some(clamped) => clamped.normalize().to_string(),
            None => return next,
        },
    };
    next.set_raw(criterion, stored);
    next
}

/// Value a typed score lands on for `criterion`, or `None` when the input is
/// not a number and would be ignored.
pub fn clamped_score(criterion: Criterion, raw: &str) -> Option<Decimal> {
    match parse_score(raw) {
        Some(value) => Some(clamp_score(criterion, value)),
        None => clamp_oversized(criterion, raw),
    }
}

/// Clamps numeric input outside the decimal range through a float parse.
/// NaN is not a number for scoring purposes.
fn clamp_oversized(criterion: Criterion, raw: &str) -> Option<Decimal> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_nan() {
        return None;
    }

    if value <= 0.0 {
        Some(Decimal::ZERO)
    } else if value >= f64::from(criterion.max_points()) {
        Some(criterion.max_score())
    } else {
        Decimal::from_f64(value).map(|v| clamp_score(criterion, v))
    }
}

/// Sum of the seven criteria; empty or malformed values count as zero.
pub fn compute_total(entry: &ScoreEntry) -> Decimal {
    Criterion::ALL
        .iter()
        .map(|c| parse_score(entry.score(*c)).unwrap_or(Decimal::ZERO))
        .sum()
}

/// Normalizes a sheet for persistence: cleared criteria become zero and the
/// comment passes through untouched, including when it is empty.
pub fn prepare_submission(entry: &ScoreEntry) -> PreparedScores {
    let mut scores = CriterionScores::default();
    for criterion in Criterion::ALL {
        let value = parse_score(entry.score(criterion)).unwrap_or(Decimal::ZERO);
        scores.set(criterion, value);
    }

    PreparedScores {
        scores,
        overall_comments: entry.overall_comments().to_string(),
    }
}

/// Inclusive clamp into the criterion's range.
pub fn clamp_score(criterion: Criterion, value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, criterion.max_score())
}

/// Parses a typed score. Plain and scientific notation are accepted;
/// surrounding whitespace is ignored.
pub fn parse_score(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
