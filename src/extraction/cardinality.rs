//! Cardinality tokens: `n`, `a..b`, `a..N`.
//!
//! `*` is accepted wherever `N` is, and a bare `N` means "any number"
//! (`0..N`).

use crate::error::LineError;
use crate::model::descriptor::CardinalityRange;

fn is_unbounded(bound: &str) -> bool {
    bound == "N" || bound == "*"
}

/// Parse a count made only of ASCII digits (no sign, no whitespace).
fn parse_count(bound: &str) -> Option<u32> {
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    bound.parse().ok()
}

/// Resolve the text between `-[` and `]->` into a [`CardinalityRange`].
///
/// `property` is only used to label the error.
pub fn resolve(token: &str, property: &str) -> Result<CardinalityRange, LineError> {
    let invalid = |reason: String| LineError::InvalidCardinality {
        token: token.to_string(),
        property: property.to_string(),
        reason,
    };

    let token = token.trim();
    if is_unbounded(token) {
        return Ok(CardinalityRange::at_least(0));
    }

    match token.split_once("..") {
        Some((lower, upper)) => {
            let min = parse_count(lower.trim()).ok_or_else(|| {
                invalid(format!("lower bound '{lower}' is not a non-negative integer"))
            })?;
            let upper = upper.trim();
            if is_unbounded(upper) {
                return Ok(CardinalityRange::at_least(min));
            }
            let max = parse_count(upper).ok_or_else(|| {
                invalid(format!(
                    "upper bound '{upper}' is neither a non-negative integer nor N"
                ))
            })?;
            if min > max {
                return Err(invalid(format!("minimum {min} exceeds maximum {max}")));
            }
            Ok(CardinalityRange {
                min,
                max: Some(max),
            })
        }
        None => parse_count(token)
            .map(CardinalityRange::exactly)
            .ok_or_else(|| invalid(format!("'{token}' is not a non-negative integer"))),
    }
}
