//! Word-selection lookup.
//! Resolves a single selected token to its counterpart term, in either
//! direction, against an immutable dictionary snapshot.

use serde::{Deserialize, Serialize};

use crate::dict::Dictionary;

/// Which pane the selected token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Dialect pane: dialect term -> standard term.
    Forward,
    /// Standard pane: standard term -> dialect term.
    Reverse,
}

/// Outcome of a selection lookup. Tagged so callers never compare
/// against a sentinel string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Found { term: String },
    NotFound,
}

/// Look up a selected token.
///
/// The token is trimmed and case-folded first. Reverse lookups scan the
/// entries in substitution order, so when several dialect keys share a
/// standard term the first key in that order wins; the choice is
/// deterministic but otherwise arbitrary.
pub fn resolve(token: &str, direction: Direction, dict: &Dictionary) -> Resolution {
    let folded = token.trim().to_lowercase();
    if folded.is_empty() {
        return Resolution::NotFound;
    }
    match direction {
        Direction::Forward => match dict.get(&folded) {
            Some(standard) => Resolution::Found {
                term: standard.to_string(),
            },
            None => Resolution::NotFound,
        },
        Direction::Reverse => dict
            .entries()
            .iter()
            .find(|e| e.standard.to_lowercase() == folded)
            .map_or(Resolution::NotFound, |e| Resolution::Found {
                term: e.dialect.clone(),
            }),
    }
}
