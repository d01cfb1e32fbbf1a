//! Translation completeness checks
//!
//! Compares a locale bundle against the canonical message bundle and
//! reports keys that are missing a translation or no longer used.

use crate::bundle::ArbBundle;
use serde_json::Value;

/// A single inconsistency between a locale bundle and the canonical bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// Key exists in the canonical bundle but has no (non-empty) translation
    Missing(String),
    /// Key exists in the locale bundle but not in the canonical bundle
    Unused(String),
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Compare a locale bundle against the canonical bundle
///
/// Metadata keys (`@`-prefixed, including the reserved timestamp key)
/// never participate. Missing keys are reported in canonical encounter
/// order, unused keys in the locale bundle's encounter order.
pub fn compare(canonical: &ArbBundle, other: &ArbBundle) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    for key in canonical.message_keys() {
        if is_blank(canonical.get(key)) {
            continue;
        }
        if is_blank(other.get(key)) {
            discrepancies.push(Discrepancy::Missing(key.to_string()));
        }
    }

    for key in other.message_keys() {
        if !canonical.contains_key(key) {
            discrepancies.push(Discrepancy::Unused(key.to_string()));
        }
    }

    discrepancies
}

/// Render discrepancies as one message per kind
///
/// All affected keys of a kind are joined by `; `, e.g.
/// `Translation string(s): foo; are missing`.
pub fn render_messages(discrepancies: &[Discrepancy]) -> Vec<String> {
    let missing: Vec<&str> = discrepancies
        .iter()
        .filter_map(|d| match d {
            Discrepancy::Missing(key) => Some(key.as_str()),
            Discrepancy::Unused(_) => None,
        })
        .collect();
    let unused: Vec<&str> = discrepancies
        .iter()
        .filter_map(|d| match d {
            Discrepancy::Unused(key) => Some(key.as_str()),
            Discrepancy::Missing(_) => None,
        })
        .collect();

    let mut messages = Vec::new();
    if !missing.is_empty() {
        messages.push(format!(
            "Translation string(s): {}; are missing",
            missing.join("; ")
        ));
    }
    if !unused.is_empty() {
        messages.push(format!(
            "Translation string(s): {}; are unused",
            unused.join("; ")
        ));
    }
    messages
}
