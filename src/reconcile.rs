//! Recommendation Reconciler: turns the gateway's untrusted label into a
//! guaranteed-valid category selection.

use std::str::FromStr;

use serde::Serialize;

use crate::models::Category;
use crate::selection::SelectionState;

/// Category chosen whenever the label is not one of the seven.
pub const DEFAULT_RECOMMENDATION: Category = Category::Physician;

/// Outcome of validating a raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "label", rename_all = "snake_case")]
pub enum LabelVerdict {
    Valid(Category),
    Invalid(String),
}

impl LabelVerdict {
    /// The category to select: the label itself, or the default.
    pub fn resolve(&self) -> Category {
        match self {
            Self::Valid(category) => *category,
            Self::Invalid(_) => DEFAULT_RECOMMENDATION,
        }
    }
}

/// Strip surrounding whitespace, quotes and trailing sentence punctuation.
/// Case is left alone: matching stays exact.
pub fn normalize_label(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\''))
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '.' | ','))
}

/// Classify a raw label. `All` is never a valid recommendation.
pub fn validate_label(raw: &str) -> LabelVerdict {
    match Category::from_str(normalize_label(raw)) {
        Ok(category) if !category.is_sentinel() => LabelVerdict::Valid(category),
        _ => LabelVerdict::Invalid(raw.to_string()),
    }
}

/// Apply a raw label to the selection and return the category chosen.
pub fn reconcile(state: &mut SelectionState, raw: &str) -> Category {
    let verdict = validate_label(raw);
    if let LabelVerdict::Invalid(label) = &verdict {
        tracing::info!(label = %label, "Unrecognised recommendation, using default category");
    }
    let category = verdict.resolve();
    state.select_category(category);
    category
}
