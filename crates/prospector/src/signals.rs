//! Signal extraction from search-result snippets.
//!
//! Three signals are read from free text: a RUC-shaped tax identifier, the
//! first email-looking token, and the first decision-maker role mentioned.
//! Each detected signal moves the confidence score of the resulting record.
//!
//! # Confidence model
//!
//! Real results start at [`BASE_SCORE`]. A tax identifier adds
//! [`TAX_ID_BOOST`]. A decision-maker role adds [`ROLE_BOOST`] on top of the
//! running value and guarantees at least [`ROLE_FLOOR`]. Every boost is capped
//! at [`MAX_BOOSTED_SCORE`].

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{normalize_score, DecisionRole, TaxId, MAX_BOOSTED_SCORE};

/// Starting confidence for a record built from a real search result.
pub const BASE_SCORE: f64 = 0.8;

/// Added when a tax identifier is present in the snippet.
pub const TAX_ID_BOOST: f64 = 0.1;

/// Added when a decision-maker role is present in the snippet.
pub const ROLE_BOOST: f64 = 0.15;

/// Minimum confidence of a record with a detected role.
pub const ROLE_FLOOR: f64 = 0.95;

fn tax_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(?:10|20)[0-9]{9}\b").expect("tax id regex is valid"))
}

/// Everything detected in one snippet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetSignals {
    pub tax_id: Option<TaxId>,
    pub contact: Option<String>,
    pub role: Option<DecisionRole>,
}

impl SnippetSignals {
    /// Scan a snippet. Matching is case-insensitive.
    pub fn scan(snippet: &str) -> Self {
        let folded = snippet.to_lowercase();
        Self {
            tax_id: find_tax_id(&folded),
            contact: find_email(&folded),
            role: find_role(&folded),
        }
    }

    /// Confidence of a record carrying these signals.
    pub fn score(&self) -> f64 {
        let mut score = BASE_SCORE;
        if self.tax_id.is_some() {
            score = (score + TAX_ID_BOOST).min(MAX_BOOSTED_SCORE);
        }
        if self.role.is_some() {
            score = (score + ROLE_BOOST).min(MAX_BOOSTED_SCORE).max(ROLE_FLOOR);
        }
        normalize_score(score)
    }
}

/// First RUC-shaped token anywhere in the text.
pub fn find_tax_id(text: &str) -> Option<TaxId> {
    tax_id_pattern()
        .find_iter(text)
        .find_map(|m| TaxId::parse(m.as_str()))
}

/// First whitespace-separated token containing `@`, without wrapping punctuation.
pub fn find_email(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|word| word.contains('@'))
        .map(|word| {
            word.trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '(' | ')' | '<' | '>'))
                .to_string()
        })
        .filter(|word| !word.is_empty())
}

/// First role, in enumeration order, whose label occurs in the text.
///
/// Expects lower-cased input, as produced by [`SnippetSignals::scan`].
pub fn find_role(folded: &str) -> Option<DecisionRole> {
    DecisionRole::ALL
        .into_iter()
        .find(|role| folded.contains(&role.label().to_lowercase()))
}
