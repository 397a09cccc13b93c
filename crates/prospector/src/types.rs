//! Core data types for prospect records and search requests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound applied whenever a signal raises a score.
pub const MAX_BOOSTED_SCORE: f64 = 0.99;

/// Parameters of one prospect search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub sector: String,
    pub location: String,
    #[serde(default)]
    pub deep_search: bool,
}

impl SearchRequest {
    pub fn new(sector: impl Into<String>, location: impl Into<String>, deep_search: bool) -> Self {
        Self {
            sector: sector.into(),
            location: location.into(),
            deep_search,
        }
    }
}

/// A prospective client surfaced by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectRecord {
    pub tax_id: Option<TaxId>,
    pub legal_name: String,
    pub display_name: String,
    pub segment: Segment,
    pub location: String,
    pub source: String,
    pub contact_info: Option<String>,
    pub role_detected: Option<DecisionRole>,
    pub confidence_score: f64,
}

/// An 11-digit tax identifier (RUC) with a `10` or `20` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Total length, prefix included.
    pub const LEN: usize = 11;

    /// Prefixes accepted for natural persons (`10`) and companies (`20`).
    pub const PREFIXES: [&'static str; 2] = ["10", "20"];

    /// Validate a candidate token.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == Self::LEN
            && raw.bytes().all(|b| b.is_ascii_digit())
            && Self::PREFIXES.iter().any(|p| raw.starts_with(p));
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaxId {
    type Error = ProspectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ProspectError::InvalidTaxId(value))
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> Self {
        id.0
    }
}

/// Coarse company size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Micro and small enterprises.
    #[serde(rename = "MYPE")]
    Mype,
    /// Small and medium enterprises.
    #[serde(rename = "PYME")]
    Pyme,
    #[serde(rename = "Corporativo")]
    Corporate,
    /// Placeholder for results with no size signal.
    #[serde(rename = "Sin clasificar")]
    Unclassified,
}

impl Segment {
    /// Buckets the simulated strategy draws from.
    pub const CLASSIFIED: [Segment; 3] = [Segment::Mype, Segment::Pyme, Segment::Corporate];

    pub fn label(self) -> &'static str {
        match self {
            Segment::Mype => "MYPE",
            Segment::Pyme => "PYME",
            Segment::Corporate => "Corporativo",
            Segment::Unclassified => "Sin clasificar",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision-maker roles recognised in search snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionRole {
    #[serde(rename = "Gerente General")]
    GeneralManager,
    #[serde(rename = "Jefe de SSOMA")]
    SafetyLead,
    #[serde(rename = "Administrador")]
    Administrator,
    #[serde(rename = "Dueño")]
    Owner,
    #[serde(rename = "CEO")]
    Ceo,
    #[serde(rename = "Fundador")]
    Founder,
    #[serde(rename = "Líder de Operaciones")]
    OperationsLead,
    #[serde(rename = "Gerente de Planta")]
    PlantManager,
}

impl DecisionRole {
    /// All roles in matching order; the first hit in a snippet wins.
    pub const ALL: [DecisionRole; 8] = [
        DecisionRole::GeneralManager,
        DecisionRole::SafetyLead,
        DecisionRole::Administrator,
        DecisionRole::Owner,
        DecisionRole::Ceo,
        DecisionRole::Founder,
        DecisionRole::OperationsLead,
        DecisionRole::PlantManager,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DecisionRole::GeneralManager => "Gerente General",
            DecisionRole::SafetyLead => "Jefe de SSOMA",
            DecisionRole::Administrator => "Administrador",
            DecisionRole::Owner => "Dueño",
            DecisionRole::Ceo => "CEO",
            DecisionRole::Founder => "Fundador",
            DecisionRole::OperationsLead => "Líder de Operaciones",
            DecisionRole::PlantManager => "Gerente de Planta",
        }
    }
}

impl fmt::Display for DecisionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round a score to two decimals and keep it inside `[0, 1]`.
pub fn normalize_score(score: f64) -> f64 {
    ((score * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

/// Stable sort by confidence, highest first.
pub fn sort_by_confidence(records: &mut [ProspectRecord]) {
    records.sort_by(|a, b| {
        b.confidence_score
            .partial_cmp(&a.confidence_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Errors that can occur in the prospect engine.
#[derive(thiserror::Error, Debug)]
pub enum ProspectError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Invalid tax id: {0}")]
    InvalidTaxId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type ProspectResult<T> = Result<T, ProspectError>;
