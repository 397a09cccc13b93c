//! Real-search strategy: one provider query, one record per result item.

use crate::backend::{SearchBackend, SearchItem, RESULTS_PER_QUERY};
use crate::signals::SnippetSignals;
use crate::types::{ProspectRecord, ProspectResult, SearchRequest, Segment};

/// Terms appended in deep-search mode to favour pages naming a contact.
const DECISION_MAKER_TERMS: [&str; 3] = ["Gerente", "Jefe", "Contacto"];

/// Build the provider query for a request.
pub fn build_query(request: &SearchRequest) -> String {
    let mut query = format!("\"{}\" \"{}\"", request.sector, request.location);
    if request.deep_search {
        let terms: Vec<String> = DECISION_MAKER_TERMS
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect();
        query.push_str(&format!(" ({})", terms.join(" OR ")));
    }
    query
}

/// Turn one search item into a prospect record.
pub fn record_from_item(item: &SearchItem, location: &str) -> ProspectRecord {
    let signals = SnippetSignals::scan(&item.snippet);
    let score = signals.score();

    ProspectRecord {
        tax_id: signals.tax_id,
        legal_name: item.title.clone(),
        display_name: item.title.clone(),
        segment: Segment::Unclassified,
        location: location.to_string(),
        source: item.display_link.clone(),
        contact_info: signals.contact,
        role_detected: signals.role,
        confidence_score: score,
    }
}

/// Query `backend` and build records. Any failure discards the whole attempt.
pub async fn search_real(
    backend: &dyn SearchBackend,
    request: &SearchRequest,
) -> ProspectResult<Vec<ProspectRecord>> {
    let query = build_query(request);
    tracing::debug!("Querying {} with: {query}", backend.name());

    let items = backend.search(&query, RESULTS_PER_QUERY).await?;

    Ok(items
        .iter()
        .map(|item| record_from_item(item, &request.location))
        .collect())
}
