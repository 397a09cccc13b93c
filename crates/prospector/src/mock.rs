//! Simulated strategy: randomized but schema-correct prospect batches.
//!
//! Used when no search credentials are configured or when the real search
//! fails, so the dashboard and exports behave the same regardless of where
//! the data came from. All randomness flows through the caller's [`Rng`],
//! which makes a seeded generator fully deterministic.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::types::{normalize_score, DecisionRole, ProspectRecord, SearchRequest, Segment, TaxId};

/// Reference companies across construction, manufacturing, transport,
/// mining, services, textiles, food and agro-industry.
pub const MOCK_COMPANIES: [&str; 14] = [
    "Constructora Los Andes",
    "Industrias Metálicas del Perú",
    "Transportes Rápidos Lima",
    "Servicios Generales SSOMA",
    "Manufactura Textil Avanzada",
    "Ingeniería y Construcción Total",
    "Logística Segura",
    "Alimentos Procesados del Norte",
    "Minera San Juan",
    "Agroindustria del Valle",
    "Tecnología y Seguridad",
    "Corporación Lindley",
    "Grupo Gloria",
    "Cementos Lima",
];

/// Display-name variations.
pub const NAME_SUFFIXES: [&str; 4] = ["", " & Asociados", " Group", " Perú"];

/// Legal-entity suffix appended to form the registered name.
pub const LEGAL_SUFFIX: &str = " S.A.C.";

pub const ZONES: [&str; 3] = ["Zona Industrial", "Cercado", "Parque Industrial"];

pub const SOURCES: [&str; 4] = ["DatosPerú", "LinkedIn", "UniversidadPerú", "Paginas Amarillas"];

/// Local parts for synthesized corporate emails.
pub const EMAIL_LOCAL_PARTS: [&str; 3] = ["gerencia", "contacto", "admin"];

/// Marker appended to the source of deep-enriched records.
pub const ENRICHMENT_MARKER: &str = " + Web Scraping";

/// Tokens removed from a company name to build its email domain.
const SLUG_STRIP: [&str; 6] = ["s.a.c.", "sac", "group", "perú", "&", " "];

const BATCH_SIZE: RangeInclusive<usize> = 8..=15;
const DEEP_BATCH_SIZE: RangeInclusive<usize> = 12..=20;
const BASE_SCORE: RangeInclusive<f64> = 0.4..=0.7;
const ENRICHED_SCORE: RangeInclusive<f64> = 0.85..=0.99;

/// Probability thresholds: enrichment fires on `random() > 0.2`, a phone
/// number is added on `random() > 0.5`.
const ENRICH_THRESHOLD: f64 = 0.2;
const PHONE_THRESHOLD: f64 = 0.5;

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Email domain derived from a company name.
pub fn email_slug(company: &str) -> String {
    SLUG_STRIP
        .iter()
        .fold(company.to_lowercase(), |name, token| name.replace(token, ""))
}

/// Generator of simulated prospect batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockGenerator;

impl MockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Batch size range for a request.
    pub fn batch_range(deep_search: bool) -> RangeInclusive<usize> {
        if deep_search {
            DEEP_BATCH_SIZE
        } else {
            BATCH_SIZE
        }
    }

    /// Generate one batch, in generation order (unsorted).
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        request: &SearchRequest,
    ) -> Vec<ProspectRecord> {
        let count = rng.gen_range(Self::batch_range(request.deep_search));
        tracing::debug!(
            "Simulating {count} prospects for {:?} in {:?} (deep: {})",
            request.sector,
            request.location,
            request.deep_search
        );

        (0..count)
            .map(|_| self.generate_one(rng, request))
            .collect()
    }

    fn generate_one<R: Rng + ?Sized>(&self, rng: &mut R, request: &SearchRequest) -> ProspectRecord {
        let base = pick(rng, &MOCK_COMPANIES);
        let suffix = pick(rng, &NAME_SUFFIXES);
        let display_name = format!("{base}{suffix}");
        let legal_name = format!("{display_name}{LEGAL_SUFFIX}");

        let tax_id = TaxId::parse(&format!("20{:09}", rng.gen_range(0..1_000_000_000u32)));
        let segment = *pick(rng, &Segment::CLASSIFIED);
        let location = format!("{} - {}", request.location, pick(rng, &ZONES));
        let mut source = pick(rng, &SOURCES).to_string();
        let mut confidence_score = normalize_score(rng.gen_range(BASE_SCORE));

        let mut contact_info = None;
        let mut role_detected = None;

        if request.deep_search && rng.gen::<f64>() > ENRICH_THRESHOLD {
            role_detected = Some(*pick(rng, &DecisionRole::ALL));

            let local = pick(rng, &EMAIL_LOCAL_PARTS);
            let mut contact = format!("{local}@{}.com", email_slug(&display_name));
            if rng.gen::<f64>() > PHONE_THRESHOLD {
                contact.push_str(&format!(
                    " | 9{} {} {}",
                    rng.gen_range(10..=99),
                    rng.gen_range(100..=999),
                    rng.gen_range(100..=999)
                ));
            }
            contact_info = Some(contact);

            confidence_score = normalize_score(rng.gen_range(ENRICHED_SCORE));
            source.push_str(ENRICHMENT_MARKER);
        }

        ProspectRecord {
            tax_id,
            legal_name,
            display_name,
            segment,
            location,
            source,
            contact_info,
            role_detected,
            confidence_score,
        }
    }
}
