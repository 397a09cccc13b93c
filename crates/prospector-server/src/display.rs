//! Terminal dashboard: status line, headline metrics, result table and detail panel.

use std::fmt::Write;

use prospector::{DataSource, ProspectRecord, SearchReport, SearchSummary};

/// Width of the confidence bar, in cells.
const BAR_WIDTH: usize = 10;

const COMPANY_WIDTH: usize = 38;
const LOCATION_WIDTH: usize = 30;
const ROLE_WIDTH: usize = 22;

/// Confidence rendered as a bar plus its value, e.g. `███████░░░ 0.72`.
pub fn confidence_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "{}{} {score:.2}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(BAR_WIDTH - filled)
    )
}

/// Pad or cut `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text}{}", " ".repeat(width - len))
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('\u{2026}');
        cut
    }
}

/// One line describing where the data came from.
pub fn render_status(report: &SearchReport, last_error: Option<&str>) -> String {
    match &report.data_source {
        DataSource::RealApi => "\u{25cf} Search API connected".to_string(),
        DataSource::Simulated => {
            "\u{25cb} Demo mode (simulated data). Set GOOGLE_API_KEY and GOOGLE_CSE_ID for real data."
                .to_string()
        }
        DataSource::Fallback { error } => {
            format!(
                "\u{25cb} Demo mode (simulated data). API error: {}",
                last_error.unwrap_or(error)
            )
        }
    }
}

pub fn render_summary(summary: &SearchSummary) -> String {
    format!(
        "Prospects found: {}   High confidence: {}   Direct contacts: {}",
        summary.prospects, summary.high_confidence, summary.direct_contacts
    )
}

/// Result table, one row per record, numbered from 1.
pub fn render_table(records: &[ProspectRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {}  {}  {}  {}  Source",
        "#",
        fit("Company", COMPANY_WIDTH),
        fit("Location", LOCATION_WIDTH),
        fit("Role", ROLE_WIDTH),
        fit("Confidence", BAR_WIDTH + 5),
    );
    for (i, r) in records.iter().enumerate() {
        let role = r.role_detected.map(|role| role.label()).unwrap_or("-");
        let _ = writeln!(
            out,
            "{:>3}  {}  {}  {}  {}  {}",
            i + 1,
            fit(&r.display_name, COMPANY_WIDTH),
            fit(&r.location, LOCATION_WIDTH),
            fit(role, ROLE_WIDTH),
            confidence_bar(r.confidence_score),
            r.source
        );
    }
    out
}

/// Record shown for a 1-based table row, if the row exists.
pub fn select_row(records: &[ProspectRecord], row: usize) -> Option<&ProspectRecord> {
    row.checked_sub(1).and_then(|i| records.get(i))
}

/// Detail panel for one record.
pub fn render_detail(record: &ProspectRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.display_name);
    let _ = writeln!(out, "  Legal name: {}", record.legal_name);
    let _ = writeln!(
        out,
        "  RUC:        {}",
        record
            .tax_id
            .as_ref()
            .map(|t| t.as_str())
            .unwrap_or("Not available")
    );
    let _ = writeln!(out, "  Segment:    {}", record.segment);
    let _ = writeln!(out, "  Location:   {}", record.location);
    let _ = writeln!(out, "  Source:     {}", record.source);
    let _ = writeln!(out, "  Contact");
    let _ = writeln!(
        out,
        "    Role:     {}",
        record
            .role_detected
            .map(|r| r.label())
            .unwrap_or("Not detected")
    );
    let _ = writeln!(
        out,
        "    Contact:  {}",
        record.contact_info.as_deref().unwrap_or("Not available")
    );
    let _ = writeln!(out, "  Confidence: {}", confidence_bar(record.confidence_score));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospector::{DecisionRole, Segment, TaxId};

    fn record() -> ProspectRecord {
        ProspectRecord {
            tax_id: TaxId::parse("20123456789"),
            legal_name: "Cementos Lima Perú S.A.C.".into(),
            display_name: "Cementos Lima Perú".into(),
            segment: Segment::Pyme,
            location: "Lima - Cercado".into(),
            source: "DatosPerú + Web Scraping".into(),
            contact_info: Some("admin@cementoslima.com".into()),
            role_detected: Some(DecisionRole::PlantManager),
            confidence_score: 0.93,
        }
    }

    #[test]
    fn test_confidence_bar() {
        assert_eq!(confidence_bar(0.0), format!("{} 0.00", "\u{2591}".repeat(10)));
        assert_eq!(confidence_bar(1.0), format!("{} 1.00", "\u{2588}".repeat(10)));
        let half = confidence_bar(0.52);
        assert_eq!(half.chars().filter(|c| *c == '\u{2588}').count(), 5);
        assert!(half.ends_with("0.52"));
    }

    #[test]
    fn test_fit_counts_chars_not_bytes() {
        assert_eq!(fit("Perú", 6), "Perú  ");
        assert_eq!(fit("Industrias Metálicas", 8).chars().count(), 8);
        assert!(fit("Industrias Metálicas", 8).ends_with('\u{2026}'));
    }

    #[test]
    fn test_table_rows() {
        let table = render_table(&[record(), record()]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Company"));
        assert!(lines[1].trim_start().starts_with("1  Cementos Lima Perú"));
        assert!(lines[2].contains("Gerente de Planta"));
    }

    #[test]
    fn test_select_row_is_one_based() {
        let mut second = record();
        second.display_name = "Segunda".into();
        let records = [record(), second];

        assert_eq!(select_row(&records, 1).unwrap().display_name, "Cementos Lima Perú");
        assert_eq!(select_row(&records, 2).unwrap().display_name, "Segunda");
        assert!(select_row(&records, 0).is_none());
        assert!(select_row(&records, 3).is_none());
        assert!(select_row(&[], 1).is_none());
    }

    #[test]
    fn test_detail_panel() {
        let detail = render_detail(&record());
        assert!(detail.contains("RUC:        20123456789"));
        assert!(detail.contains("admin@cementoslima.com"));
        assert!(detail.contains("Segment:    PYME"));
    }

    #[test]
    fn test_status_lines() {
        let simulated = SearchReport {
            records: Vec::new(),
            data_source: DataSource::Simulated,
        };
        assert!(render_status(&simulated, None).contains("Demo mode"));

        let fallback = SearchReport {
            records: Vec::new(),
            data_source: DataSource::Fallback {
                error: "quota".into(),
            },
        };
        assert!(render_status(&fallback, None).ends_with("API error: quota"));
    }
}
