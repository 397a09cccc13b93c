//! CSV export and summary metrics for prospect lists.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::types::{ProspectRecord, ProspectResult};

/// Header row of the CSV export, in column order.
pub const CSV_HEADERS: [&str; 9] = [
    "tax_id",
    "legal_name",
    "display_name",
    "segment",
    "location",
    "source",
    "contact_info",
    "role_detected",
    "confidence_score",
];

/// Default download name used by the front ends.
pub const EXPORT_FILENAME: &str = "prospectos_ssoma.csv";

/// Scores above this count as high confidence.
pub const HIGH_CONFIDENCE: f64 = 0.8;

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write one CSV row.
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

fn record_row(record: &ProspectRecord) -> [String; 9] {
    [
        record
            .tax_id
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_default(),
        record.legal_name.clone(),
        record.display_name.clone(),
        record.segment.to_string(),
        record.location.clone(),
        record.source.clone(),
        record.contact_info.clone().unwrap_or_default(),
        record
            .role_detected
            .map(|r| r.to_string())
            .unwrap_or_default(),
        format!("{:.2}", record.confidence_score),
    ]
}

/// Write a header row followed by one row per record.
pub fn write_csv<W: Write>(w: &mut W, records: &[ProspectRecord]) -> io::Result<()> {
    write_row(w, &CSV_HEADERS)?;
    for record in records {
        write_row(w, &record_row(record))?;
    }
    Ok(())
}

/// Full CSV export as a UTF-8 string.
pub fn to_csv_string(records: &[ProspectRecord]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    match write_csv(&mut buf, records) {
        Ok(()) => String::from_utf8(buf).unwrap_or_default(),
        Err(_) => String::new(),
    }
}

/// Write the CSV export to a file, creating parent directories.
pub fn write_csv_file(records: &[ProspectRecord], path: &Path) -> ProspectResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_csv(&mut file, records)?;
    file.flush()?;
    Ok(())
}

/// Headline metrics shown above a result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub prospects: usize,
    pub high_confidence: usize,
    pub direct_contacts: usize,
}

impl SearchSummary {
    pub fn from_records(records: &[ProspectRecord]) -> Self {
        Self {
            prospects: records.len(),
            high_confidence: records
                .iter()
                .filter(|r| r.confidence_score > HIGH_CONFIDENCE)
                .count(),
            direct_contacts: records.iter().filter(|r| r.contact_info.is_some()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DecisionRole, Segment, TaxId};

    fn sample() -> Vec<ProspectRecord> {
        vec![
            ProspectRecord {
                tax_id: TaxId::parse("20123456789"),
                legal_name: "Grupo Gloria & Asociados S.A.C.".into(),
                display_name: "Grupo Gloria & Asociados".into(),
                segment: Segment::Corporate,
                location: "Lima - Cercado".into(),
                source: "LinkedIn + Web Scraping".into(),
                contact_info: Some("gerencia@grupogloriaasociados.com".into()),
                role_detected: Some(DecisionRole::Ceo),
                confidence_score: 0.91,
            },
            ProspectRecord {
                tax_id: None,
                legal_name: "Acme, \"La Mejor\"".into(),
                display_name: "Acme".into(),
                segment: Segment::Unclassified,
                location: "Lima".into(),
                source: "acme.pe".into(),
                contact_info: None,
                role_detected: None,
                confidence_score: 0.8,
            },
        ]
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv_string(&sample());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADERS.join(","));
        assert_eq!(
            lines[1],
            "20123456789,Grupo Gloria & Asociados S.A.C.,Grupo Gloria & Asociados,Corporativo,\
             Lima - Cercado,LinkedIn + Web Scraping,gerencia@grupogloriaasociados.com,CEO,0.91"
        );
        assert_eq!(lines[2], ",\"Acme, \"\"La Mejor\"\"\",Acme,Sin clasificar,Lima,acme.pe,,,0.80");
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        assert_eq!(to_csv_string(&[]), format!("{}\n", CSV_HEADERS.join(",")));
    }

    #[test]
    fn test_csv_keeps_non_ascii() {
        let csv = to_csv_string(&sample());
        assert!(csv.contains("Grupo Gloria"));
        let mut record = sample().remove(0);
        record.location = "Perú - Zona Industrial".into();
        assert!(to_csv_string(&[record]).contains("Perú - Zona Industrial"));
    }

    #[test]
    fn test_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join(EXPORT_FILENAME);
        write_csv_file(&sample(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_csv_string(&sample()));
    }

    #[test]
    fn test_summary() {
        let summary = SearchSummary::from_records(&sample());
        assert_eq!(
            summary,
            SearchSummary {
                prospects: 2,
                high_confidence: 1,
                direct_contacts: 1,
            }
        );
    }
}
