//! CSV import for ledger exports, so operator tooling can replay an
//! event history without touching the persistence collaborator.

mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::scoring::domain::TrustEvent;

#[derive(Debug)]
pub enum LedgerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for LedgerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerImportError::Io(err) => write!(f, "failed to read ledger export: {}", err),
            LedgerImportError::Csv(err) => write!(f, "invalid ledger CSV data: {}", err),
        }
    }
}

impl std::error::Error for LedgerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerImportError::Io(err) => Some(err),
            LedgerImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LedgerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LedgerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct LedgerCsvImporter;

impl LedgerCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TrustEvent>, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TrustEvent>, LedgerImportError> {
        Ok(parser::parse_events(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use chrono::{TimeZone, Utc};

    use crate::scoring::domain::EventActor;

    const HEADER: &str = "Event ID,Member,Project,Type,Delta,Ref,Note,Created At,Recorded By\n";

    #[test]
    fn parse_timestamp_supports_rfc3339_dates_and_epoch_millis() {
        let rfc = parser::parse_timestamp_for_tests("2026-02-10T09:30:00Z").expect("parse rfc");
        assert_eq!(rfc, Utc.with_ymd_and_hms(2026, 2, 10, 9, 30, 0).unwrap());

        let date = parser::parse_timestamp_for_tests("2026-02-10").expect("parse date");
        assert_eq!(date, Utc.with_ymd_and_hms(2026, 2, 10, 0, 0, 0).unwrap());

        let millis = parser::parse_timestamp_for_tests("1770000000000").expect("parse millis");
        assert_eq!(millis.timestamp_millis(), 1_770_000_000_000);

        assert!(parser::parse_timestamp_for_tests("  ").is_none());
        assert!(parser::parse_timestamp_for_tests("not-a-date").is_none());
    }

    #[test]
    fn normalize_tag_collapses_whitespace_and_case() {
        let source = "\u{feff}Commitment  Done  Late";
        assert_eq!(
            normalizer::normalize_for_tests(source),
            "commitment_done_late"
        );
    }

    #[test]
    fn importer_reads_well_formed_rows() {
        let csv = format!(
            "{HEADER}ev-1,m-77,proj-9,contrib_labor_verified,8,,\"{{\"\"hours\"\": 8}}\",2026-02-10T09:30:00Z,system\n"
        );
        let events = LedgerCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "ev-1");
        assert_eq!(event.member_id.0, "m-77");
        assert_eq!(event.project_id.as_deref(), Some("proj-9"));
        assert_eq!(event.event_type, "contrib_labor_verified");
        assert_eq!(event.delta, 8.0);
        assert_eq!(event.note.as_deref(), Some(r#"{"hours": 8}"#));
        assert_eq!(event.recorded_by, EventActor::System);
    }

    #[test]
    fn importer_skips_rows_without_id_member_or_timestamp() {
        let csv = format!(
            "{HEADER},m-77,,contrib_labor_verified,8,,,2026-02-10,system\n\
             ev-2,,,contrib_labor_verified,8,,,2026-02-10,system\n\
             ev-3,m-77,,contrib_labor_verified,8,,,garbage,system\n\
             ev-4,m-77,,Contrib Labor Verified,not-a-number,,,2026-02-10,admin\n"
        );
        let events = LedgerCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ev-4");
        assert_eq!(events[0].event_type, "contrib_labor_verified");
        assert_eq!(events[0].delta, 0.0);
        assert_eq!(events[0].recorded_by, EventActor::Admin);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = LedgerCsvImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            LedgerImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
