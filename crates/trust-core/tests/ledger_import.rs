//! End-to-end: a ledger CSV export flows through the importer and into a
//! recomputed summary using only the public API.

use std::io::Cursor;

use chrono::{TimeZone, Utc};

use trust_core::ledger::{LedgerCsvImporter, LedgerImportError};
use trust_core::scoring::{MemberId, TrustEngine};

const EXPORT: &str = "\
Event ID,Member,Project,Type,Delta,Ref,Note,Created At,Recorded By
ev-1,m-100,proj-1,commitment_done_ontime,15,,,2026-06-01T09:00:00Z,system
ev-2,m-100,proj-1,Commitment Done Ontime,15,,,2026-06-05T09:00:00Z,system
ev-3,m-100,proj-1,commitment_done_late,8,,\"{\"\"lateDays\"\": 2}\",2026-06-10T09:00:00Z,admin
ev-4,m-100,proj-1,contrib_knowledge_verified,10,,,2026-06-12,member-7
ev-5,other-member,proj-1,fraud_confirmed,-80,,,2026-06-12T00:00:00Z,admin
ev-6,m-100,,unknown_export_noise,0,,,garbage-timestamp,system
";

#[test]
fn csv_export_feeds_recomputation() {
    let events = LedgerCsvImporter::from_reader(Cursor::new(EXPORT)).expect("import succeeds");
    // The unusable timestamp row is skipped; everything else survives.
    assert_eq!(events.len(), 5);

    let now = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).expect("valid instant");
    let summary =
        TrustEngine::standard().recompute(&MemberId("m-100".to_string()), &events, now);

    // Two on-time completions (one via tag normalization) and one late.
    assert_eq!(summary.commitments_completed, 3);
    assert_eq!(summary.commitments_late_90d, 1);
    assert_eq!(summary.knowledge_points_90d, 10.0);
    // The foreign member's fraud row must not touch this summary.
    assert_eq!(summary.integrity, 150);
}

#[test]
fn truncated_csv_surfaces_a_csv_error() {
    let broken = "Event ID,Member,Type\nev-1,\"m-100\n";
    let error =
        LedgerCsvImporter::from_reader(Cursor::new(broken)).expect_err("expected csv error");

    match error {
        LedgerImportError::Csv(_) => {}
        other => panic!("expected csv error, got {other:?}"),
    }
}
