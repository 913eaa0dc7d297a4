//! Deterministic trust scoring for collaborative platform members.
//!
//! An append-only ledger of verified events plus a typed rules document
//! go in; a fully recomputed [`scoring::TrustSummary`] (score, weighted
//! sub-scores, counts, risk flags, privilege level) comes out. The
//! engine owns no storage, performs no I/O, and reads no ambient clock:
//! callers inject the ledger slice and `now`.

pub mod config;
pub mod error;
pub mod ledger;
pub mod scoring;
