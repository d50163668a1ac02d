//! Custom actions for the Supplier actor: KYC paperwork and the rating ledger.

use crate::model::{KycDocument, KycKind, RatingEntry};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum SupplierAction {
    /// Uploads (or replaces) a document, which then waits for review.
    SubmitKyc {
        kind: KycKind,
        file_name: String,
        at: DateTime<Utc>,
    },
    /// Admin decision on a pending document.
    ReviewKyc {
        kind: KycKind,
        approve: bool,
        note: Option<String>,
    },
    /// Adds a vendor rating. A second entry for the same order is ignored.
    RecordRating(RatingEntry),
}

/// Results from SupplierActions - variants match 1:1 with SupplierAction
#[derive(Debug, Clone)]
pub enum SupplierActionResult {
    SubmitKyc(KycDocument),
    ReviewKyc(KycDocument),
    /// `true` when the ledger gained an entry.
    RecordRating(bool),
}
