//! Supplier profiles, KYC documents and the rating ledger.

use crate::error::MarketError;
use crate::model::{OrderId, SupplierId, VendorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document kinds a supplier must have approved before they count as verified.
pub const REQUIRED_KYC: [KycKind; 3] = [
    KycKind::BusinessLicense,
    KycKind::IdentityProof,
    KycKind::AddressProof,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycKind {
    BusinessLicense,
    IdentityProof,
    AddressProof,
    GstCertificate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
}

/// Metadata of an uploaded document. The file itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycDocument {
    pub kind: KycKind,
    pub file_name: String,
    pub status: KycStatus,
    pub uploaded_at: DateTime<Utc>,
    pub review_note: Option<String>,
}

/// A vendor's rating of one delivered order, as seen by one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub order_id: OrderId,
    pub vendor_id: VendorId,
    pub stars: u8,
    pub review: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub business_name: String,
    pub location: String,
    /// Lowercased product categories, e.g. "vegetables", "grains".
    pub categories: Vec<String>,
    pub kyc_documents: Vec<KycDocument>,
    /// At most one entry per order.
    pub ratings: Vec<RatingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub business_name: String,
    pub location: String,
    pub categories: Vec<String>,
}

/// Profile edits. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierUpdate {
    pub business_name: Option<String>,
    pub location: Option<String>,
    pub categories: Option<Vec<String>>,
}

fn normalize_categories(categories: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(categories.len());
    for category in categories {
        let category = category.trim().to_lowercase();
        if !category.is_empty() && !out.contains(&category) {
            out.push(category);
        }
    }
    out
}

impl Supplier {
    pub fn new(id: SupplierId, params: SupplierCreate) -> Result<Self, MarketError> {
        let business_name = params.business_name.trim();
        if business_name.is_empty() {
            return Err(MarketError::validation("business name is required"));
        }
        Ok(Self {
            id,
            business_name: business_name.to_string(),
            location: params.location.trim().to_string(),
            categories: normalize_categories(params.categories),
            kyc_documents: Vec::new(),
            ratings: Vec::new(),
        })
    }

    pub fn apply_update(&mut self, update: SupplierUpdate) -> Result<(), MarketError> {
        if let Some(name) = update.business_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(MarketError::validation("business name is required"));
            }
            self.business_name = name.to_string();
        }
        if let Some(location) = update.location {
            self.location = location.trim().to_string();
        }
        if let Some(categories) = update.categories {
            self.categories = normalize_categories(categories);
        }
        Ok(())
    }

    pub fn document(&self, kind: KycKind) -> Option<&KycDocument> {
        self.kyc_documents.iter().find(|d| d.kind == kind)
    }

    /// Stores a document as pending review. Replaces a pending or rejected
    /// document of the same kind; an approved one is final.
    pub fn submit_kyc(
        &mut self,
        kind: KycKind,
        file_name: &str,
        at: DateTime<Utc>,
    ) -> Result<&KycDocument, MarketError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(MarketError::validation("a file name is required"));
        }
        let document = KycDocument {
            kind,
            file_name: file_name.to_string(),
            status: KycStatus::Pending,
            uploaded_at: at,
            review_note: None,
        };
        let index = match self.kyc_documents.iter().position(|d| d.kind == kind) {
            Some(i) if self.kyc_documents[i].status == KycStatus::Approved => {
                return Err(MarketError::invalid_state(format!(
                    "{kind:?} is already approved for {}",
                    self.id
                )));
            }
            Some(i) => {
                self.kyc_documents[i] = document;
                i
            }
            None => {
                self.kyc_documents.push(document);
                self.kyc_documents.len() - 1
            }
        };
        Ok(&self.kyc_documents[index])
    }

    pub fn review_kyc(
        &mut self,
        kind: KycKind,
        approve: bool,
        note: Option<String>,
    ) -> Result<&KycDocument, MarketError> {
        let id = self.id;
        let Some(document) = self.kyc_documents.iter_mut().find(|d| d.kind == kind) else {
            return Err(MarketError::NotFound(format!("{kind:?} document of {id}")));
        };
        if document.status != KycStatus::Pending {
            return Err(MarketError::invalid_state(format!(
                "{kind:?} document of {id} was already reviewed"
            )));
        }
        document.status = if approve {
            KycStatus::Approved
        } else {
            KycStatus::Rejected
        };
        document.review_note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Ok(document)
    }

    fn approved_required(&self) -> usize {
        REQUIRED_KYC
            .iter()
            .filter(|kind| {
                self.document(**kind)
                    .is_some_and(|d| d.status == KycStatus::Approved)
            })
            .count()
    }

    /// Fraction of required documents approved, 0.0 to 1.0.
    pub fn kyc_progress(&self) -> f64 {
        self.approved_required() as f64 / REQUIRED_KYC.len() as f64
    }

    pub fn is_verified(&self) -> bool {
        self.approved_required() == REQUIRED_KYC.len()
    }

    /// Adds a rating unless one for the same order is already on file.
    /// Returns whether the ledger changed.
    pub fn record_rating(&mut self, entry: RatingEntry) -> Result<bool, MarketError> {
        if !(1..=5).contains(&entry.stars) {
            return Err(MarketError::validation("stars must be between 1 and 5"));
        }
        if self.ratings.iter().any(|r| r.order_id == entry.order_id) {
            return Ok(false);
        }
        self.ratings.push(entry);
        Ok(true)
    }

    /// Mean of all recorded stars, `None` before the first rating.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let total: u32 = self.ratings.iter().map(|r| u32::from(r.stars)).sum();
        Some(f64::from(total) / self.ratings.len() as f64)
    }

    /// Case-insensitive match on name or location, plus category membership.
    pub fn matches(&self, text: Option<&str>, category: Option<&str>) -> bool {
        let text_ok = match text.map(str::trim).filter(|t| !t.is_empty()) {
            None => true,
            Some(t) => {
                let t = t.to_lowercase();
                self.business_name.to_lowercase().contains(&t)
                    || self.location.to_lowercase().contains(&t)
            }
        };
        let category_ok = match category.map(str::trim).filter(|c| !c.is_empty()) {
            None => true,
            Some(c) => {
                let c = c.to_lowercase();
                self.categories.iter().any(|own| *own == c)
            }
        };
        text_ok && category_ok
    }
}
