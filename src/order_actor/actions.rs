//! Custom actions for the Order actor.
//!
//! Status changes address one supplier's partition; nothing else in the
//! order is touched. Every action replies with the order as it is after the
//! change.

use crate::model::{PartitionStatus, SupplierId, VendorId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum OrderAction {
    Confirm {
        supplier_id: SupplierId,
        at: DateTime<Utc>,
    },
    Reject {
        supplier_id: SupplierId,
        reason: String,
        at: DateTime<Utc>,
    },
    /// `to` must be the next step after the partition's current status.
    Advance {
        supplier_id: SupplierId,
        to: PartitionStatus,
        at: DateTime<Utc>,
    },
    /// Rates a delivered order once, and records it with every supplier.
    Rate {
        vendor_id: VendorId,
        stars: u8,
        review: Option<String>,
        at: DateTime<Utc>,
    },
}
