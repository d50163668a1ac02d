//! [`ActorEntity`] implementation for [`Supplier`].
//!
//! Suppliers are inserted under the id of the user who registers them, so
//! there is never more than one profile per supplier account.

use super::actions::{SupplierAction, SupplierActionResult};
use crate::error::MarketError;
use crate::model::{Supplier, SupplierCreate, SupplierId, SupplierUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Supplier {
    type Id = SupplierId;
    type Create = SupplierCreate;
    type Update = SupplierUpdate;
    type Action = SupplierAction;
    type ActionResult = SupplierActionResult;
    type Context = ();
    type Error = MarketError;

    fn from_create_params(id: SupplierId, params: SupplierCreate) -> Result<Self, MarketError> {
        Supplier::new(id, params)
    }

    async fn on_update(&mut self, update: SupplierUpdate, _ctx: &()) -> Result<(), MarketError> {
        self.apply_update(update)
    }

    async fn handle_action(
        &mut self,
        action: SupplierAction,
        _ctx: &(),
    ) -> Result<SupplierActionResult, MarketError> {
        match action {
            SupplierAction::SubmitKyc {
                kind,
                file_name,
                at,
            } => self
                .submit_kyc(kind, &file_name, at)
                .cloned()
                .map(SupplierActionResult::SubmitKyc),
            SupplierAction::ReviewKyc { kind, approve, note } => self
                .review_kyc(kind, approve, note)
                .cloned()
                .map(SupplierActionResult::ReviewKyc),
            SupplierAction::RecordRating(entry) => self
                .record_rating(entry)
                .map(SupplierActionResult::RecordRating),
        }
    }
}
