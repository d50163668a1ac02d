//! # Supplier Client
//!
//! Profiles, KYC and the rating ledger. Registration uses `insert` so that a
//! supplier's profile id is always their user id.
use crate::error::MarketError;
use crate::model::{
    KycDocument, KycKind, RatingEntry, Supplier, SupplierCreate, SupplierId, SupplierUpdate,
};
use crate::supplier_actor::{SupplierAction, SupplierActionResult};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

crate::market_client!(
    /// Client for interacting with the Supplier actor.
    SupplierClient,
    Supplier,
    supplier
);

impl SupplierClient {
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        id: SupplierId,
        params: SupplierCreate,
    ) -> Result<SupplierId, MarketError> {
        debug!("Sending request");
        Ok(self.inner.insert(id, params).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: SupplierId,
        update: SupplierUpdate,
    ) -> Result<Supplier, MarketError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    #[instrument(skip(self))]
    pub async fn submit_kyc(
        &self,
        id: SupplierId,
        kind: KycKind,
        file_name: String,
        at: DateTime<Utc>,
    ) -> Result<KycDocument, MarketError> {
        debug!("Sending request");
        let action = SupplierAction::SubmitKyc {
            kind,
            file_name,
            at,
        };
        match self.inner.perform_action(id, action).await? {
            SupplierActionResult::SubmitKyc(document) => Ok(document),
            _ => unreachable!("SubmitKyc action must return SubmitKyc result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn review_kyc(
        &self,
        id: SupplierId,
        kind: KycKind,
        approve: bool,
        note: Option<String>,
    ) -> Result<KycDocument, MarketError> {
        debug!("Sending request");
        let action = SupplierAction::ReviewKyc {
            kind,
            approve,
            note,
        };
        match self.inner.perform_action(id, action).await? {
            SupplierActionResult::ReviewKyc(document) => Ok(document),
            _ => unreachable!("ReviewKyc action must return ReviewKyc result"),
        }
    }

    /// Returns whether the entry was new for this supplier.
    #[instrument(skip(self, entry), fields(order_id = %entry.order_id))]
    pub async fn record_rating(
        &self,
        id: SupplierId,
        entry: RatingEntry,
    ) -> Result<bool, MarketError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, SupplierAction::RecordRating(entry))
            .await?
        {
            SupplierActionResult::RecordRating(added) => Ok(added),
            _ => unreachable!("RecordRating action must return RecordRating result"),
        }
    }

    /// Suppliers matching `text` (name or location) and `category`, by name.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        text: Option<String>,
        category: Option<String>,
    ) -> Result<Vec<Supplier>, MarketError> {
        debug!("Sending request");
        let mut found = self
            .inner
            .list(move |s: &Supplier| s.matches(text.as_deref(), category.as_deref()))
            .await?;
        found.sort_by(|a, b| a.business_name.cmp(&b.business_name).then(a.id.0.cmp(&b.id.0)));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action};
    use actor_framework::FrameworkError;
    use crate::model::{OrderId, VendorId};

    #[tokio::test]
    async fn record_rating_sends_the_entry_to_the_right_supplier() {
        let (client, mut receiver) = create_mock_client::<Supplier>(4);
        let suppliers = SupplierClient::new(client);

        let task = tokio::spawn(async move {
            suppliers
                .record_rating(
                    SupplierId(2),
                    RatingEntry {
                        order_id: OrderId(9),
                        vendor_id: VendorId(1),
                        stars: 5,
                        review: None,
                        recorded_at: Utc::now(),
                    },
                )
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, SupplierId(2));
        assert!(matches!(action, SupplierAction::RecordRating(ref e) if e.order_id == OrderId(9)));
        responder
            .send(Ok(SupplierActionResult::RecordRating(true)))
            .unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn entity_errors_come_back_as_market_errors() {
        let (client, mut receiver) = create_mock_client::<Supplier>(4);
        let suppliers = SupplierClient::new(client);

        let task = tokio::spawn(async move {
            suppliers
                .review_kyc(SupplierId(2), KycKind::AddressProof, true, None)
                .await
        });

        let (_, _, responder) = expect_action(&mut receiver).await.expect("action");
        responder
            .send(Err(FrameworkError::Entity(MarketError::invalid_state(
                "already reviewed",
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(MarketError::InvalidState("already reviewed".into()))
        );
    }
}
