use crate::error::MarketError;
use crate::model::Rupees;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Active,
    Closed,
}

/// A pooled-discount group several vendors order through. Read-only here:
/// checkout only uses it to price the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOrder {
    pub id: GroupId,
    pub name: String,
    pub member_count: u32,
    pub total_amount: Rupees,
    /// 0..=100
    pub discount_percent: u8,
    pub status: GroupStatus,
}

impl GroupOrder {
    pub fn is_active(&self) -> bool {
        self.status == GroupStatus::Active
    }

    /// `floor(subtotal * discount_percent / 100)`, capped at 100 percent.
    pub fn discount_on(&self, subtotal: Rupees) -> Rupees {
        let percent = u128::from(self.discount_percent.min(100));
        let discount = u128::from(subtotal) * percent / 100;
        // never above subtotal
        Rupees::try_from(discount).unwrap_or(subtotal)
    }
}

/// The group orders vendors may buy through, fixed when the marketplace
/// starts. Checkout looks groups up here by id.
#[derive(Debug, Clone, Default)]
pub struct GroupDirectory {
    groups: Arc<BTreeMap<GroupId, GroupOrder>>,
}

impl GroupDirectory {
    /// Later entries replace earlier ones with the same id.
    pub fn new(groups: impl IntoIterator<Item = GroupOrder>) -> Self {
        Self {
            groups: Arc::new(groups.into_iter().map(|g| (g.id, g)).collect()),
        }
    }

    pub fn get(&self, id: GroupId) -> Option<&GroupOrder> {
        self.groups.get(&id)
    }

    pub fn require(&self, id: GroupId) -> Result<&GroupOrder, MarketError> {
        self.get(id)
            .ok_or_else(|| MarketError::NotFound(id.to_string()))
    }

    /// Active groups, by id.
    pub fn active(&self) -> Vec<GroupOrder> {
        self.groups.values().filter(|g| g.is_active()).cloned().collect()
    }
}
