use crate::error::MarketError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Vendor,
    Supplier,
    Admin,
}

/// Type-safe identifier for vendors (buyers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub u32);

impl From<u32> for VendorId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for VendorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vendor_{}", self.0)
    }
}

/// Type-safe identifier for suppliers (sellers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierId(pub u32);

impl From<u32> for SupplierId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SupplierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "supplier_{}", self.0)
    }
}

/// The verified identity behind one request, as produced by the
/// authentication layer. Passed explicitly into every facade call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: u32,
    pub role: Role,
}

impl Caller {
    pub fn vendor(user_id: u32) -> Self {
        Self {
            user_id,
            role: Role::Vendor,
        }
    }

    pub fn supplier(user_id: u32) -> Self {
        Self {
            user_id,
            role: Role::Supplier,
        }
    }

    pub fn admin(user_id: u32) -> Self {
        Self {
            user_id,
            role: Role::Admin,
        }
    }

    /// The caller as a vendor, or `Unauthorized`.
    pub fn as_vendor(&self) -> Result<VendorId, MarketError> {
        match self.role {
            Role::Vendor => Ok(VendorId(self.user_id)),
            role => Err(MarketError::Unauthorized(format!(
                "{role:?} user {} is not a vendor",
                self.user_id
            ))),
        }
    }

    /// The caller as a supplier, or `Unauthorized`.
    pub fn as_supplier(&self) -> Result<SupplierId, MarketError> {
        match self.role {
            Role::Supplier => Ok(SupplierId(self.user_id)),
            role => Err(MarketError::Unauthorized(format!(
                "{role:?} user {} is not a supplier",
                self.user_id
            ))),
        }
    }

    pub fn require_admin(&self) -> Result<(), MarketError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(MarketError::Unauthorized(format!(
                "user {} is not an admin",
                self.user_id
            )))
        }
    }
}
