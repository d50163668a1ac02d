//! Error type shared by every marketplace operation.

use actor_framework::FrameworkError;
use thiserror::Error;

/// Failure of a marketplace operation.
///
/// `Validation` and `InvalidState` are raised before any state changes, so
/// the caller can correct the input and retry. `Store` covers the store actor
/// being gone and is surfaced unmodified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarketError {
    /// Malformed or missing input (blank address, zero rating, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is not allowed from the current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A referenced order, product, supplier or cart line does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller's role or identity does not permit the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The backing store could not be reached.
    #[error("Store failure: {0}")]
    Store(String),
}

impl MarketError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

impl From<FrameworkError<MarketError>> for MarketError {
    fn from(e: FrameworkError<MarketError>) -> Self {
        match e {
            FrameworkError::Entity(inner) => inner,
            FrameworkError::NotFound(id) => MarketError::NotFound(id),
            FrameworkError::AlreadyExists(id) => {
                MarketError::InvalidState(format!("{id} already exists"))
            }
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                MarketError::Store(e.to_string())
            }
        }
    }
}
