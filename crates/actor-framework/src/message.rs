//! # Generic Messages
//!
//! Request envelope exchanged between [`ResourceClient`](crate::ResourceClient)
//! and [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Result type every reply carries.
pub type Reply<T, E> = Result<T, FrameworkError<E>>;

/// One-shot response channel for a request on entity `T`.
pub type Response<T, R> = oneshot::Sender<Reply<R, <T as ActorEntity>::Error>>;

/// Predicate used by [`ResourceRequest::List`].
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the CRUD lifecycle of a stored resource plus:
///
/// - **Insert**: create under a caller-chosen id (for entities keyed by an
///   external identity, such as a supplier profile keyed by the user id).
/// - **Action**: a resource-specific [`ActorEntity::Action`].
/// - **List**: every stored entity matching a predicate.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T, T::Id>,
    },
    Insert {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T, T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T, Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T, ()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T, T::ActionResult>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<T, Vec<T>>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the request kind, used in logs and mock diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "Create",
            Self::Insert { .. } => "Insert",
            Self::Get { .. } => "Get",
            Self::Update { .. } => "Update",
            Self::Delete { .. } => "Delete",
            Self::Action { .. } => "Action",
            Self::List { .. } => "List",
        }
    }
}
