//! # Framework Errors
//!
//! Errors produced by the store actor and its clients. Entity errors are
//! carried through unchanged in [`FrameworkError::Entity`] so callers can
//! match on the domain error instead of a boxed trait object.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E: std::error::Error + 'static> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("{0}")]
    Entity(#[source] E),
}

impl<E: std::error::Error + 'static> FrameworkError<E> {
    /// True for transport failures (the actor is gone), as opposed to
    /// answers from a live actor.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
