//! # Mock Client
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test an actor whose context depends on other actors without spawning them.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (scripted replies) | Real state management |
//! | **Error Injection** | `return_err` | Requires reaching the state |
//! | **Use Case** | Isolating one actor from its dependencies | Full system |
//!
//! Expectations are consumed in order. A request that does not match the next
//! expectation (different kind or different id) fails the test; the mismatch
//! is recorded and reported by [`MockClient::verify`].
//!
//! ```rust,ignore
//! let mut suppliers = MockClient::<Supplier>::new();
//! suppliers.expect_get(SupplierId(1)).return_ok(Some(supplier));
//! suppliers
//!     .expect_action(SupplierId(1))
//!     .return_err(FrameworkError::ActorClosed);
//!
//! let client = SupplierClient::new(suppliers.client());
//! // ... drive the code under test ...
//! suppliers.verify();
//! ```
//!
//! For request-level assertions (inspecting the action payload itself) use
//! [`create_mock_client`] together with [`expect_action`].

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Reply, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create(Reply<T::Id, T::Error>),
    Insert(T::Id, Reply<T::Id, T::Error>),
    Get(T::Id, Reply<Option<T>, T::Error>),
    Update(T::Id, Reply<T, T::Error>),
    Action(T::Id, Reply<T::ActionResult, T::Error>),
    List(Reply<Vec<T>, T::Error>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "Create",
            Self::Insert(..) => "Insert",
            Self::Get(..) => "Get",
            Self::Update(..) => "Update",
            Self::Action(..) => "Action",
            Self::List(_) => "List",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a
    /// Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let errors = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock queue poisoned").pop_front();
                if let Err(message) = answer(request, next) {
                    errors.lock().expect("mock log poisoned").push(message);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, |_, reply| Expectation::Create(reply))
    }

    pub fn expect_insert(&mut self, id: T::Id) -> ExpectationBuilder<T, T::Id> {
        self.builder(Some(id), |id, reply| Expectation::Insert(id.expect("id"), reply))
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), |id, reply| Expectation::Get(id.expect("id"), reply))
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |id, reply| Expectation::Update(id.expect("id"), reply))
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), |id, reply| Expectation::Action(id.expect("id"), reply))
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, |_, reply| Expectation::List(reply))
    }

    fn builder<R>(
        &mut self,
        id: Option<T::Id>,
        wrap: fn(Option<T::Id>, Reply<R, T::Error>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if an expectation is still queued or a request did not match.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().expect("mock log poisoned");
        assert!(mismatches.is_empty(), "Unexpected requests: {mismatches:?}");
        let remaining = self.expectations.lock().expect("mock queue poisoned").len();
        assert_eq!(remaining, 0, "Not all expectations were met. {remaining} remaining");
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Option<T::Id>, Reply<R, T::Error>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError<T::Error>) {
        self.push(Err(error));
    }

    fn push(self, reply: Reply<R, T::Error>) {
        let expectation = (self.wrap)(self.id, reply);
        self.expectations
            .lock()
            .expect("mock queue poisoned")
            .push_back(expectation);
    }
}

fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    let kind = request.kind();
    let Some(expectation) = expectation else {
        return Err(format!("{kind} with no expectation queued"));
    };
    let mismatch = |expected: &str| format!("{kind} received, {expected} expected");

    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Expectation::Create(reply)) => {
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Insert { id, respond_to, .. }, Expectation::Insert(want, reply)) => {
            check_id(&id, &want)?;
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Get { id, respond_to }, Expectation::Get(want, reply)) => {
            check_id(&id, &want)?;
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Update { id, respond_to, .. }, Expectation::Update(want, reply)) => {
            check_id(&id, &want)?;
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Action { id, respond_to, .. }, Expectation::Action(want, reply)) => {
            check_id(&id, &want)?;
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::List { respond_to, .. }, Expectation::List(reply)) => {
            let _ = respond_to.send(reply);
        }
        (_, other) => return Err(mismatch(other.kind())),
    }
    Ok(())
}

fn check_id<I: PartialEq + std::fmt::Display>(got: &I, want: &I) -> Result<(), String> {
    if got == want {
        Ok(())
    } else {
        Err(format!("request for {got}, expectation for {want}"))
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Reply<T::ActionResult, T::Error>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
