#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # BazarBuddy
//!
//! > **Order lifecycle core for a street-food supply marketplace.**
//!
//! Vendors (street-food stalls) fill a cart with raw materials from several
//! suppliers and check out once. The resulting order is split into one
//! *partition* per supplier; each supplier confirms or rejects, then ships and
//! delivers, their own share independently. Once every partition is delivered
//! the vendor may rate the order, and the rating lands in each supplier's
//! ledger.
//!
//! ## 🏗️ Design
//!
//! Every resource (carts, orders, products, suppliers) lives in its own
//! [`ResourceActor`](actor_framework::ResourceActor): a Tokio task that owns
//! the entities and handles one request at a time. Two suppliers confirming
//! the same order are therefore serialised by the order actor, and each only
//! touches its own partition.
//!
//! Checkout is a single action on the vendor's cart. The order is created
//! first and the cart cleared only on success, so a failure leaves no order
//! and an intact cart.
//!
//! All operations fail with [`MarketError`](error::MarketError). Entity hooks
//! return it directly and the framework carries it back unchanged.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Model ([`model`])
//! Plain data and the rules that only need one entity: cart arithmetic,
//! the partition state machine, KYC and rating ledgers, read-side views.
//!
//! ### 2. The Actors ([`cart_actor`], [`order_actor`], [`product_actor`], [`supplier_actor`])
//! [`ActorEntity`](actor_framework::ActorEntity) implementations plus their
//! custom actions. [`cart_actor::checkout`] holds the order aggregation.
//!
//! ### 3. The Interface ([`clients`], [`facade`])
//! Typed clients wrap the generic `ResourceClient`; the
//! [`Marketplace`](facade::Marketplace) facade adds role checks on top of
//! them and is what an API layer would call.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`MarketSystem`](lifecycle::MarketSystem) spawns and wires the actors;
//! [`setup_tracing`](lifecycle::setup_tracing) configures logging.
//!
//! ## 🚀 Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! BAZAR_DELIVERY_FEE=40 RUST_LOG=debug cargo run
//! ```

pub mod cart_actor;
pub mod clients;
pub mod clock;
pub mod config;
pub mod error;
pub mod facade;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod supplier_actor;
