//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG`. Module paths are hidden (`with_target(false)`);
//! actor log lines carry an `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle, creates, status changes
//! RUST_LOG=debug cargo run    # plus every request and its payload
//! ```
//!
//! A checkout at `info` level reads roughly:
//!
//! ```text
//! INFO Action ok entity_type="Cart" id=vendor_1
//! INFO Created id=order_1 size=1
//! INFO Checked out vendor_id=vendor_1 order_id=order_1 total=2450
//! INFO checkout: Order placed order_id=order_1 total=2450 suppliers=2
//! ```

/// Installs the global subscriber. Call once, from `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
