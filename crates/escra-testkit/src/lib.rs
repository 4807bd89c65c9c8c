//! Escra Testkit - Deterministic Fakes for the Contract Console
//!
//! Stateful stand-ins for every effect interface in `escra-core`, so that
//! wizard behavior can be driven and observed without a runtime, a network,
//! or wall-clock time.
//!
//! - [`ControllableTimer`]: virtual clock; tests advance it explicitly
//! - [`stateful_effects::InMemoryDocumentStore`]: sequential ids, failure injection
//! - [`stateful_effects::RecordingPersistence`]: call log, offline toggle
//! - [`SequenceContractIds`]: scripted contract ids
//! - [`fixtures`]: assignee directory and small builders

#![allow(missing_docs)]

pub mod fixtures;
pub mod random;
pub mod stateful_effects;
pub mod time;

pub use fixtures::StaticAssigneeDirectory;
pub use random::SequenceContractIds;
pub use stateful_effects::{InMemoryDocumentStore, PersistenceCall, RecordingPersistence};
pub use time::ControllableTimer;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
