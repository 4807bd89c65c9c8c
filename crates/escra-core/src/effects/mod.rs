//! Effect interfaces for the contract console.
//!
//! Every external collaborator of the console core is expressed as a trait
//! here. Production handlers live in `escra-app`, deterministic stateful
//! fakes in `escra-testkit`.

pub mod directory;
pub mod documents;
pub mod persistence;
pub mod random;
pub mod time;

pub use directory::AssigneeDirectory;
pub use documents::{DocumentStore, DocumentStoreError, NewDocument};
pub use persistence::{ContractPersistence, PersistenceError};
pub use random::ContractIdEffects;
pub use time::{TimeError, TimeoutHandle, TimerEffects};
