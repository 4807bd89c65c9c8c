//! # Stateful Effect Handlers for Testing
//!
//! Fakes for the external collaborators of the console. They keep shared
//! state behind `Arc` so a test can hold one clone while the code under test
//! holds another, then inspect what happened.
//!
//! ## Usage in Tests
//!
//! ```rust,ignore
//! use escra_testkit::stateful_effects::{InMemoryDocumentStore, RecordingPersistence};
//!
//! #[tokio::test]
//! async fn test_with_stateful_fakes() {
//!     let documents = InMemoryDocumentStore::new();
//!     documents.fail_on_call(2);
//!     let persistence = RecordingPersistence::new();
//!     // hand clones to the wizard, then inspect `documents.requests()`
//! }
//! ```

pub mod documents;
pub mod persistence;

pub use documents::InMemoryDocumentStore;
pub use persistence::{PersistenceCall, RecordingPersistence};
