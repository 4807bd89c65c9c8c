//! Production effect handlers
//!
//! Implementations of the escra-core effect interfaces that the console
//! owns itself. The document store, assignee directory and contract
//! persistence are supplied by the host.

pub mod random;
pub mod timer;

pub use random::RandomContractIds;
pub use timer::{FiredTimeouts, TokioTimerHandler};
