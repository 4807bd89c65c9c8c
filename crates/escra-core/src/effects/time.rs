//! Timer effect interface.
//!
//! Timers are cancellable scheduled callbacks identified by a handle. A fired
//! timer is delivered back to its owner as an event carrying the handle; the
//! owner ignores any handle that is not its live one.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Error type for timer operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum TimeError {
    #[error("Timer service unavailable: {reason}")]
    ServiceUnavailable { reason: String },
    #[error("Operation failed: {reason}")]
    OperationFailed { reason: String },
}

impl From<TimeError> for crate::EscraError {
    fn from(err: TimeError) -> Self {
        crate::EscraError::internal(err.to_string())
    }
}

/// Handle for timeout operations.
pub type TimeoutHandle = Uuid;

/// Cancellable one-shot timers.
pub trait TimerEffects: Send + Sync {
    /// Schedule a timeout that fires once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u64) -> Result<TimeoutHandle, TimeError>;

    /// Cancel a pending timeout.
    ///
    /// Returns `true` when the handle was still pending. Cancelling a fired
    /// or unknown handle is a no-op.
    fn cancel_timeout(&self, handle: TimeoutHandle) -> bool;
}

/// Blanket implementation for Arc<T> where T: TimerEffects
impl<T: TimerEffects + ?Sized> TimerEffects for Arc<T> {
    fn set_timeout(&self, delay_ms: u64) -> Result<TimeoutHandle, TimeError> {
        (**self).set_timeout(delay_ms)
    }

    fn cancel_timeout(&self, handle: TimeoutHandle) -> bool {
        (**self).cancel_timeout(handle)
    }
}
