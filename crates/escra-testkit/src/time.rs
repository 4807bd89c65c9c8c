//! Controllable timer for deterministic testing
//!
//! Virtual clock in milliseconds. Scheduled timeouts fire only when the test
//! calls [`ControllableTimer::advance`], which returns the fired handles in
//! expiry order so the test can route them back to their owners.

use escra_core::effects::{TimeError, TimeoutHandle, TimerEffects};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Default)]
struct TimerState {
    now_ms: u64,
    // (expiry, sequence, handle); sequence keeps equal expiries in schedule order
    pending: Vec<(u64, u64, TimeoutHandle)>,
    next_sequence: u64,
    cancelled: Vec<TimeoutHandle>,
    unavailable: bool,
}

/// Virtual-time [`TimerEffects`] implementation.
#[derive(Debug, Clone, Default)]
pub struct ControllableTimer {
    state: Arc<Mutex<TimerState>>,
}

impl ControllableTimer {
    /// Create a timer at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.state.lock().now_ms
    }

    /// Move virtual time forward and return every handle that expired.
    pub fn advance(&self, ms: u64) -> Vec<TimeoutHandle> {
        let mut state = self.state.lock();
        state.now_ms += ms;
        let now = state.now_ms;

        let mut fired: Vec<(u64, u64, TimeoutHandle)> = Vec::new();
        state.pending.retain(|entry| {
            if entry.0 <= now {
                fired.push(*entry);
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|(expiry, sequence, _)| (*expiry, *sequence));
        fired.into_iter().map(|(_, _, handle)| handle).collect()
    }

    /// Timeouts scheduled and neither fired nor cancelled.
    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Every handle cancelled so far, in cancel order.
    pub fn cancelled(&self) -> Vec<TimeoutHandle> {
        self.state.lock().cancelled.clone()
    }

    /// Make `set_timeout` fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }
}

impl TimerEffects for ControllableTimer {
    fn set_timeout(&self, delay_ms: u64) -> Result<TimeoutHandle, TimeError> {
        let mut state = self.state.lock();
        if state.unavailable {
            return Err(TimeError::ServiceUnavailable {
                reason: "controllable timer switched off".to_string(),
            });
        }
        let handle = Uuid::new_v4();
        let expiry = state.now_ms + delay_ms;
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.pending.push((expiry, sequence, handle));
        Ok(handle)
    }

    fn cancel_timeout(&self, handle: TimeoutHandle) -> bool {
        let mut state = self.state.lock();
        let before = state.pending.len();
        state.pending.retain(|(_, _, h)| *h != handle);
        let removed = state.pending.len() != before;
        if removed {
            state.cancelled.push(handle);
        }
        removed
    }
}
