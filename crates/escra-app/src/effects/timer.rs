//! Tokio timer handler for production use
//!
//! Each timeout is a spawned task that sleeps and then sends its handle on
//! the fired channel. The host drains the channel and routes every handle
//! back to the wizard with `on_timeout`. Cancelling aborts the task, so a
//! cancelled handle is never sent.

use escra_core::effects::{TimeError, TimeoutHandle, TimerEffects};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Receiving end of fired timeout handles.
pub type FiredTimeouts = mpsc::UnboundedReceiver<TimeoutHandle>;

/// Timer handler backed by the current tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioTimerHandler {
    tasks: Arc<Mutex<HashMap<TimeoutHandle, JoinHandle<()>>>>,
    fired: mpsc::UnboundedSender<TimeoutHandle>,
}

impl TokioTimerHandler {
    /// Create a handler and the channel its timeouts fire on.
    pub fn new() -> (Self, FiredTimeouts) {
        let (fired, receiver) = mpsc::unbounded_channel();
        let handler = Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            fired,
        };
        (handler, receiver)
    }

    /// Number of timeouts that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl TimerEffects for TokioTimerHandler {
    fn set_timeout(&self, delay_ms: u64) -> Result<TimeoutHandle, TimeError> {
        let runtime = Handle::try_current().map_err(|e| TimeError::ServiceUnavailable {
            reason: e.to_string(),
        })?;

        let handle = Uuid::new_v4();
        let tasks = Arc::clone(&self.tasks);
        let fired = self.fired.clone();

        // Hold the lock across spawn so the task cannot remove itself before
        // it has been registered.
        let mut registry = self.tasks.lock();
        let task = runtime.spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            if tasks.lock().remove(&handle).is_some() {
                let _ = fired.send(handle);
            }
        });
        registry.insert(handle, task);
        Ok(handle)
    }

    fn cancel_timeout(&self, handle: TimeoutHandle) -> bool {
        match self.tasks.lock().remove(&handle) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}
