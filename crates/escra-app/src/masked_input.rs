//! # Masked Digit Input
//!
//! Progressive-reveal masking for fixed-length bank identifiers.
//!
//! Each keystroke event carries the raw text of the input element. The
//! field compares it with the digits it already tracks:
//!
//! - a shorter raw value is a deletion: one digit is popped and the display
//!   becomes all asterisks,
//! - otherwise the last digit found in the raw value is appended, shown in
//!   clear for one reveal window, then masked when the timer fires.
//!
//! Only one digit is accepted per event, even when several are pasted.
//! The field owns at most one live timer handle. Any handle delivered to
//! [`MaskedDigitInput::on_timeout`] that is not the live one is ignored.

use escra_core::effects::{TimeoutHandle, TimerEffects};
use std::fmt;

const MASK: char = '*';

// ============================================================================
// Field Kinds
// ============================================================================

/// Kind of masked field, which fixes its capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskedFieldKind {
    /// ABA routing number
    Routing,
    /// Bank account number
    Account,
}

impl MaskedFieldKind {
    /// Maximum number of digits.
    #[must_use]
    pub fn capacity(self) -> usize {
        match self {
            Self::Routing => 9,
            Self::Account => 12,
        }
    }

    /// Whether the permanent-reveal toggle is offered.
    #[must_use]
    pub fn supports_reveal(self) -> bool {
        matches!(self, Self::Account)
    }
}

/// The four masked inputs of the details step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskedFieldId {
    BuyerRouting,
    SellerRouting,
    BuyerAccount,
    SellerAccount,
}

impl MaskedFieldId {
    /// All masked fields in form order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::BuyerRouting,
            Self::BuyerAccount,
            Self::SellerRouting,
            Self::SellerAccount,
        ]
    }

    #[must_use]
    pub fn kind(self) -> MaskedFieldKind {
        match self {
            Self::BuyerRouting | Self::SellerRouting => MaskedFieldKind::Routing,
            Self::BuyerAccount | Self::SellerAccount => MaskedFieldKind::Account,
        }
    }
}

impl fmt::Display for MaskedFieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BuyerRouting => "buyer routing number",
            Self::SellerRouting => "seller routing number",
            Self::BuyerAccount => "buyer account number",
            Self::SellerAccount => "seller account number",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Input State
// ============================================================================

/// Result of one input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// A digit was appended
    Inserted(char),
    /// The last digit was removed
    Deleted,
    /// Nothing changed (field full, or no digit in the event)
    Ignored,
}

/// State of a single masked field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskedDigitInput {
    kind: MaskedFieldKind,
    actual: String,
    display: String,
    pending: Option<TimeoutHandle>,
    revealed: bool,
}

impl MaskedDigitInput {
    /// Create an empty field.
    #[must_use]
    pub fn new(kind: MaskedFieldKind) -> Self {
        Self {
            kind,
            actual: String::new(),
            display: String::new(),
            pending: None,
            revealed: false,
        }
    }

    /// Key-intercept filter: only ASCII digits reach the field.
    #[must_use]
    pub fn key_allowed(key: char) -> bool {
        key.is_ascii_digit()
    }

    #[must_use]
    pub fn kind(&self) -> MaskedFieldKind {
        self.kind
    }

    /// The real digits.
    #[must_use]
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// What the input element shows.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Caret position after the last event; always the end of the display.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.display.chars().count()
    }

    /// Whether a reveal timer is pending.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimeoutHandle> {
        self.pending
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.actual.len() >= self.kind.capacity()
    }

    /// Apply one change event carrying the element's raw text.
    pub fn on_input(
        &mut self,
        raw: &str,
        timer: &dyn TimerEffects,
        reveal_window_ms: u64,
    ) -> InputOutcome {
        let raw_len = raw.chars().count();
        if raw_len < self.actual.len().max(1) {
            return self.delete(timer);
        }

        if self.is_full() {
            return InputOutcome::Ignored;
        }
        let Some(digit) = raw.chars().rev().find(char::is_ascii_digit) else {
            return InputOutcome::Ignored;
        };

        self.cancel_pending(timer);
        self.actual.push(digit);

        if self.revealed {
            self.display = self.actual.clone();
            return InputOutcome::Inserted(digit);
        }

        self.display = masked(self.actual.len() - 1);
        self.display.push(digit);

        match timer.set_timeout(reveal_window_ms) {
            Ok(handle) => {
                tracing::trace!(kind = ?self.kind, %handle, "reveal timer scheduled");
                self.pending = Some(handle);
            }
            Err(error) => {
                tracing::warn!(kind = ?self.kind, %error, "reveal timer unavailable; masking immediately");
                self.mask_all();
            }
        }
        InputOutcome::Inserted(digit)
    }

    /// Deliver a fired timer. Returns true when the handle was this field's
    /// live timer and the display was re-masked.
    pub fn on_timeout(&mut self, handle: TimeoutHandle) -> bool {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        if !self.revealed {
            self.mask_all();
        }
        true
    }

    /// Toggle permanent reveal. Routing fields refuse and return false.
    ///
    /// Turning reveal off masks every digit at once; no digit is shown
    /// transiently because no keystroke occurred.
    pub fn set_revealed(&mut self, revealed: bool, timer: &dyn TimerEffects) -> bool {
        if !self.kind.supports_reveal() {
            return false;
        }
        self.cancel_pending(timer);
        self.revealed = revealed;
        if revealed {
            self.display = self.actual.clone();
        } else {
            self.mask_all();
        }
        true
    }

    /// Empty the field and cancel any pending timer.
    pub fn clear(&mut self, timer: &dyn TimerEffects) {
        self.cancel_pending(timer);
        self.actual.clear();
        self.display.clear();
        self.revealed = false;
    }

    fn delete(&mut self, timer: &dyn TimerEffects) -> InputOutcome {
        self.cancel_pending(timer);
        if self.actual.pop().is_none() {
            self.display.clear();
            return InputOutcome::Ignored;
        }
        if self.revealed {
            self.display = self.actual.clone();
        } else {
            self.mask_all();
        }
        InputOutcome::Deleted
    }

    fn cancel_pending(&mut self, timer: &dyn TimerEffects) {
        if let Some(handle) = self.pending.take() {
            timer.cancel_timeout(handle);
        }
    }

    fn mask_all(&mut self) {
        self.display = masked(self.actual.len());
    }
}

fn masked(len: usize) -> String {
    std::iter::repeat(MASK).take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use escra_core::effects::TimeError;
    use parking_lot::Mutex;
    use uuid::Uuid;

    /// Records scheduled and cancelled handles; never fires on its own.
    #[derive(Default)]
    struct ManualTimer {
        scheduled: Mutex<Vec<TimeoutHandle>>,
        cancelled: Mutex<Vec<TimeoutHandle>>,
        fail: bool,
    }

    impl TimerEffects for ManualTimer {
        fn set_timeout(&self, _delay_ms: u64) -> Result<TimeoutHandle, TimeError> {
            if self.fail {
                return Err(TimeError::ServiceUnavailable {
                    reason: "no runtime".to_string(),
                });
            }
            let handle = Uuid::new_v4();
            self.scheduled.lock().push(handle);
            Ok(handle)
        }

        fn cancel_timeout(&self, handle: TimeoutHandle) -> bool {
            self.cancelled.lock().push(handle);
            true
        }
    }

    fn type_digits(field: &mut MaskedDigitInput, timer: &ManualTimer, digits: &str) {
        for d in digits.chars() {
            let raw = format!("{}{}", field.display(), d);
            field.on_input(&raw, timer, 1000);
        }
    }

    #[test]
    fn test_insert_reveals_last_digit() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        type_digits(&mut field, &timer, "12");
        assert_eq!(field.actual(), "12");
        assert_eq!(field.display(), "*2");
        assert_eq!(field.caret(), 2);
    }

    #[test]
    fn test_new_insert_cancels_previous_timer() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        type_digits(&mut field, &timer, "12");
        let scheduled = timer.scheduled.lock().clone();
        assert_eq!(scheduled.len(), 2);
        assert_eq!(*timer.cancelled.lock(), vec![scheduled[0]]);
        assert_eq!(field.pending_timer(), Some(scheduled[1]));
    }

    #[test]
    fn test_stale_timeout_ignored() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        type_digits(&mut field, &timer, "12");
        let first = timer.scheduled.lock()[0];
        assert!(!field.on_timeout(first));
        assert_eq!(field.display(), "*2");

        let live = timer.scheduled.lock()[1];
        assert!(field.on_timeout(live));
        assert_eq!(field.display(), "**");
        assert_eq!(field.actual(), "12");
    }

    #[test]
    fn test_paste_takes_only_last_digit() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Account);
        assert_eq!(field.on_input("98-76", &timer, 1000), InputOutcome::Inserted('6'));
        assert_eq!(field.actual(), "6");
    }

    #[test]
    fn test_non_digit_event_ignored() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        type_digits(&mut field, &timer, "4");
        assert_eq!(field.on_input("4a", &timer, 1000), InputOutcome::Inserted('4'));
        assert_eq!(field.on_input("**x", &timer, 1000), InputOutcome::Ignored);
        assert_eq!(field.actual(), "44");
        assert!(MaskedDigitInput::key_allowed('7'));
        assert!(!MaskedDigitInput::key_allowed('a'));
        assert!(!MaskedDigitInput::key_allowed('*'));
    }

    #[test]
    fn test_full_field_keeps_pending_timer() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        type_digits(&mut field, &timer, "123456789");
        let live = field.pending_timer();
        assert_eq!(field.on_input("********95", &timer, 1000), InputOutcome::Ignored);
        assert_eq!(field.pending_timer(), live);
        assert_eq!(field.actual(), "123456789");
    }

    #[test]
    fn test_delete_last_digit_on_empty_field() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        assert_eq!(field.on_input("", &timer, 1000), InputOutcome::Ignored);
        type_digits(&mut field, &timer, "5");
        assert_eq!(field.on_input("", &timer, 1000), InputOutcome::Deleted);
        assert_eq!(field.actual(), "");
        assert_eq!(field.display(), "");
        assert_eq!(field.pending_timer(), None);
    }

    #[test]
    fn test_timer_failure_masks_immediately() {
        let timer = ManualTimer {
            fail: true,
            ..ManualTimer::default()
        };
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Routing);
        type_digits(&mut field, &timer, "7");
        assert_eq!(field.actual(), "7");
        assert_eq!(field.display(), "*");
        assert_eq!(field.pending_timer(), None);
    }

    #[test]
    fn test_reveal_toggle_account_only() {
        let timer = ManualTimer::default();
        let mut routing = MaskedDigitInput::new(MaskedFieldKind::Routing);
        assert!(!routing.set_revealed(true, &timer));

        let mut account = MaskedDigitInput::new(MaskedFieldKind::Account);
        type_digits(&mut account, &timer, "12");
        assert!(account.set_revealed(true, &timer));
        assert_eq!(account.display(), "12");
        assert_eq!(account.pending_timer(), None);

        type_digits(&mut account, &timer, "3");
        assert_eq!(account.display(), "123");
        assert_eq!(account.pending_timer(), None);

        assert!(account.set_revealed(false, &timer));
        assert_eq!(account.display(), "***");
        assert_eq!(account.actual(), "123");
    }

    #[test]
    fn test_clear_cancels_timer() {
        let timer = ManualTimer::default();
        let mut field = MaskedDigitInput::new(MaskedFieldKind::Account);
        type_digits(&mut field, &timer, "9");
        let live = field.pending_timer().unwrap();
        field.clear(&timer);
        assert_eq!(field.actual(), "");
        assert!(timer.cancelled.lock().contains(&live));
        assert!(!field.on_timeout(live));
    }
}
