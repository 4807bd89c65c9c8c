//! Progressive-reveal masking driven through virtual time.

mod common;

use common::Harness;
use escra_app::{InputOutcome, MaskedDigitInput, MaskedFieldId, MaskedFieldKind};
use escra_core::effects::TimerEffects;
use escra_testkit::ControllableTimer;
use proptest::prelude::*;

fn type_into(h: &mut Harness, id: MaskedFieldId, digits: &str) {
    for digit in digits.chars() {
        let raw = format!("{}{}", h.wizard.masked(id).display(), digit);
        h.wizard.masked_input(id, &raw).unwrap();
    }
}

fn backspace(h: &mut Harness, id: MaskedFieldId) -> InputOutcome {
    let display = h.wizard.masked(id).display().to_string();
    let shorter: String = display.chars().take(display.chars().count().saturating_sub(1)).collect();
    h.wizard.masked_input(id, &shorter).unwrap()
}

#[test]
fn test_typing_accumulates_actual_digits() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerRouting, "123");
    let field = h.wizard.masked(MaskedFieldId::BuyerRouting);
    assert_eq!(field.actual(), "123");
    assert_eq!(field.display(), "**3");
    assert_eq!(field.caret(), 3);
}

#[test]
fn test_tenth_digit_ignored_on_routing() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::SellerRouting, "123456789");
    let raw = format!("{}0", h.wizard.masked(MaskedFieldId::SellerRouting).display());
    assert_eq!(
        h.wizard.masked_input(MaskedFieldId::SellerRouting, &raw),
        Ok(InputOutcome::Ignored)
    );
    assert_eq!(h.wizard.masked(MaskedFieldId::SellerRouting).actual(), "123456789");
}

#[test]
fn test_account_holds_twelve_digits() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerAccount, "1234567890123");
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerAccount).actual(), "123456789012");
}

#[test]
fn test_delete_masks_everything() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerRouting, "123");
    assert_eq!(backspace(&mut h, MaskedFieldId::BuyerRouting), InputOutcome::Deleted);
    let field = h.wizard.masked(MaskedFieldId::BuyerRouting);
    assert_eq!(field.actual(), "12");
    assert_eq!(field.display(), "**");
    assert_eq!(field.pending_timer(), None);
}

#[test]
fn test_digit_masked_after_reveal_window() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerRouting, "7");
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerRouting).display(), "7");

    h.tick(999);
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerRouting).display(), "7");

    h.tick(1);
    let field = h.wizard.masked(MaskedFieldId::BuyerRouting);
    assert_eq!(field.display(), "*");
    assert_eq!(field.actual(), "7");
}

#[test]
fn test_new_keystroke_restarts_window() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerRouting, "1");
    h.tick(600);
    type_into(&mut h, MaskedFieldId::BuyerRouting, "2");
    h.tick(600);
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerRouting).display(), "*2");
    h.tick(400);
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerRouting).display(), "**");
    assert_eq!(h.timer.pending_count(), 0);
}

#[test]
fn test_fields_keep_independent_timers() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerRouting, "1");
    h.tick(500);
    type_into(&mut h, MaskedFieldId::SellerRouting, "2");
    h.tick(500);
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerRouting).display(), "*");
    assert_eq!(h.wizard.masked(MaskedFieldId::SellerRouting).display(), "2");
}

#[test]
fn test_reveal_toggle_on_account_only() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::SellerAccount, "4455");
    assert_eq!(h.wizard.set_masked_revealed(MaskedFieldId::SellerAccount, true), Ok(true));
    assert_eq!(h.wizard.masked(MaskedFieldId::SellerAccount).display(), "4455");
    h.tick(5000);
    assert_eq!(h.wizard.masked(MaskedFieldId::SellerAccount).display(), "4455");

    assert_eq!(h.wizard.set_masked_revealed(MaskedFieldId::SellerAccount, false), Ok(true));
    assert_eq!(h.wizard.masked(MaskedFieldId::SellerAccount).display(), "****");

    assert_eq!(h.wizard.set_masked_revealed(MaskedFieldId::SellerRouting, true), Ok(false));
}

#[test]
fn test_close_cancels_pending_timers() {
    let mut h = Harness::new();
    type_into(&mut h, MaskedFieldId::BuyerRouting, "1");
    type_into(&mut h, MaskedFieldId::BuyerAccount, "2");
    assert_eq!(h.timer.pending_count(), 2);
    h.wizard.close();
    assert_eq!(h.timer.pending_count(), 0);
    assert!(h.timer.advance(2000).is_empty());
}

#[test]
fn test_unavailable_timer_masks_immediately() {
    let mut h = Harness::new();
    h.timer.set_unavailable(true);
    type_into(&mut h, MaskedFieldId::BuyerRouting, "9");
    assert_eq!(h.wizard.masked(MaskedFieldId::BuyerRouting).display(), "*");
}

#[derive(Debug, Clone)]
enum Event {
    Type(char),
    Paste(String),
    Backspace,
    Tick(u64),
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => proptest::char::range('0', '9').prop_map(Event::Type),
        1 => "[0-9a-z*-]{1,6}".prop_map(Event::Paste),
        2 => Just(Event::Backspace),
        2 => (0u64..1500).prop_map(Event::Tick),
    ]
}

proptest! {
    #[test]
    fn prop_masked_field_invariants(
        account in any::<bool>(),
        events in proptest::collection::vec(event(), 0..60),
    ) {
        let kind = if account { MaskedFieldKind::Account } else { MaskedFieldKind::Routing };
        let timer = ControllableTimer::new();
        let mut field = MaskedDigitInput::new(kind);
        let mut expected = String::new();

        for event in events {
            match event {
                Event::Type(d) => {
                    let raw = format!("{}{}", field.display(), d);
                    field.on_input(&raw, &timer, 1000);
                    if expected.len() < kind.capacity() {
                        expected.push(d);
                    }
                }
                Event::Paste(text) => {
                    let raw = format!("{}{}", field.display(), text);
                    field.on_input(&raw, &timer, 1000);
                    if expected.len() < kind.capacity() {
                        if let Some(d) = raw.chars().rev().find(char::is_ascii_digit) {
                            expected.push(d);
                        }
                    }
                }
                Event::Backspace => {
                    let display = field.display().to_string();
                    let shorter: String =
                        display.chars().take(display.chars().count().saturating_sub(1)).collect();
                    field.on_input(&shorter, &timer, 1000);
                    expected.pop();
                }
                Event::Tick(ms) => {
                    for handle in timer.advance(ms) {
                        field.on_timeout(handle);
                    }
                }
            }

            prop_assert_eq!(field.actual(), expected.as_str());
            prop_assert!(field.actual().len() <= kind.capacity());
            prop_assert_eq!(field.display().chars().count(), field.actual().len());
            prop_assert!(timer.pending_count() <= 1);

            let clear: Vec<usize> = field
                .display()
                .char_indices()
                .filter(|(_, c)| *c != '*')
                .map(|(i, _)| i)
                .collect();
            prop_assert!(clear.len() <= 1);
            if let Some(&i) = clear.first() {
                prop_assert_eq!(i + 1, field.actual().len());
                prop_assert!(field.pending_timer().is_some());
            }
        }
    }
}

#[test]
fn test_timer_effects_handle_is_shared() {
    let timer = ControllableTimer::new();
    let clone = timer.clone();
    let handle = clone.set_timeout(10).unwrap();
    assert_eq!(timer.advance(10), vec![handle]);
}
