//! Behaviour tests for banding final priorities into classes.

use std::cell::Cell;

use firecut_core::PriorityClass;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[fixture]
fn priority() -> Cell<f64> {
    Cell::new(f64::NAN)
}

#[fixture]
fn class() -> Cell<Option<PriorityClass>> {
    Cell::new(None)
}

#[given("a final priority of 2.0")]
fn given_two(#[from(priority)] priority: &Cell<f64>) {
    priority.set(2.0);
}

#[given("a final priority of 0.0")]
fn given_zero(#[from(priority)] priority: &Cell<f64>) {
    priority.set(0.0);
}

#[given("a final priority of 10.0")]
fn given_ten(#[from(priority)] priority: &Cell<f64>) {
    priority.set(10.0);
}

#[when("the priority is classified")]
fn when_classified(
    #[from(priority)] priority: &Cell<f64>,
    #[from(class)] class: &Cell<Option<PriorityClass>>,
) {
    class.set(Some(PriorityClass::from_score(priority.get())));
}

#[then("the class is Low")]
fn then_low(#[from(class)] class: &Cell<Option<PriorityClass>>) {
    assert_eq!(class.get(), Some(PriorityClass::Low));
}

#[then("the class is Very Low")]
fn then_very_low(#[from(class)] class: &Cell<Option<PriorityClass>>) {
    assert_eq!(class.get(), Some(PriorityClass::VeryLow));
}

#[then("the class is Very High")]
fn then_very_high(#[from(class)] class: &Cell<Option<PriorityClass>>) {
    assert_eq!(class.get(), Some(PriorityClass::VeryHigh));
}

#[scenario(path = "tests/features/classification.feature", index = 0)]
fn two_is_low(priority: Cell<f64>, class: Cell<Option<PriorityClass>>) {
    let _ = (priority, class);
}

#[scenario(path = "tests/features/classification.feature", index = 1)]
fn zero_is_very_low(priority: Cell<f64>, class: Cell<Option<PriorityClass>>) {
    let _ = (priority, class);
}

#[scenario(path = "tests/features/classification.feature", index = 2)]
fn ten_is_very_high(priority: Cell<f64>, class: Cell<Option<PriorityClass>>) {
    let _ = (priority, class);
}
