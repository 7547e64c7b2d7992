//! Associative and unique-element collection scenarios, NaN stability,
//! and detection idempotence.

use refguard_core::{Key, MutationResult, MutationTracker, Value};

fn mutated_path(result: &MutationResult) -> String {
    result.joined_path().expect("expected a mutation")
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

#[test]
fn overwriting_a_map_entry_in_place() {
    let scores = Value::map([(Value::from("bar"), Value::from(9000))]);
    let state = Value::record([("scores", scores.clone())]);
    let tracker = MutationTracker::track(&state).unwrap();

    scores
        .as_map()
        .unwrap()
        .borrow_mut()
        .insert(Key::from("bar"), Value::from(9001));

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "scores.bar");
}

#[test]
fn clearing_a_map_reports_the_first_former_key() {
    let scores = Value::map([
        (Value::from("bar"), Value::from(9000)),
        (Value::from("qux"), Value::from(1)),
    ]);
    let state = Value::record([("scores", scores.clone())]);
    let tracker = MutationTracker::track(&state).unwrap();

    scores.as_map().unwrap().borrow_mut().clear();

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "scores.bar");
}

#[test]
fn non_string_map_keys_appear_in_the_path() {
    let by_id = Value::map([(Value::Number(2.0), Value::from("two"))]);
    let state = Value::record([("by_id", by_id.clone())]);
    let tracker = MutationTracker::track(&state).unwrap();

    by_id
        .as_map()
        .unwrap()
        .borrow_mut()
        .insert(Key::Value(Value::Number(2.0)), Value::from("deux"));

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "by_id.2");
    assert_eq!(
        result.path().unwrap().last().unwrap(),
        &Key::Value(Value::Number(2.0))
    );
}

#[test]
fn replacing_the_whole_map_is_caught_by_the_parent_anchor() {
    let state = Value::record([("scores", Value::map([(Value::from("bar"), Value::from(1))]))]);
    let tracker = MutationTracker::track(&state).unwrap();

    state
        .as_record()
        .unwrap()
        .borrow_mut()
        .insert("scores".to_string(), Value::map([(Value::from("bar"), Value::from(1))]));

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "scores");
}

// ---------------------------------------------------------------------------
// Sets: positional keys at iteration time
// ---------------------------------------------------------------------------

#[test]
fn adding_to_a_set() {
    let tags = Value::set([Value::from("a"), Value::from("b")]);
    let state = Value::record([("tags", tags.clone())]);
    let tracker = MutationTracker::track(&state).unwrap();

    tags.as_set().unwrap().borrow_mut().push(Value::from("c"));

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "tags.2");
}

#[test]
fn removing_an_early_set_element_shifts_later_positions() {
    // Positions are assigned at iteration time, so removing "a" makes the
    // untouched "b" report under its *former neighbour's* index. Documented
    // behavior, surprising on purpose.
    let tags = Value::set([Value::from("a"), Value::from("b")]);
    let state = Value::record([("tags", tags.clone())]);
    let tracker = MutationTracker::track(&state).unwrap();

    tags.as_set().unwrap().borrow_mut().remove(0);

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "tags.0");
}

// ---------------------------------------------------------------------------
// NaN stability
// ---------------------------------------------------------------------------

#[test]
fn unchanged_nan_is_not_a_mutation() {
    let state = Value::record([("a", Value::Number(f64::NAN))]);
    let tracker = MutationTracker::track(&state).unwrap();
    assert_eq!(tracker.detect_mutations().unwrap(), MutationResult::Clean);
}

#[test]
fn rewriting_nan_with_nan_is_not_a_mutation() {
    let state = Value::record([("a", Value::Number(f64::NAN))]);
    let tracker = MutationTracker::track(&state).unwrap();

    state
        .as_record()
        .unwrap()
        .borrow_mut()
        .insert("a".to_string(), Value::Number(f64::NAN));

    assert_eq!(tracker.detect_mutations().unwrap(), MutationResult::Clean);
}

#[test]
fn writing_nan_over_a_number_is_a_mutation() {
    let state = Value::record([("a", Value::Number(5.0))]);
    let tracker = MutationTracker::track(&state).unwrap();

    state
        .as_record()
        .unwrap()
        .borrow_mut()
        .insert("a".to_string(), Value::Number(f64::NAN));

    let result = tracker.detect_mutations().unwrap();
    assert_eq!(mutated_path(&result), "a");
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn detection_result_is_stable_across_repeated_calls() {
    let state = Value::record([("foo", Value::array([Value::from(2), Value::from(3)]))]);
    let tracker = MutationTracker::track(&state).unwrap();

    assert_eq!(tracker.detect_mutations().unwrap(), MutationResult::Clean);
    assert_eq!(tracker.detect_mutations().unwrap(), MutationResult::Clean);

    state
        .field("foo")
        .unwrap()
        .as_array()
        .unwrap()
        .borrow_mut()
        .push(Value::from(4));

    let first = tracker.detect_mutations().unwrap();
    let second = tracker.detect_mutations().unwrap();
    assert_eq!(first, second);
    assert_eq!(mutated_path(&first), "foo.2");
}
