//! Assertions over stage outputs.

use crate::core::StageOutput;
use serde_json::Value;

/// Asserts that the output completed.
pub fn assert_completed(output: &StageOutput) {
    assert!(
        output.is_completed(),
        "Expected {} to complete, got status {:?} (reason: {:?})",
        output.agent,
        output.status,
        output.reason
    );
}

/// Asserts that the output is an error output with the given reason.
pub fn assert_error_output(output: &StageOutput, reason: &str) {
    assert!(
        !output.is_completed(),
        "Expected {} to return an error output, but it completed",
        output.agent
    );
    assert_eq!(output.reason.as_deref(), Some(reason));
}

/// Asserts that the output carries a payload field.
pub fn assert_has_field(output: &StageOutput, key: &str) {
    assert!(
        output.get(key).is_some(),
        "Expected output to contain key '{}', but it doesn't. Keys: {:?}",
        key,
        output.data.keys().collect::<Vec<_>>()
    );
}

/// Asserts the length of a module list field.
pub fn assert_module_count(output: &StageOutput, key: &str, expected: usize) {
    let actual = output.get(key).and_then(Value::as_array).map(Vec::len);
    assert_eq!(
        actual,
        Some(expected),
        "Expected {expected} entries in '{key}', got {actual:?}"
    );
}

/// Asserts that every payload field of `upstream` reappears unchanged in
/// `downstream`, except the keys in `replaced`.
pub fn assert_passthrough(upstream: &StageOutput, downstream: &StageOutput, replaced: &[&str]) {
    for (key, value) in &upstream.data {
        if replaced.contains(&key.as_str()) {
            continue;
        }
        assert_eq!(
            downstream.get(key),
            Some(value),
            "Field '{}' was not passed through from {} to {}",
            key,
            upstream.agent,
            downstream.agent
        );
    }
}
