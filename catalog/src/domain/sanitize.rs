//! Field sanitisation for untrusted payloads.
//!
//! Downstream stores interpolate record fields into query strings, so every
//! apostrophe in a string value is rewritten to a backtick before assembly.
//! Sanitisation is total: non-string values pass through untouched and no
//! input can make it fail.

use serde_json::Value;

const APOSTROPHE: char = '\'';
const BACKTICK: &str = "`";

/// Replace every apostrophe in `value` with a backtick.
pub fn sanitize_str(value: &str) -> String {
    value.replace(APOSTROPHE, BACKTICK)
}

/// Sanitise a string in place, avoiding reallocation when already clean.
pub fn sanitize_string(value: &mut String) {
    if value.contains(APOSTROPHE) {
        *value = sanitize_str(value);
    }
}

/// Sanitise an optional string field in place.
pub fn sanitize_opt(value: &mut Option<String>) {
    if let Some(value) = value {
        sanitize_string(value);
    }
}

/// Sanitise every entry of a string list in place.
pub fn sanitize_list(values: &mut [String]) {
    for value in values {
        sanitize_string(value);
    }
}

/// Sanitise every string value in an arbitrary JSON payload.
///
/// Walks objects and arrays recursively; numbers, booleans, and nulls pass
/// through unchanged.
///
/// # Examples
/// ```
/// use catalog::domain::sanitize::sanitize_value;
/// use serde_json::json;
///
/// let sanitised = sanitize_value(json!({ "producerName": "O'Brien", "version": 3 }));
/// assert_eq!(sanitised, json!({ "producerName": "O`Brien", "version": 3 }));
/// ```
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize_str(&text)),
        Value::Array(entries) => Value::Array(entries.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, entry)| (key, sanitize_value(entry)))
                .collect(),
        ),
        other => other,
    }
}

/// Payloads that can rewrite their own string fields.
///
/// Implementations touch every string-valued field explicitly, so derived
/// fields and non-string values are never rewritten by accident.
pub trait Sanitize {
    /// Return the payload with every string field sanitised.
    #[must_use]
    fn sanitized(self) -> Self;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(json!({ "name": "name" }), json!({ "name": "name" }))]
    #[case(json!({ "name": "na'me" }), json!({ "name": "na`me" }))]
    #[case(
        json!({ "name": "na'me", "name2": "name'2" }),
        json!({ "name": "na`me", "name2": "name`2" })
    )]
    fn replaces_apostrophes_in_string_values(
        #[case] payload: serde_json::Value,
        #[case] expected: serde_json::Value,
    ) {
        assert_eq!(sanitize_value(payload), expected);
    }

    #[test]
    fn leaves_non_string_values_untouched() {
        let payload = json!({
            "productVersion": 2,
            "published": true,
            "accuracy": 1.5,
            "missing": null,
        });
        assert_eq!(sanitize_value(payload.clone()), payload);
    }

    #[test]
    fn walks_nested_objects_and_arrays() {
        let payload = json!({
            "links": [{ "name": "it's a link" }],
            "nested": { "region": ["North's edge"] },
        });
        let expected = json!({
            "links": [{ "name": "it`s a link" }],
            "nested": { "region": ["North`s edge"] },
        });
        assert_eq!(sanitize_value(payload), expected);
    }

    #[test]
    fn clean_input_is_returned_unchanged() {
        assert_eq!(sanitize_str("no quotes here"), "no quotes here");
    }

    #[test]
    fn list_entries_are_sanitised_in_place() {
        let mut values = vec!["O'Brien".to_owned(), "plain".to_owned()];
        sanitize_list(&mut values);
        assert_eq!(values, vec!["O`Brien".to_owned(), "plain".to_owned()]);
    }
}
