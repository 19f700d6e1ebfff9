//! Typed decoding of response bodies.
//!
//! Drip adds fields to its payloads without notice. With the `tracing` feature enabled,
//! [`deserialize_with_warnings`] reports every field the target type ignores, and the exact
//! path of the value that broke deserialization when it fails.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes `value` into `T`, logging unknown fields as warnings.
///
/// Unknown fields never fail deserialization; they are only reported.
#[cfg(feature = "tracing")]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    use std::any::type_name;

    let target = type_name::<T>();
    tracing::trace!(type_name = %target, json = %value, "deserializing response body");

    let original = value.clone();
    let mut ignored: Vec<String> = Vec::new();

    let result: T = serde_ignored::deserialize(value, |path| ignored.push(path.to_string()))
        .inspect_err(|_| {
            // serde_ignored loses the location of the failure, so decode again to find it
            let located: Result<T, _> = serde_path_to_error::deserialize(&original);
            if let Err(e) = located {
                let path = e.path().to_string();
                tracing::error!(
                    type_name = %target,
                    path = %path,
                    value = %describe(value_at(&original, &path)),
                    error = %e.inner(),
                    "deserialization failed"
                );
            }
        })?;

    for path in ignored {
        tracing::warn!(
            type_name = %target,
            field = %path,
            value = %describe(value_at(&original, &path)),
            "unknown field in Drip response"
        );
    }

    Ok(result)
}

/// Plain deserialization when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(value: Value) -> crate::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Resolves a `serde_ignored`/`serde_path_to_error` path such as `subscribers[0].?.tags.1`.
///
/// `?` markers (option wrappers) and empty segments are skipped. Returns `None` when the path
/// leaves the document or walks through a scalar.
#[cfg(feature = "tracing")]
fn value_at<'value>(root: &'value Value, path: &str) -> Option<&'value Value> {
    path.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty() && *segment != "?")
        .try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
            _ => None,
        })
}

#[cfg(feature = "tracing")]
fn describe(value: Option<&Value>) -> String {
    value.map_or_else(|| "<unable to retrieve>".to_owned(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::deserialize_with_warnings;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Subscriber {
        id: String,
        email: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Subscribers {
        subscribers: Vec<Subscriber>,
    }

    #[test]
    fn known_fields_deserialize() {
        let json = json!({
            "subscribers": [{ "id": "sub_9", "email": "a@b.com", "tags": ["vip"] }]
        });

        let result: Subscribers = deserialize_with_warnings(json).expect("valid shape");
        assert_eq!(result.subscribers[0].id, "sub_9");
        assert_eq!(result.subscribers[0].tags, vec!["vip".to_owned()]);
    }

    #[test]
    fn unknown_fields_do_not_fail() {
        let json = json!({
            "links": { "subscribers.account": "https://api.getdrip.com/v2/accounts/{id}" },
            "subscribers": [{ "id": "sub_9", "email": "a@b.com", "lifetime_value": 120 }]
        });

        let result: Subscribers = deserialize_with_warnings(json).expect("extra fields allowed");
        assert_eq!(result.subscribers.len(), 1);
        assert!(result.subscribers[0].tags.is_empty(), "tags default to empty");
    }

    #[test]
    fn missing_required_field_fails() {
        let json = json!({ "subscribers": [{ "id": "sub_9" }] });

        let result: crate::Result<Subscribers> = deserialize_with_warnings(json);
        let err = result.expect_err("email is required");
        assert_eq!(err.kind(), crate::error::Kind::Decode);
    }

    #[cfg(feature = "tracing")]
    mod paths {
        use serde_json::{Value, json};

        use super::super::{describe, value_at};

        #[test]
        fn resolves_nested_and_indexed_paths() {
            let json = json!({ "subscribers": [{ "tags": ["a", "b"] }] });

            assert_eq!(value_at(&json, "subscribers[0].tags.1"), Some(&json!("b")));
            assert_eq!(value_at(&json, "subscribers.0.?.tags[0]"), Some(&json!("a")));
            assert_eq!(value_at(&json, ""), Some(&json));
        }

        #[test]
        fn unresolvable_paths_return_none() {
            let json = json!({ "tags": ["a"], "id": "x" });

            assert_eq!(value_at(&json, "tags.5"), None);
            assert_eq!(value_at(&json, "tags.first"), None);
            assert_eq!(value_at(&json, "id.inner"), None);
        }

        #[test]
        fn describe_formats_json() {
            assert_eq!(describe(Some(&json!([1, 2]))), "[1,2]");
            assert_eq!(describe(Some(&Value::Null)), "null");
            assert_eq!(describe(None), "<unable to retrieve>");
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn warning_is_emitted_for_unknown_fields() {
        use std::sync::{Arc, Mutex};

        use tracing_subscriber::layer::SubscriberExt as _;

        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().expect("lock").extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let output = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&output);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(move || Capture(Arc::clone(&sink)))
            .with_ansi(false);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let json = json!({
                "subscribers": [{ "id": "sub_9", "email": "a@b.com", "ip_address": "10.0.0.1" }]
            });
            let _: Subscribers = deserialize_with_warnings(json).expect("extra fields allowed");
        });

        let captured = String::from_utf8(output.lock().expect("lock").clone()).expect("utf8");
        assert!(
            captured.contains("unknown field in Drip response"),
            "expected warning, got: {captured}"
        );
        assert!(captured.contains("ip_address"), "expected field name, got: {captured}");
    }
}
