//! Stack list normalization.
//!
//! Unique responsibility: turn the loosely-shaped `/api/stacks` payload into
//! [`StackResponse`] records. The backend answers either with a bare array or
//! with `{"stacks": [...]}`, and uses several synonyms for the same fields.
//!
//! Rules:
//! - name from `name` | `stack` | `stack_name`, string values only
//! - compose from `compose` | `manifest`, status from `status`
//! - numbers found where text is expected are rendered in plain decimal
//! - booleans, objects, arrays and null count as absent
//! - items without a name are skipped

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::dockhand_error::DockhandError;
use crate::dockhand_types::{StackContainerDetail, StackResponse};

type Item = Map<String, Value>;

const NAME_KEYS: [&str; 3] = ["name", "stack", "stack_name"];
const COMPOSE_KEYS: [&str; 2] = ["compose", "manifest"];

/// Accepted shapes of the stack list payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackListShape {
    /// `[ {...}, ... ]`
    Bare(Vec<Item>),
    /// `{ "stacks": [ {...}, ... ] }`
    Wrapped(Vec<Item>),
}

/// Why a stack list payload could not be decoded.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Not JSON, or JSON of the wrong type.
    #[error("invalid stack list json: {0}")]
    Json(#[from] serde_json::Error),

    /// An object without a `stacks` field.
    #[error("unexpected stack list response shape")]
    MissingStacksField,
}

impl ShapeError {
    /// Attach the HTTP status of the response the payload came from.
    #[must_use]
    pub fn into_dockhand_error(self, status: StatusCode) -> DockhandError {
        match self {
            Self::Json(source) => DockhandError::Decode { status, source },
            Self::MissingStacksField => DockhandError::UnexpectedShape { status },
        }
    }
}

impl StackListShape {
    /// Decode as a bare array first, then as a wrapping object.
    ///
    /// `null`, at the top level or as the `stacks` value, is an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Json`] when the payload is neither shape and
    /// [`ShapeError::MissingStacksField`] for an object without `stacks`.
    pub fn decode(raw: &[u8]) -> Result<Self, ShapeError> {
        if let Ok(items) = serde_json::from_slice::<Option<Vec<Item>>>(raw) {
            return Ok(Self::Bare(items.unwrap_or_default()));
        }

        let mut object: Item = serde_json::from_slice(raw)?;
        let stacks = object
            .remove("stacks")
            .ok_or(ShapeError::MissingStacksField)?;
        let items = Option::<Vec<Item>>::deserialize(stacks)?;

        Ok(Self::Wrapped(items.unwrap_or_default()))
    }

    /// Raw items, regardless of shape.
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        match self {
            Self::Bare(items) | Self::Wrapped(items) => items,
        }
    }
}

/// Decode and normalize a stack list payload.
///
/// # Errors
///
/// See [`StackListShape::decode`].
pub fn parse_stacks(raw: &[u8]) -> Result<Vec<StackResponse>, ShapeError> {
    let items = StackListShape::decode(raw)?.into_items();
    Ok(items.iter().filter_map(to_stack).collect())
}

fn to_stack(item: &Item) -> Option<StackResponse> {
    let name = NAME_KEYS
        .iter()
        .find_map(|key| match item.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        })
        .filter(|name| !name.is_empty())?;

    Some(StackResponse {
        name,
        compose: first_string(item, &COMPOSE_KEYS),
        status: first_string(item, &["status"]),
        containers: string_entries(item.get("containers")),
        container_details: container_details(item.get("containerDetails")),
    })
}

/// First key holding a string or number, rendered as text.
fn first_string(item: &Item, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(coerce_to_string))
        .unwrap_or_default()
}

fn string_entries(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn container_details(value: Option<&Value>) -> Vec<StackContainerDetail> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|m| StackContainerDetail {
            id: first_string(m, &["id"]),
            name: first_string(m, &["name"]),
            service: first_string(m, &["service"]),
            state: first_string(m, &["state"]),
            status: first_string(m, &["status"]),
            health: first_string(m, &["health"]),
            image: first_string(m, &["image"]),
            restart_count: m.get("restartCount").map_or(0, coerce_to_i64),
        })
        .collect()
}

/// Render a loosely-typed JSON value as text.
///
/// Strings pass through; numbers use plain decimal notation without exponent
/// or trailing zeros. Any other type yields `None`.
#[must_use]
pub fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Some(format!("{f}")),
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}

/// Read a loosely-typed JSON value as an integer.
///
/// Integers pass through, floats are truncated (saturating), numeric strings
/// are parsed. Anything else yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_array_is_normalized() {
        let stacks = parse_stacks(br#"[{"name":"a","compose":"x"}]"#).unwrap();
        assert_eq!(
            stacks,
            vec![StackResponse {
                name: "a".to_string(),
                compose: "x".to_string(),
                ..StackResponse::default()
            }]
        );
    }

    #[test]
    fn wrapped_object_uses_name_synonyms() {
        let stacks = parse_stacks(br#"{"stacks":[{"stack_name":"b"}]}"#).unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].name, "b");
        assert_eq!(stacks[0].compose, "");
    }

    #[test]
    fn object_without_stacks_field_is_rejected() {
        let err = parse_stacks(br#"{"unexpected":1}"#).unwrap_err();
        assert!(matches!(err, ShapeError::MissingStacksField));
        assert_eq!(err.to_string(), "unexpected stack list response shape");

        let err = err.into_dockhand_error(StatusCode::OK);
        assert!(matches!(err, DockhandError::UnexpectedShape { status } if status == StatusCode::OK));
    }

    #[test]
    fn numeric_name_is_skipped() {
        assert!(parse_stacks(br#"[{"name":123}]"#).unwrap().is_empty());
    }

    #[test]
    fn non_string_name_falls_through_to_synonym() {
        let stacks = parse_stacks(br#"[{"name":true,"stack":"web"}]"#).unwrap();
        assert_eq!(stacks[0].name, "web");
    }

    #[test]
    fn items_without_name_are_skipped() {
        let stacks = parse_stacks(br#"[{"compose":"x"},{"name":""},{"name":"ok"}]"#).unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].name, "ok");
    }

    #[test]
    fn numeric_content_fields_are_rendered_as_text() {
        let stacks = parse_stacks(br#"[{"name":"a","manifest":42,"status":1.5}]"#).unwrap();
        assert_eq!(stacks[0].compose, "42");
        assert_eq!(stacks[0].status, "1.5");
    }

    #[test]
    fn null_stacks_is_empty() {
        assert!(parse_stacks(br#"{"stacks":null}"#).unwrap().is_empty());
        assert!(parse_stacks(b"null").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = parse_stacks(b"<html>").unwrap_err();
        assert!(matches!(err, ShapeError::Json(_)));
        let err = err.into_dockhand_error(StatusCode::OK);
        assert!(matches!(err, DockhandError::Decode { .. }));

        assert!(matches!(parse_stacks(br#"{"stacks":"nope"}"#), Err(ShapeError::Json(_))));
    }

    #[test]
    fn containers_and_details_are_parsed_leniently() {
        let raw = br#"[{
            "name": "web",
            "status": "running",
            "containers": ["web-1", "", 7, "web-2"],
            "containerDetails": [
                {"id": "abc", "name": "web-1", "service": "app", "restartCount": "3"},
                "garbage",
                {"id": 99, "restartCount": 2.9, "health": null}
            ]
        }]"#;
        let stacks = parse_stacks(raw).unwrap();
        let stack = &stacks[0];

        assert_eq!(stack.containers, vec!["web-1", "web-2"]);
        assert_eq!(stack.container_details.len(), 2);
        assert_eq!(stack.container_details[0].service, "app");
        assert_eq!(stack.container_details[0].restart_count, 3);
        assert_eq!(stack.container_details[1].id, "99");
        assert_eq!(stack.container_details[1].restart_count, 2);
        assert_eq!(stack.container_details[1].health, "");
    }

    #[test]
    fn shape_is_reported() {
        assert!(matches!(StackListShape::decode(b"[]"), Ok(StackListShape::Bare(_))));
        assert!(matches!(
            StackListShape::decode(br#"{"stacks":[]}"#),
            Ok(StackListShape::Wrapped(_))
        ));
    }

    #[test]
    fn coerce_to_string_renders_plain_decimals() {
        assert_eq!(coerce_to_string(&json!("x")).as_deref(), Some("x"));
        assert_eq!(coerce_to_string(&json!(42)).as_deref(), Some("42"));
        assert_eq!(coerce_to_string(&json!(-7)).as_deref(), Some("-7"));
        assert_eq!(coerce_to_string(&json!(3.0)).as_deref(), Some("3"));
        assert_eq!(coerce_to_string(&json!(0.25)).as_deref(), Some("0.25"));
        assert_eq!(coerce_to_string(&json!(1e21)).as_deref(), Some("1000000000000000000000"));
        assert_eq!(coerce_to_string(&json!(u64::MAX)).as_deref(), Some("18446744073709551615"));
    }

    #[test]
    fn coerce_to_string_treats_other_types_as_absent() {
        for value in [json!(null), json!(true), json!([1]), json!({"a": 1})] {
            assert_eq!(coerce_to_string(&value), None, "{value}");
        }
    }

    #[test]
    fn coerce_to_i64_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_to_i64(&json!(5)), 5);
        assert_eq!(coerce_to_i64(&json!(5.9)), 5);
        assert_eq!(coerce_to_i64(&json!("12")), 12);
        assert_eq!(coerce_to_i64(&json!("12a")), 0);
        assert_eq!(coerce_to_i64(&json!(false)), 0);
        assert_eq!(coerce_to_i64(&json!(null)), 0);
    }
}
