//! Field shaping.
//!
//! Projects a response payload down to the client-requested subset of
//! fields. Shaping is exact: only the requested names survive, matched
//! case-insensitively against the payload's keys; nothing is auto-included.
//! Validation against the entity's declared field set happens upstream in
//! the catalog, so by the time a payload is shaped every requested name is
//! known to be valid.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// Applies a field projection to a payload.
///
/// Objects keep only the requested keys; arrays are shaped element-wise.
/// An empty request means "no shaping" and returns the payload unchanged.
///
/// # Examples
///
/// ```
/// use coursebook_api::responses::shaping::apply_shape;
/// use serde_json::json;
///
/// let course = json!({"id": "c1", "title": "Sailing", "description": "..."});
/// let shaped = apply_shape(&course, &["title".to_string()]);
/// assert_eq!(shaped, json!({"title": "Sailing"}));
/// ```
pub fn apply_shape(payload: &Value, requested: &[String]) -> Value {
    if requested.is_empty() {
        return payload.clone();
    }

    let wanted: HashSet<String> = requested.iter().map(|field| field.to_lowercase()).collect();
    shape_value(payload, &wanted)
}

fn shape_value(value: &Value, wanted: &HashSet<String>) -> Value {
    match value {
        Value::Object(fields) => {
            let mut shaped = Map::new();
            for (key, field_value) in fields {
                if wanted.contains(&key.to_lowercase()) {
                    shaped.insert(key.clone(), field_value.clone());
                }
            }
            Value::Object(shaped)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| shape_value(item, wanted)).collect())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course() -> Value {
        json!({
            "id": "c1",
            "title": "Commandeering a Ship Without Getting Caught",
            "description": "In this course you'll learn how to commandeer a ship."
        })
    }

    #[test]
    fn test_empty_request_returns_full_payload() {
        let shaped = apply_shape(&course(), &[]);
        assert_eq!(shaped, course());
    }

    #[test]
    fn test_single_field_projection() {
        let shaped = apply_shape(&course(), &["title".to_string()]);
        assert_eq!(
            shaped,
            json!({"title": "Commandeering a Ship Without Getting Caught"})
        );
    }

    #[test]
    fn test_nothing_is_auto_included() {
        let shaped = apply_shape(&course(), &["description".to_string()]);
        assert!(shaped.get("id").is_none());
        assert!(shaped.get("title").is_none());
        assert!(shaped.get("description").is_some());
    }

    #[test]
    fn test_case_insensitive_match() {
        let shaped = apply_shape(&course(), &["TITLE".to_string(), "Id".to_string()]);
        assert!(shaped.get("title").is_some());
        assert!(shaped.get("id").is_some());
        assert!(shaped.get("description").is_none());
    }

    #[test]
    fn test_array_shaped_element_wise() {
        let list = json!([
            {"id": "c1", "title": "Sailing"},
            {"id": "c2", "title": "Navigation"}
        ]);
        let shaped = apply_shape(&list, &["title".to_string()]);
        assert_eq!(
            shaped,
            json!([{"title": "Sailing"}, {"title": "Navigation"}])
        );
    }

    #[test]
    fn test_scalars_pass_through() {
        let shaped = apply_shape(&json!("just a string"), &["title".to_string()]);
        assert_eq!(shaped, json!("just a string"));
    }
}
