use crate::error::{Error, Result};
use serde_json::Value as JsonValue;

/// Checks the status API payload and returns the most recent homework, if any.
///
/// Only the first element of `homeworks` is considered; the API lists the
/// newest submission first. An empty list is a normal "nothing new" answer.
pub fn check_response(response: &JsonValue) -> Result<Option<&JsonValue>> {
    tracing::debug!("Checking API response");
    let object = response
        .as_object()
        .ok_or_else(|| Error::Shape(format!("response is not an object: {}", kind(response))))?;

    let homeworks = match object.get("homeworks") {
        None | Some(JsonValue::Null) => {
            return Err(Error::MissingKey("homeworks".to_string()));
        }
        Some(value) => value,
    };

    let list = homeworks.as_array().ok_or_else(|| {
        Error::Shape(format!("\"homeworks\" is not a list: {}", kind(homeworks)))
    })?;

    if list.is_empty() {
        tracing::debug!("\"homeworks\" is empty, no new statuses");
    }
    Ok(list.first())
}

/// `current_date` reported by the API, when present.
pub fn current_date(response: &JsonValue) -> Option<i64> {
    response.get("current_date").and_then(JsonValue::as_i64)
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn returns_first_homework() {
        let body = json!({
            "homeworks": [
                { "homework_name": "hw2", "status": "approved" },
                { "homework_name": "hw1", "status": "rejected" }
            ],
            "current_date": 1_700_000_000
        });
        let first = check_response(&body).unwrap().unwrap();
        assert_eq!(first["homework_name"], "hw2");
        assert_eq!(current_date(&body), Some(1_700_000_000));
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let body = json!({ "homeworks": [], "current_date": 1 });
        assert!(check_response(&body).unwrap().is_none());
    }

    #[test]
    fn missing_or_null_key_is_missing_key() {
        assert!(matches!(
            check_response(&json!({ "current_date": 1 })),
            Err(Error::MissingKey(k)) if k == "homeworks"
        ));
        assert!(matches!(
            check_response(&json!({ "homeworks": null })),
            Err(Error::MissingKey(_))
        ));
    }

    #[test]
    fn wrong_shapes_are_shape_errors() {
        assert!(matches!(check_response(&json!([1, 2])), Err(Error::Shape(_))));
        assert!(matches!(
            check_response(&json!({ "homeworks": "not-a-list" })),
            Err(Error::Shape(m)) if m.contains("string")
        ));
        assert!(matches!(
            check_response(&json!({ "homeworks": { "hw": 1 } })),
            Err(Error::Shape(_))
        ));
    }
}
