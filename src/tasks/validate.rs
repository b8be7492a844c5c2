//! Boundary between untrusted JSON and a trusted `TaskDraft`.
//!
//! One explicit validation function per entity: takes the raw body, returns
//! either the validated draft or a field-keyed error map whose serialization
//! is exactly the 400 response body.

use serde_json::Value;
use std::collections::BTreeMap;

use super::TaskDraft;

/// Storage rejects anything longer — validated here first for a clean 400.
pub const TITLE_MAX_CHARS: usize = 200;

/// Field name → error messages, ordered for stable output.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors not attributable to a single field (e.g. a non-object body).
pub const NON_FIELD: &str = "non_field_errors";

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

/// Validate a candidate Task representation.
///
/// Rules:
/// - body must be a JSON object;
/// - `title` required, a non-blank string of at most 200 characters;
/// - `description` optional string; null and omitted both mean absent;
/// - `completed` optional boolean, defaults to false;
/// - unknown fields are ignored.
pub fn validate_task_body(body: &Value) -> Result<TaskDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let Some(map) = body.as_object() else {
        push(&mut errors, NON_FIELD, "expected a JSON object");
        return Err(errors);
    };

    let title = match map.get("title") {
        None | Some(Value::Null) => {
            push(&mut errors, "title", "this field is required");
            String::new()
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                push(&mut errors, "title", "this field may not be blank");
            } else if s.chars().count() > TITLE_MAX_CHARS {
                push(
                    &mut errors,
                    "title",
                    format!("ensure this field has no more than {TITLE_MAX_CHARS} characters"),
                );
            }
            s.clone()
        }
        Some(_) => {
            push(&mut errors, "title", "must be a string");
            String::new()
        }
    };

    let description = match map.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            push(&mut errors, "description", "must be a string");
            None
        }
    };

    let completed = match map.get("completed") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            push(&mut errors, "completed", "must be a boolean");
            false
        }
    };

    if errors.is_empty() {
        Ok(TaskDraft {
            title,
            description,
            completed,
        })
    } else {
        Err(errors)
    }
}
