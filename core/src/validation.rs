use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::{
    error::{FieldViolation, Result, TaskError},
    models::{TaskFields, TaskId, TaskPayload},
};

/// Payload fields in declaration order, used to report violations stably
const FIELD_ORDER: [&str; 5] = ["title", "author", "description", "priority", "complete"];

/// Validation utilities for task input
pub struct TaskValidator;

impl TaskValidator {
    /// Check every declared constraint on a payload and, if all hold, turn it
    /// into the fields that storage accepts.
    ///
    /// # Returns
    /// * `Ok(TaskFields)` - If every constraint holds
    /// * `Err(TaskError::Validation)` - One violation per failing field
    pub fn validate_payload(payload: TaskPayload) -> Result<TaskFields> {
        payload
            .validate()
            .map_err(|errors| TaskError::Validation(Self::violations(&errors)))?;

        Ok(TaskFields {
            title: payload.title,
            author: payload.author,
            description: payload.description,
            priority: payload.priority,
            complete: payload.complete,
        })
    }

    /// Flatten `validator` output into body-located violations
    pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"));
                    FieldViolation::body(field.to_string(), message, error.code.to_string())
                })
            })
            .collect();

        sort_by_field(&mut violations);
        violations
    }

    /// Validate a raw JSON request body.
    ///
    /// Every field is checked for presence and JSON type first; fields that
    /// pass are then run through the declared constraints, so a single
    /// response lists every problem in the body.
    pub fn validate_json(body: &Value) -> Result<TaskFields> {
        let Some(object) = body.as_object() else {
            return Err(TaskError::invalid_field(FieldViolation::body(
                "body",
                "Input should be a valid dictionary",
                "model_type",
            )));
        };

        let mut violations = Vec::new();
        let title = text_field(object, "title", &mut violations);
        let author = text_field(object, "author", &mut violations);
        let description = text_field(object, "description", &mut violations);
        let priority = integer_field(object, "priority", &mut violations);
        let complete = flag_field(object, "complete", &mut violations);

        let rejected: Vec<String> = violations.iter().map(|v| v.field.clone()).collect();
        let payload = TaskPayload {
            title: title.unwrap_or_default(),
            author: author.unwrap_or_default(),
            description: description.unwrap_or_default(),
            priority: priority.unwrap_or_default(),
            complete: complete.unwrap_or(false),
        };

        if let Err(errors) = payload.validate() {
            violations.extend(
                Self::violations(&errors)
                    .into_iter()
                    .filter(|violation| !rejected.contains(&violation.field)),
            );
        }

        if !violations.is_empty() {
            sort_by_field(&mut violations);
            return Err(TaskError::Validation(violations));
        }

        Self::validate_payload(payload)
    }

    /// Validate a numeric task id taken from the request path
    pub fn validate_task_id(raw: i64) -> Result<TaskId> {
        TaskId::new(raw).ok_or_else(|| {
            TaskError::invalid_field(FieldViolation::path(
                "task_id",
                "Input should be greater than 0",
                "greater_than",
            ))
        })
    }

    /// Parse and validate a task id from its raw path segment
    pub fn parse_task_id(raw: &str) -> Result<TaskId> {
        let value = raw.trim().parse::<i64>().map_err(|_| {
            TaskError::invalid_field(FieldViolation::path(
                "task_id",
                "Input should be a valid integer, unable to parse string as an integer",
                "int_parsing",
            ))
        })?;
        Self::validate_task_id(value)
    }
}

fn sort_by_field(violations: &mut [FieldViolation]) {
    violations.sort_by_key(|violation| {
        FIELD_ORDER
            .iter()
            .position(|name| *name == violation.field)
            .unwrap_or(FIELD_ORDER.len())
    });
}

/// Required string field
fn text_field(
    object: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match object.get(name) {
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(FieldViolation::body(
                name,
                "Input should be a valid string",
                "string_type",
            ));
            None
        }
        None => {
            violations.push(FieldViolation::body(name, "Field required", "missing"));
            None
        }
    }
}

/// Required integer field. Floats with no fractional part are accepted and
/// values outside `i32` saturate so the range constraint reports them.
fn integer_field(
    object: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<i32> {
    let number = match object.get(name) {
        Some(Value::Number(number)) => number,
        Some(_) => {
            violations.push(FieldViolation::body(
                name,
                "Input should be a valid integer",
                "int_type",
            ));
            return None;
        }
        None => {
            violations.push(FieldViolation::body(name, "Field required", "missing"));
            return None;
        }
    };

    let whole = match number.as_i64() {
        Some(whole) => whole,
        None => match number.as_f64() {
            Some(float) if float.fract() == 0.0 => float as i64,
            _ => {
                violations.push(FieldViolation::body(
                    name,
                    "Input should be a valid integer, got a number with a fractional part",
                    "int_from_float",
                ));
                return None;
            }
        },
    };

    Some(i32::try_from(whole).unwrap_or(if whole < 0 { i32::MIN } else { i32::MAX }))
}

/// Optional boolean field
fn flag_field(
    object: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<bool> {
    match object.get(name) {
        Some(Value::Bool(flag)) => Some(*flag),
        Some(_) => {
            violations.push(FieldViolation::body(
                name,
                "Input should be a valid boolean",
                "bool_type",
            ));
            None
        }
        None => None,
    }
}
