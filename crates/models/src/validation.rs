//! Shared validation helpers.
//!
//! `validator` reports nested errors as a tree; API responses want a flat
//! `field -> [messages]` map, with list entries addressed as `images[0].path`.

use std::{borrow::Cow, collections::BTreeMap};

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Every violated field with its messages, ordered by field path.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub fn flatten_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.entry(path).or_default().extend(list.iter().map(message_of));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(inner, Some(&format!("{path}[{idx}]")), out);
                }
            }
        }
    }
}

fn message_of(e: &ValidationError) -> String {
    match &e.message {
        Some(m) => m.to_string(),
        None => e.code.to_string(),
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut e = ValidationError::new(code);
    e.message = Some(Cow::Borrowed(message));
    e
}

/// Rejects empty or whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "must not be blank"));
    }
    Ok(())
}

/// Accepts anything that parses as a finite decimal number.
pub fn finite_number(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err(error("number", "must be a number")),
    }
}
