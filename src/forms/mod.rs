//! Form definitions backing the user administration routes.

use std::collections::HashMap;

use validator::ValidationErrors;

pub mod users;

/// Field-name to error-messages map handed to the templates.
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Flattens [`ValidationErrors`] into a [`FieldErrors`] map.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}
