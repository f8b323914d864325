//! Input validation helpers
//!
//! Length limits for free text typed into the checkout form, and the
//! conversion from `validator` errors into [`AppError`].

use validator::{Validate, ValidationErrors};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Customer names
pub const MAX_NAME_LEN: u64 = 200;

/// Phone numbers, birth dates, ids
pub const MAX_SHORT_TEXT_LEN: u64 = 100;

/// Delivery and event addresses
pub const MAX_ADDRESS_LEN: u64 = 500;

/// Distinct lines in one submitted cart
pub const MAX_CART_LINES: u64 = 100;

/// Units of one product in one line
pub const MAX_LINE_QUANTITY: u32 = 999;

// ── Request validation ──────────────────────────────────────────────

/// Run `validator` rules; the first failing field is reported in `details`
pub fn validate_request<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let fields = collect_fields(&errors, "");
    let first = fields.first().cloned().unwrap_or_default();
    AppError::validation(format!("Invalid value for {}", first)).with_detail("fields", fields)
}

/// Flatten nested errors into dotted paths (`details.customer_name`)
fn collect_fields(errors: &ValidationErrors, prefix: &str) -> Vec<String> {
    let mut fields = Vec::new();
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            validator::ValidationErrorsKind::Field(_) => fields.push(path),
            validator::ValidationErrorsKind::Struct(inner) => {
                fields.extend(collect_fields(inner, &path))
            }
            validator::ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    fields.extend(collect_fields(inner, &format!("{}[{}]", path, index)));
                }
            }
        }
    }
    fields.sort();
    fields
}
