//! # Submission validation
//!
//! Decides whether a filled-out form may be submitted. Validation is a pure
//! function of the template and the entered values, cheap enough to run on
//! every keystroke so an inline error clears as soon as the field passes.
//!
//! Rules, per field:
//! - `label` fields carry no value and never fail.
//! - A required field fails when its value is missing or blank text. An
//!   explicit boolean `false` is a filled answer.
//! - A filled `number` must parse as a finite number.
//! - A filled `enum` must be one of the field's options.
//! - A filled `boolean` must be a boolean (or the text `true`/`false`).
//! - A filled `text` field takes any value.
//!
//! Blank text counts as "not filled" for the type checks, so an optional
//! number left empty passes.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::model::field::{FieldDescriptor, FieldKind};
use crate::model::submission::{FieldValue, SubmissionData};
use crate::model::template::Template;

/// Why a single field cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("this field is required")]
    Required,
    #[error("must be a valid number")]
    InvalidNumber,
    #[error("must be one of the listed options")]
    UnknownOption,
    #[error("must be true or false")]
    InvalidBoolean,
}

// Serialized as its human-readable reason.
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Failing fields keyed by field id, in section order then field order.
pub type FieldErrors = IndexMap<String, FieldError>;

/// Validates `values` against every field of `template`.
///
/// The result holds one entry per failing field and nothing for passing ones;
/// the submission is acceptable iff it is empty.
pub fn validate_submission(template: &Template, values: &SubmissionData) -> FieldErrors {
    template
        .fields()
        .filter_map(|field| {
            validate_field(field, values.get(&field.id)).map(|error| (field.id.clone(), error))
        })
        .collect()
}

pub fn is_submittable(template: &Template, values: &SubmissionData) -> bool {
    validate_submission(template, values).is_empty()
}

/// Validates one field's value.
pub fn validate_field(field: &FieldDescriptor, value: Option<&FieldValue>) -> Option<FieldError> {
    let filled = value.filter(|value| !value.is_blank());

    match &field.kind {
        FieldKind::Label { .. } => None,
        FieldKind::Text { required } => missing(*required, filled),
        FieldKind::Number { required } => {
            missing(*required, filled).or_else(|| match filled {
                Some(FieldValue::Text(text)) if is_finite_number(text) => None,
                Some(_) => Some(FieldError::InvalidNumber),
                None => None,
            })
        }
        FieldKind::Boolean { required } => {
            missing(*required, filled).or_else(|| match filled {
                Some(FieldValue::Bool(_)) => None,
                Some(FieldValue::Text(text)) if matches!(text.trim(), "true" | "false") => None,
                Some(FieldValue::Text(_)) => Some(FieldError::InvalidBoolean),
                None => None,
            })
        }
        FieldKind::Enum { required, options } => {
            missing(*required, filled).or_else(|| match filled {
                Some(FieldValue::Text(text)) if options.contains(text) => None,
                Some(_) => Some(FieldError::UnknownOption),
                None => None,
            })
        }
    }
}

fn missing(required: bool, filled: Option<&FieldValue>) -> Option<FieldError> {
    (required && filled.is_none()).then_some(FieldError::Required)
}

fn is_finite_number(text: &str) -> bool {
    text.trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}
