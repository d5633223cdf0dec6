//! Validation issue types.
//!
//! Each variant carries only its needed data.

use serde::{Deserialize, Serialize};

use pageguard_model::Messages;

use crate::bounds::{Bounds, RangeViolation};

/// Validation issue raised for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Issue {
    /// Required field is empty or whitespace only
    RequiredEmpty { field: String },
    /// Numeric field value falls outside its declared bounds
    OutOfRange {
        field: String,
        label: String,
        value: f64,
        bounds: Bounds,
        violation: RangeViolation,
    },
}

impl Issue {
    /// Field handle (all issues have one).
    pub fn field(&self) -> &str {
        match self {
            Issue::RequiredEmpty { field } => field,
            Issue::OutOfRange { field, .. } => field,
        }
    }

    /// Short stable code, handy in logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            Issue::RequiredEmpty { .. } => "required-empty",
            Issue::OutOfRange {
                violation: RangeViolation::BelowMinimum,
                ..
            } => "below-minimum",
            Issue::OutOfRange {
                violation: RangeViolation::AboveMaximum,
                ..
            } => "above-maximum",
        }
    }

    /// Blocking message shown to the user, if this issue gets one.
    ///
    /// Empty required fields are reported through the border hue only.
    pub fn blocking_message(&self, messages: &Messages) -> Option<String> {
        match self {
            Issue::RequiredEmpty { .. } => None,
            Issue::OutOfRange { label, bounds, .. } => {
                Some(messages.range_violation(label, bounds.min, bounds.max))
            }
        }
    }
}
