//! Client-side form validation.
//!
//! Runs two passes over a submitted form, always in this order:
//!
//! - **Required fields**: trimmed value must be non-empty
//! - **Numeric ranges**: `input[type="number"]` values must sit inside their
//!   declared `min`/`max`
//!
//! Everything is read fresh from the host on each call. The result is
//! advisory; the server must validate again.
//!
//! # Example
//!
//! ```ignore
//! use pageguard_validate::{apply_markers, validate_form};
//!
//! let report = validate_form(&page, &form);
//! apply_markers(&mut page, &report, &settings);
//! for message in report.blocking_messages(&settings.resolved_messages()) {
//!     page.alert(&message);
//! }
//! ```

mod bounds;
mod checks;
mod issue;
mod report;

use pageguard_model::{GuardSettings, PageHost};

pub use bounds::{Bounds, RangeViolation, parse_number};
pub use checks::range::field_label;
pub use issue::Issue;
pub use report::{FieldMarker, ValidationReport, ValidationSummary};

/// Check every required and numeric field of `form`.
pub fn validate_form<H: PageHost>(host: &H, form: &H::Element) -> ValidationReport<H::Element> {
    let report = checks::run_all(host, form);
    tracing::debug!(
        form = %host.describe(form),
        issues = report.len(),
        checked = report.markers.len(),
        "form validated"
    );
    report
}

/// Paint each checked field's border with its decided hue.
pub fn apply_markers<H: PageHost>(
    host: &mut H,
    report: &ValidationReport<H::Element>,
    settings: &GuardSettings,
) {
    for marker in &report.markers {
        host.set_border_color(&marker.element, settings.hue_color(marker.hue));
    }
}
