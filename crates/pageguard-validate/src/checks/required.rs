//! Required field checks.
//!
//! Every field flagged `required` gets a marker: error when its trimmed value
//! is empty, neutral otherwise. No short-circuit.

use pageguard_model::{Hue, PageHost, Selector};

use crate::issue::Issue;
use crate::report::ValidationReport;

pub(crate) fn check<H: PageHost>(
    host: &H,
    form: &H::Element,
    report: &mut ValidationReport<H::Element>,
) {
    for field in host.query_within(form, &Selector::Required) {
        let name = host.describe(&field);
        if host.value(&field).trim().is_empty() {
            tracing::debug!(field = %name, "required field is empty");
            report.add(Issue::RequiredEmpty {
                field: name.clone(),
            });
            report.mark(field, name, Hue::Error);
        } else {
            report.mark(field, name, Hue::Neutral);
        }
    }
}
