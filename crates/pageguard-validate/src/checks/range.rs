//! Numeric range checks.
//!
//! Only `input[type="number"]` fields with a non-empty, parseable value are
//! compared against their bounds. Unusable bounds are not enforced.

use pageguard_model::{Hue, PageHost, Selector};

use crate::bounds::{Bounds, parse_number};
use crate::issue::Issue;
use crate::report::ValidationReport;

pub(crate) fn check<H: PageHost>(
    host: &H,
    form: &H::Element,
    report: &mut ValidationReport<H::Element>,
) {
    for field in host.query_within(form, &Selector::NumberInput) {
        let name = host.describe(&field);
        let raw = host.value(&field);

        let bounds = Bounds::from_field(host, &field);
        if raw.is_empty() || bounds.is_unbounded() {
            mark_passed(report, field, name);
            continue;
        }

        let violation = parse_number(&raw).and_then(|value| {
            bounds
                .check(value)
                .map(|violation| (value, violation))
        });

        match violation {
            Some((value, violation)) => {
                let label = field_label(host, &field);
                tracing::debug!(field = %name, value, ?bounds, "numeric field out of range");
                report.add(Issue::OutOfRange {
                    field: name.clone(),
                    label,
                    value,
                    bounds,
                    violation,
                });
                report.mark(field, name, Hue::Error);
            }
            None => mark_passed(report, field, name),
        }
    }
}

/// Neutral marker, unless the presence pass already flagged the field.
fn mark_passed<E: PartialEq>(report: &mut ValidationReport<E>, field: E, name: String) {
    if report.hue_of(&field) != Some(Hue::Error) {
        report.mark(field, name, Hue::Neutral);
    }
}

/// Human name of a field: its preceding sibling's text, else `name`, else `id`.
pub fn field_label<H: PageHost>(host: &H, field: &H::Element) -> String {
    host.previous_sibling_text(field)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .or_else(|| host.attribute(field, "name"))
        .or_else(|| host.attribute(field, "id"))
        .unwrap_or_default()
}
