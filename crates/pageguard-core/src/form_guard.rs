//! Submit handler running the field validator.

use pageguard_model::{EventOutcome, GuardSettings, Messages, PageHost};
use pageguard_validate::{ValidationReport, apply_markers, validate_form};

use crate::lock::PageSession;

/// Validate `form`, paint the markers and raise one alert per out-of-range
/// field. Any failure cancels the submission.
///
/// The report is handed back so callers can record what was checked.
pub fn on_form_submit<H: PageHost>(
    session: &mut PageSession,
    host: &mut H,
    settings: &GuardSettings,
    messages: &Messages,
    form: &H::Element,
) -> (EventOutcome, ValidationReport<H::Element>) {
    let report = validate_form(host, form);
    apply_markers(host, &report, settings);
    for message in report.blocking_messages(messages) {
        host.alert(&message);
    }

    let outcome = if report.is_valid() {
        EventOutcome::Proceed
    } else {
        tracing::info!(
            form = %host.describe(form),
            issues = report.len(),
            "submission suppressed by validation"
        );
        session.record_suppressed_submission();
        EventOutcome::PreventDefault
    };
    (outcome, report)
}
