//! Form checks, run in a fixed order.

pub(crate) mod range;
pub(crate) mod required;

use pageguard_model::PageHost;

use crate::report::ValidationReport;

/// Run every check on `form`; both passes always complete.
pub(crate) fn run_all<H: PageHost>(host: &H, form: &H::Element) -> ValidationReport<H::Element> {
    let mut report = ValidationReport::new();
    required::check(host, form, &mut report);
    range::check(host, form, &mut report);
    report
}
