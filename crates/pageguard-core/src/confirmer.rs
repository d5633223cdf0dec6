//! Destructive-action confirmer.

use pageguard_model::{EventOutcome, Messages, PageHost};

use crate::lock::PageSession;

/// Submit on a delete form: ask first.
///
/// A declined prompt cancels the submission and stops the remaining
/// listeners for this event.
pub fn on_destructive_submit<H: PageHost>(
    session: &mut PageSession,
    host: &mut H,
    messages: &Messages,
    form: &H::Element,
) -> EventOutcome {
    if host.confirm(&messages.confirm_destructive) {
        tracing::debug!(form = %host.describe(form), "destructive action confirmed");
        EventOutcome::Proceed
    } else {
        tracing::info!(form = %host.describe(form), "destructive action declined");
        session.record_declined_confirmation();
        EventOutcome::Halt
    }
}
