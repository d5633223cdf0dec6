//! Editor-lock guard: edit-link clicks and cancel controls.

use pageguard_model::{EventOutcome, GuardSettings, Messages, PageHost, Selector};

use crate::lock::{LockDecision, PageSession};

/// Click on an edit link.
///
/// Lets the first navigation through and takes the lock; every later one is
/// cancelled with a blocking notice until a cancel control frees the lock.
pub fn on_edit_link_click<H: PageHost>(
    session: &mut PageSession,
    host: &mut H,
    messages: &Messages,
    link: &H::Element,
) -> EventOutcome {
    match session.try_acquire_edit_lock() {
        LockDecision::Acquired => {
            tracing::info!(link = %host.describe(link), "edit lock acquired");
            EventOutcome::Proceed
        }
        LockDecision::AlreadyHeld => {
            tracing::info!(link = %host.describe(link), "edit blocked, another edit is open");
            host.alert(&messages.concurrent_edit);
            EventOutcome::PreventDefault
        }
    }
}

/// Click on a cancel control. Frees the lock and leaves the click alone.
pub fn on_cancel_click<H: PageHost>(
    session: &mut PageSession,
    host: &H,
    control: &H::Element,
) -> EventOutcome {
    let was_held = session.release_edit_lock();
    tracing::info!(control = %host.describe(control), was_held, "edit lock released");
    EventOutcome::Proceed
}

/// Whether `element` counts as a cancel control.
///
/// The marker attribute always counts. With legacy matching on, a secondary
/// button whose text contains the cancel label counts too.
pub fn is_cancel_control<H: PageHost>(
    host: &H,
    element: &H::Element,
    settings: &GuardSettings,
    messages: &Messages,
) -> bool {
    let markers = &settings.markers;
    if host.has_attribute(element, &markers.cancel_attribute) {
        return true;
    }
    markers.legacy_cancel_label
        && !messages.cancel_label.is_empty()
        && host
            .attribute(element, "class")
            .is_some_and(|class| class.split_whitespace().any(|c| c == markers.secondary_class))
        && host.text_content(element).contains(&messages.cancel_label)
}

/// Cancel controls present on the page, in document order.
pub fn cancel_controls<H: PageHost>(
    host: &H,
    settings: &GuardSettings,
    messages: &Messages,
) -> Vec<H::Element> {
    let markers = &settings.markers;
    let mut controls = host.query_all(&Selector::Attribute(markers.cancel_attribute.clone()));
    if markers.legacy_cancel_label {
        for element in host.query_all(&Selector::Class(markers.secondary_class.clone())) {
            if !controls.contains(&element) && is_cancel_control(host, &element, settings, messages)
            {
                controls.push(element);
            }
        }
    }
    controls
}
