//! Page controller: one wiring pass at load, then per-event dispatch.

use serde::{Deserialize, Serialize};

use pageguard_model::{EventKind, EventOutcome, GuardSettings, Messages, PageHost, Selector};
use pageguard_validate::ValidationSummary;

use crate::confirmer::on_destructive_submit;
use crate::editor_guard::{cancel_controls, on_cancel_click, on_edit_link_click};
use crate::form_guard::on_form_submit;
use crate::lock::PageSession;

/// Which guard a listener runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    EditLink,
    CancelControl,
    ConfirmDestructive,
    ValidateForm,
}

impl Handler {
    pub const fn event(&self) -> EventKind {
        match self {
            Self::EditLink | Self::CancelControl => EventKind::Click,
            Self::ConfirmDestructive | Self::ValidateForm => EventKind::Submit,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::EditLink => "edit link",
            Self::CancelControl => "cancel control",
            Self::ConfirmDestructive => "destructive confirm",
            Self::ValidateForm => "form validation",
        }
    }
}

/// A guard attached to one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Listener<E> {
    pub target: E,
    pub handler: Handler,
}

impl<E> Listener<E> {
    pub fn event(&self) -> EventKind {
        self.handler.event()
    }
}

/// Listener counts per guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringSummary {
    pub edit_links: usize,
    pub cancel_controls: usize,
    pub forms: usize,
    pub destructive_forms: usize,
}

/// Result of dispatching one event through every matching listener.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
    pub ran: Vec<(Handler, EventOutcome)>,
    /// What form validation found, when it ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationSummary>,
}

impl Dispatch {
    /// Whether the browser would go on with the default action.
    pub fn proceeds(&self) -> bool {
        !self.default_prevented
    }
}

/// Owns the page session and the listeners registered at load.
#[derive(Debug, Clone)]
pub struct PageController<E> {
    settings: GuardSettings,
    messages: Messages,
    session: PageSession,
    listeners: Vec<Listener<E>>,
}

impl<E: Clone + PartialEq> PageController<E> {
    /// Wire every guard to the elements present now.
    ///
    /// Registration order: edit links, cancel controls, then each form in
    /// document order. A delete form gets its confirmation listener before its
    /// validation listener.
    pub fn wire<H>(host: &H, settings: GuardSettings) -> Self
    where
        H: PageHost<Element = E>,
    {
        let messages = settings.resolved_messages();
        let markers = &settings.markers;
        let mut listeners = Vec::new();

        for link in host.query_all(&Selector::LinkHrefContains(markers.edit_segment.clone())) {
            listeners.push(Listener {
                target: link,
                handler: Handler::EditLink,
            });
        }

        for control in cancel_controls(host, &settings, &messages) {
            listeners.push(Listener {
                target: control,
                handler: Handler::CancelControl,
            });
        }

        let destructive =
            host.query_all(&Selector::FormActionContains(markers.delete_segment.clone()));
        for form in host.query_all(&Selector::Forms) {
            if destructive.contains(&form) {
                listeners.push(Listener {
                    target: form.clone(),
                    handler: Handler::ConfirmDestructive,
                });
            }
            listeners.push(Listener {
                target: form,
                handler: Handler::ValidateForm,
            });
        }

        let controller = Self {
            settings,
            messages,
            session: PageSession::new(),
            listeners,
        };
        let summary = controller.summary();
        tracing::debug!(
            edit_links = summary.edit_links,
            cancel_controls = summary.cancel_controls,
            forms = summary.forms,
            destructive_forms = summary.destructive_forms,
            "page wired"
        );
        controller
    }

    pub fn listeners(&self) -> &[Listener<E>] {
        &self.listeners
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    pub fn settings(&self) -> &GuardSettings {
        &self.settings
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn is_edit_lock_held(&self) -> bool {
        self.session.is_edit_lock_held()
    }

    pub fn summary(&self) -> WiringSummary {
        let count = |handler: Handler| {
            self.listeners
                .iter()
                .filter(|listener| listener.handler == handler)
                .count()
        };
        WiringSummary {
            edit_links: count(Handler::EditLink),
            cancel_controls: count(Handler::CancelControl),
            forms: count(Handler::ValidateForm),
            destructive_forms: count(Handler::ConfirmDestructive),
        }
    }

    /// Run one guard against `target`.
    pub fn handle<H>(&mut self, host: &mut H, handler: Handler, target: &E) -> EventOutcome
    where
        H: PageHost<Element = E>,
    {
        self.run(host, handler, target).0
    }

    fn run<H>(
        &mut self,
        host: &mut H,
        handler: Handler,
        target: &E,
    ) -> (EventOutcome, Option<ValidationSummary>)
    where
        H: PageHost<Element = E>,
    {
        match handler {
            Handler::EditLink => (
                on_edit_link_click(&mut self.session, host, &self.messages, target),
                None,
            ),
            Handler::CancelControl => (on_cancel_click(&mut self.session, host, target), None),
            Handler::ConfirmDestructive => (
                on_destructive_submit(&mut self.session, host, &self.messages, target),
                None,
            ),
            Handler::ValidateForm => {
                let (outcome, report) = on_form_submit(
                    &mut self.session,
                    host,
                    &self.settings,
                    &self.messages,
                    target,
                );
                (outcome, Some(report.summary()))
            }
        }
    }

    /// Deliver `event` on `target` to its listeners in registration order.
    pub fn dispatch<H>(&mut self, host: &mut H, event: EventKind, target: &E) -> Dispatch
    where
        H: PageHost<Element = E>,
    {
        let handlers: Vec<Handler> = self
            .listeners
            .iter()
            .filter(|listener| listener.event() == event && &listener.target == target)
            .map(|listener| listener.handler)
            .collect();

        let mut dispatch = Dispatch::default();
        for handler in handlers {
            let (outcome, validation) = self.run(host, handler, target);
            dispatch.ran.push((handler, outcome));
            if validation.is_some() {
                dispatch.validation = validation;
            }
            dispatch.default_prevented |= outcome.prevents_default();
            if outcome.stops_propagation() {
                dispatch.propagation_stopped = true;
                break;
            }
        }
        dispatch
    }

    pub fn click<H>(&mut self, host: &mut H, target: &E) -> Dispatch
    where
        H: PageHost<Element = E>,
    {
        self.dispatch(host, EventKind::Click, target)
    }

    pub fn submit<H>(&mut self, host: &mut H, form: &E) -> Dispatch
    where
        H: PageHost<Element = E>,
    {
        self.dispatch(host, EventKind::Submit, form)
    }
}
