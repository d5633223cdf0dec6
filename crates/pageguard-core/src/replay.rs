//! Replay scripted gestures against a fixture page.
//!
//! Plays the part of the browser: wires the page once, dispatches each
//! gesture, and records what the default action would have done.

use serde::Serialize;

use pageguard_model::{
    Gesture, GuardSettings, NodeId, PageDom, PageFixture, PageHost, Result, Selector,
};
use pageguard_validate::ValidationSummary;

use crate::controller::{Dispatch, PageController, WiringSummary};
use crate::lock::SessionStats;

/// What happened after the listeners ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Effect {
    /// A link was followed.
    Navigated(String),
    /// A form was sent to its action.
    Submitted(String),
    /// A control without a default navigation was activated.
    Activated(String),
    /// A listener cancelled the default action.
    Suppressed,
    /// A field value was typed in.
    ValueChanged,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub gesture: Gesture,
    pub dispatch: Option<Dispatch>,
    pub effect: Effect,
    pub alerts: Vec<String>,
    pub prompts: Vec<String>,
    pub edit_lock_held: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayLog {
    pub wiring: WiringSummary,
    pub steps: Vec<ReplayStep>,
    /// Final border color of every field that received one.
    pub borders: Vec<(String, String)>,
    pub stats: SessionStats,
}

impl ReplayStep {
    /// Validator findings for this step, when the form validator ran.
    pub fn validation(&self) -> Option<&ValidationSummary> {
        self.dispatch.as_ref()?.validation.as_ref()
    }
}

impl ReplayLog {
    pub fn navigations(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match &step.effect {
                Effect::Navigated(href) => Some(href.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn submissions(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match &step.effect {
                Effect::Submitted(action) => Some(action.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Build the fixture's page, wire it and play every gesture in order.
pub fn replay(fixture: &PageFixture, settings: GuardSettings) -> Result<ReplayLog> {
    let mut page = fixture.build_page();
    let mut controller = PageController::wire(&page, settings);
    let wiring = controller.summary();
    let mut steps = Vec::with_capacity(fixture.gestures.len());

    for gesture in &fixture.gestures {
        let target = page.require(gesture.target())?;
        let (dispatch, effect) = match gesture {
            Gesture::Click { .. } => {
                let dispatch = controller.click(&mut page, &target);
                let effect = click_effect(&page, target, &dispatch);
                (Some(dispatch), effect)
            }
            Gesture::Submit { confirm, .. } => {
                if let Some(accepted) = confirm {
                    page.enqueue_confirm_response(*accepted);
                }
                let dispatch = controller.submit(&mut page, &target);
                page.clear_confirm_responses();
                let effect = if dispatch.proceeds() {
                    Effect::Submitted(page.attribute(&target, "action").unwrap_or_default())
                } else {
                    Effect::Suppressed
                };
                (Some(dispatch), effect)
            }
            Gesture::SetValue { value, .. } => {
                page.set_value(target, value);
                (None, Effect::ValueChanged)
            }
        };

        tracing::debug!(element = gesture.target(), ?effect, "gesture replayed");
        steps.push(ReplayStep {
            gesture: gesture.clone(),
            dispatch,
            effect,
            alerts: page.take_alert_messages(),
            prompts: page.take_confirm_prompts(),
            edit_lock_held: controller.is_edit_lock_held(),
        });
    }

    Ok(ReplayLog {
        wiring,
        steps,
        borders: collect_borders(&page),
        stats: controller.session().stats(),
    })
}

fn click_effect(page: &PageDom, target: NodeId, dispatch: &Dispatch) -> Effect {
    if !dispatch.proceeds() {
        return Effect::Suppressed;
    }
    match page.attribute(&target, "href") {
        Some(href) if page.tag(target) == "a" => Effect::Navigated(href),
        _ => Effect::Activated(page.describe(&target)),
    }
}

fn collect_borders(page: &PageDom) -> Vec<(String, String)> {
    page.query_all(&Selector::Attribute("id".to_string()))
        .into_iter()
        .filter_map(|node| {
            page.border_color(node)
                .map(|color| (page.describe(&node), color.to_string()))
        })
        .collect()
}
