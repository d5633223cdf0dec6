//! Page host capability.
//!
//! Guards never touch a browser directly. Everything they read or mutate goes
//! through [`PageHost`], which is implemented by the in-memory [`PageDom`]
//! and by the browser host in `pageguard-web`.
//!
//! [`PageDom`]: crate::PageDom

use serde::{Deserialize, Serialize};

/// Element query understood by every host.
///
/// Each variant maps to one CSS selector so the browser host can hand it to
/// `querySelectorAll` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Hyperlinks whose `href` contains the given text.
    LinkHrefContains(String),
    /// Forms whose `action` contains the given text.
    FormActionContains(String),
    /// Every form.
    Forms,
    /// Elements carrying the given class.
    Class(String),
    /// Elements carrying the given attribute, whatever its value.
    Attribute(String),
    /// Fields flagged `required`.
    Required,
    /// `input[type="number"]` fields.
    NumberInput,
}

impl Selector {
    /// Render the selector as CSS.
    pub fn to_css(&self) -> String {
        match self {
            Self::LinkHrefContains(text) => format!("a[href*=\"{}\"]", css_escape(text)),
            Self::FormActionContains(text) => format!("form[action*=\"{}\"]", css_escape(text)),
            Self::Forms => "form".to_string(),
            Self::Class(class) => format!(".{}", css_ident(class)),
            Self::Attribute(name) => format!("[{}]", css_ident(name)),
            Self::Required => "[required]".to_string(),
            Self::NumberInput => "input[type=\"number\"]".to_string(),
        }
    }
}

fn css_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn css_ident(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_'))
        .collect()
}

/// DOM events the guards listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Click,
    Submit,
}

impl EventKind {
    /// DOM event type name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

/// What a single listener decided about the event it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// Leave the default action alone.
    Proceed,
    /// Cancel the default action; later listeners still run.
    PreventDefault,
    /// Cancel the default action and skip the remaining listeners.
    Halt,
}

impl EventOutcome {
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::Proceed)
    }

    pub fn stops_propagation(self) -> bool {
        matches!(self, Self::Halt)
    }
}

/// Border hue applied to a checked field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hue {
    Error,
    Neutral,
}

/// Everything the guards need from a page.
///
/// Reads take `&self`; anything with a visible effect takes `&mut self`.
/// `alert` and `confirm` block until the user dismisses them.
pub trait PageHost {
    type Element: Clone + PartialEq;

    /// All matching elements in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// Matching descendants of `scope` in document order.
    fn query_within(&self, scope: &Self::Element, selector: &Selector) -> Vec<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    /// Current value of a form control; empty for anything else.
    fn value(&self, element: &Self::Element) -> String;

    fn text_content(&self, element: &Self::Element) -> String;

    /// Text of the immediately preceding element sibling, if there is one.
    fn previous_sibling_text(&self, element: &Self::Element) -> Option<String>;

    fn set_border_color(&mut self, element: &Self::Element, color: &str);

    fn alert(&mut self, message: &str);

    fn confirm(&mut self, message: &str) -> bool;

    /// Short human-readable handle used in logs.
    fn describe(&self, element: &Self::Element) -> String {
        self.attribute(element, "id")
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "<element>".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_render_as_css() {
        assert_eq!(
            Selector::LinkHrefContains("/edit/".into()).to_css(),
            "a[href*=\"/edit/\"]"
        );
        assert_eq!(
            Selector::FormActionContains("/delete/".into()).to_css(),
            "form[action*=\"/delete/\"]"
        );
        assert_eq!(Selector::Class("btn-secondary".into()).to_css(), ".btn-secondary");
        assert_eq!(
            Selector::Attribute("data-editor-cancel".into()).to_css(),
            "[data-editor-cancel]"
        );
        assert_eq!(Selector::NumberInput.to_css(), "input[type=\"number\"]");
    }

    #[test]
    fn quotes_in_segments_are_escaped() {
        assert_eq!(
            Selector::LinkHrefContains("a\"b".into()).to_css(),
            "a[href*=\"a\\\"b\"]"
        );
    }

    #[test]
    fn outcome_flags() {
        assert!(!EventOutcome::Proceed.prevents_default());
        assert!(EventOutcome::PreventDefault.prevents_default());
        assert!(!EventOutcome::PreventDefault.stops_propagation());
        assert!(EventOutcome::Halt.prevents_default());
        assert!(EventOutcome::Halt.stops_propagation());
    }
}
