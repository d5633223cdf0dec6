//! In-memory page used by tests and the CLI.
//!
//! A flat arena of element nodes in document order plus the dialog state a
//! browser would otherwise own: recorded alerts, asked confirmations and a
//! queue of scripted confirm answers.

use std::collections::{BTreeMap, VecDeque};

use crate::error::{GuardError, Result};
use crate::host::{PageHost, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    value: String,
    border_color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PageDom {
    nodes: Vec<Node>,
    alert_messages: Vec<String>,
    confirm_prompts: Vec<String>,
    confirm_responses: VecDeque<bool>,
    default_confirm_response: bool,
}

impl Default for PageDom {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDom {
    /// Empty page holding only a `body` element.
    pub fn new() -> Self {
        let body = Node {
            parent: None,
            children: Vec::new(),
            tag: "body".to_string(),
            attrs: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            border_color: None,
        };
        Self {
            nodes: vec![body],
            alert_messages: Vec::new(),
            confirm_prompts: Vec::new(),
            confirm_responses: VecDeque::new(),
            default_confirm_response: false,
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element as the last child of `parent`.
    ///
    /// A `value` attribute seeds the control's current value, as in HTML.
    pub fn append(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs: BTreeMap<String, String> = attrs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        let value = attrs.get("value").cloned().unwrap_or_default();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            tag: tag.to_ascii_lowercase(),
            attrs,
            text: String::new(),
            value,
            border_color: None,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element with text content.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let id = self.append(parent, tag, attrs);
        self.nodes[id.0].text = text.to_string();
        id
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.attrs.get("id").is_some_and(|value| value == id))
            .map(NodeId)
    }

    pub fn require(&self, id: &str) -> Result<NodeId> {
        self.find_by_id(id)
            .ok_or_else(|| GuardError::UnknownElement(id.to_string()))
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.nodes[node.0].value = value.to_string();
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.nodes[node.0].attrs.remove(name);
    }

    pub fn border_color(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].border_color.as_deref()
    }

    /// Answer the next `confirm` with `accepted`.
    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.confirm_responses.push_back(accepted);
    }

    /// Answer used once the scripted queue is empty.
    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.default_confirm_response = accepted;
    }

    /// Drop scripted answers nobody asked for.
    pub fn clear_confirm_responses(&mut self) {
        self.confirm_responses.clear();
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alert_messages)
    }

    pub fn take_confirm_prompts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.confirm_prompts)
    }

    /// Descendants of `scope` in document order, `scope` excluded.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let node = &self.nodes[node.0];
        let attr = |name: &str| node.attrs.get(name).map(String::as_str);
        match selector {
            Selector::LinkHrefContains(text) => {
                node.tag == "a" && attr("href").is_some_and(|href| href.contains(text.as_str()))
            }
            Selector::FormActionContains(text) => {
                node.tag == "form"
                    && attr("action").is_some_and(|action| action.contains(text.as_str()))
            }
            Selector::Forms => node.tag == "form",
            Selector::Class(class) => attr("class")
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)),
            Selector::Attribute(name) => node.attrs.contains_key(name),
            Selector::Required => node.attrs.contains_key("required"),
            Selector::NumberInput => {
                node.tag == "input"
                    && attr("type").is_some_and(|kind| kind.eq_ignore_ascii_case("number"))
            }
        }
    }
}

impl PageHost for PageDom {
    type Element = NodeId;

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.query_within(&self.body(), selector)
    }

    fn query_within(&self, scope: &NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(*scope)
            .into_iter()
            .filter(|node| self.matches(*node, selector))
            .collect()
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes[element.0].attrs.get(name).cloned()
    }

    fn value(&self, element: &NodeId) -> String {
        self.nodes[element.0].value.clone()
    }

    fn text_content(&self, element: &NodeId) -> String {
        let mut text = self.nodes[element.0].text.clone();
        for child in self.descendants(*element) {
            text.push_str(&self.nodes[child.0].text);
        }
        text
    }

    fn previous_sibling_text(&self, element: &NodeId) -> Option<String> {
        let parent = self.nodes[element.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|sibling| sibling == element)?;
        let previous = siblings.get(index.checked_sub(1)?)?;
        Some(self.text_content(previous))
    }

    fn set_border_color(&mut self, element: &NodeId, color: &str) {
        self.nodes[element.0].border_color = Some(color.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alert_messages.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirm_prompts.push(message.to_string());
        self.confirm_responses
            .pop_front()
            .unwrap_or(self.default_confirm_response)
    }
}
