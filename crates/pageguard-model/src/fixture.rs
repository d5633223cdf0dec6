//! Page fixtures: a TOML description of a page plus scripted gestures.
//!
//! ```toml
//! [[links]]
//! id = "edit-1"
//! href = "/products/edit/1"
//!
//! [[buttons]]
//! id = "cancel"
//! class = "btn btn-secondary"
//! text = "Отмена"
//!
//! [[forms]]
//! id = "product"
//! action = "/products/edit/1"
//!
//! [[forms.fields]]
//! id = "price"
//! label = "Цена"
//! type = "number"
//! min = "0"
//!
//! [[gestures]]
//! action = "click"
//! target = "edit-1"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};
use crate::memory::PageDom;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub links: Vec<LinkFixture>,
    pub buttons: Vec<ButtonFixture>,
    pub forms: Vec<FormFixture>,
    pub gestures: Vec<Gesture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkFixture {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonFixture {
    pub id: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFixture {
    pub id: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub fields: Vec<FieldFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFixture {
    pub id: String,
    /// Text of the label element placed right before the field.
    #[serde(default)]
    pub label: Option<String>,
    /// Element tag, `input` unless stated.
    #[serde(default = "default_field_tag")]
    pub tag: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub min: Option<String>,
    #[serde(default)]
    pub max: Option<String>,
}

fn default_field_tag() -> String {
    "input".to_string()
}

/// One scripted user gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Gesture {
    /// Click a link or button.
    Click { target: String },
    /// Submit a form; `confirm` answers the destructive-action prompt.
    Submit {
        target: String,
        #[serde(default)]
        confirm: Option<bool>,
    },
    /// Type a new value into a field.
    SetValue { target: String, value: String },
}

impl Gesture {
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target } | Self::Submit { target, .. } | Self::SetValue { target, .. } => {
                target
            }
        }
    }
}

impl PageFixture {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let fixture: Self = toml::from_str(content)?;
        fixture.check_ids()?;
        Ok(fixture)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn check_ids(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        let ids = self
            .links
            .iter()
            .map(|link| &link.id)
            .chain(self.buttons.iter().map(|button| &button.id))
            .chain(self.forms.iter().map(|form| &form.id))
            .chain(
                self.forms
                    .iter()
                    .flat_map(|form| form.fields.iter().map(|field| &field.id)),
            );
        for id in ids {
            if id.is_empty() {
                return Err(GuardError::Fixture("element with empty id".to_string()));
            }
            if !seen.insert(id.as_str()) {
                return Err(GuardError::Fixture(format!("duplicate id '{id}'")));
            }
        }
        Ok(())
    }

    /// Build the page the fixture describes.
    pub fn build_page(&self) -> PageDom {
        let mut dom = PageDom::new();
        let body = dom.body();

        for link in &self.links {
            dom.append_text(
                body,
                "a",
                &[("id", link.id.as_str()), ("href", link.href.as_str())],
                &link.text,
            );
        }

        for button in &self.buttons {
            let mut attrs: Vec<(&str, &str)> = vec![("id", button.id.as_str())];
            if !button.class.is_empty() {
                attrs.push(("class", button.class.as_str()));
            }
            attrs.extend(
                button
                    .attributes
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            );
            dom.append_text(body, "button", &attrs, &button.text);
        }

        for form in &self.forms {
            let node = dom.append(
                body,
                "form",
                &[
                    ("id", form.id.as_str()),
                    ("action", form.action.as_str()),
                    ("method", "post"),
                ],
            );
            for field in &form.fields {
                if let Some(label) = &field.label {
                    dom.append_text(node, "label", &[("for", field.id.as_str())], label);
                }
                let mut attrs: Vec<(&str, &str)> =
                    vec![("id", field.id.as_str()), ("value", field.value.as_str())];
                if let Some(kind) = &field.kind {
                    attrs.push(("type", kind.as_str()));
                }
                if let Some(name) = &field.name {
                    attrs.push(("name", name.as_str()));
                }
                if field.required {
                    attrs.push(("required", ""));
                }
                if let Some(min) = &field.min {
                    attrs.push(("min", min.as_str()));
                }
                if let Some(max) = &field.max {
                    attrs.push(("max", max.as_str()));
                }
                dom.append(node, &field.tag, &attrs);
            }
        }

        dom
    }
}
