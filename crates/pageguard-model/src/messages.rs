//! User-facing wording.
//!
//! Two built-in catalogs (`ru`, `en`); any sentence can be overridden from
//! settings. The range sentence is a template with `{label}`, `{min}` and
//! `{max}` placeholders.

use serde::{Deserialize, Serialize};

/// Built-in message catalogs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub const fn all() -> &'static [Locale] {
        &[Self::Ru, Self::En]
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Some(Self::Ru),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// Resolved wording used by the guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub concurrent_edit: String,
    pub confirm_destructive: String,
    pub cancel_label: String,
    pub range_violation: String,
    pub unbounded_above: String,
    pub unbounded_below: String,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self {
                concurrent_edit: "Невозможно открыть более одного окна редактирования одновременно"
                    .to_string(),
                confirm_destructive: "Вы уверены, что хотите выполнить это действие?".to_string(),
                cancel_label: "Отмена".to_string(),
                range_violation: "Поле \"{label}\" должно быть в диапазоне от {min} до {max}"
                    .to_string(),
                unbounded_above: "бесконечности".to_string(),
                unbounded_below: "минус бесконечности".to_string(),
            },
            Locale::En => Self {
                concurrent_edit: "Only one edit window can be open at a time".to_string(),
                confirm_destructive: "Are you sure you want to perform this action?".to_string(),
                cancel_label: "Cancel".to_string(),
                range_violation: "Field \"{label}\" must be in the range {min} to {max}"
                    .to_string(),
                unbounded_above: "infinity".to_string(),
                unbounded_below: "-infinity".to_string(),
            },
        }
    }

    /// Sentence naming a field and its accepted range.
    pub fn range_violation(&self, label: &str, min: Option<f64>, max: Option<f64>) -> String {
        let min = min.map_or_else(|| self.unbounded_below.clone(), format_number);
        let max = max.map_or_else(|| self.unbounded_above.clone(), format_number);
        fill_template(
            &self.range_violation,
            &[("label", label), ("min", &min), ("max", &max)],
        )
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

/// Replace each `{key}` in one left-to-right pass. Substituted text is never
/// scanned again; unknown placeholders are kept as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = values.iter().find_map(|(key, value)| {
            after
                .strip_prefix(*key)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });
        match hit {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Shortest round-trip form, as a browser would print it.
///
/// Magnitudes from 1e21 up and below 1e-6 switch to exponent notation
/// (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}
