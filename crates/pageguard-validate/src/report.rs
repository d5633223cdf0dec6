//! Outcome of one validation pass over a form.

use serde::{Deserialize, Serialize};

use pageguard_model::{Hue, Messages};

use crate::issue::Issue;

/// Border marker decided for one checked field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMarker<E> {
    pub element: E,
    pub field: String,
    pub hue: Hue,
}

/// Validation report for a single submission attempt.
///
/// Markers are kept in the order they were decided; applying them in that
/// order leaves each field with its final hue.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport<E> {
    pub issues: Vec<Issue>,
    pub markers: Vec<FieldMarker<E>>,
}

impl<E> Default for ValidationReport<E> {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            markers: Vec::new(),
        }
    }
}

impl<E> ValidationReport<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn mark(&mut self, element: E, field: impl Into<String>, hue: Hue) {
        self.markers.push(FieldMarker {
            element,
            field: field.into(),
            hue,
        });
    }

    /// True when every check passed.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Blocking messages in the order the issues were found.
    pub fn blocking_messages(&self, messages: &Messages) -> Vec<String> {
        self.issues
            .iter()
            .filter_map(|issue| issue.blocking_message(messages))
            .collect()
    }

    /// Last hue decided for `element`.
    pub fn hue_of(&self, element: &E) -> Option<Hue>
    where
        E: PartialEq,
    {
        self.markers
            .iter()
            .rev()
            .find(|marker| &marker.element == element)
            .map(|marker| marker.hue)
    }

    /// The deciding marker of every checked element, in first-seen order.
    ///
    /// Elements are compared directly, so fields that describe alike (no id)
    /// stay apart.
    pub fn final_markers(&self) -> Vec<&FieldMarker<E>>
    where
        E: PartialEq,
    {
        let mut finals: Vec<&FieldMarker<E>> = Vec::new();
        for marker in &self.markers {
            match finals
                .iter_mut()
                .find(|seen| seen.element == marker.element)
            {
                Some(seen) => *seen = marker,
                None => finals.push(marker),
            }
        }
        finals
    }

    /// Elements left with the error hue, in first-seen order.
    pub fn flagged(&self) -> Vec<&E>
    where
        E: PartialEq,
    {
        self.final_markers()
            .into_iter()
            .filter(|marker| marker.hue == Hue::Error)
            .map(|marker| &marker.element)
            .collect()
    }

    /// Host-independent view for serialization, one marker per element.
    pub fn summary(&self) -> ValidationSummary
    where
        E: PartialEq,
    {
        ValidationSummary {
            valid: self.is_valid(),
            issues: self.issues.clone(),
            markers: self
                .final_markers()
                .into_iter()
                .map(|marker| (marker.field.clone(), marker.hue))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub valid: bool,
    pub issues: Vec<Issue>,
    pub markers: Vec<(String, Hue)>,
}
