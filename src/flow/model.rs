//! Answer state collected across the survey screens.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Number of t-shirt options in the multi-select question.
pub const TSHIRT_OPTION_COUNT: usize = 15;

/// The set of t-shirt option identifiers ("1".."15") the user has picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOptions(BTreeSet<String>);

impl SelectedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an option in or out of the selection.
    pub fn toggle(&mut self, option: &str) {
        if !self.0.remove(option) {
            self.0.insert(option.to_string());
        }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.0.contains(option)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expand the selection into the submission flags: one `tshirt_N`
    /// entry per option, 1 if selected, 0 otherwise.
    pub fn flag_entries(&self) -> Vec<(String, u8)> {
        (1..=TSHIRT_OPTION_COUNT)
            .map(|i| {
                let selected = self.0.contains(&i.to_string());
                (format!("tshirt_{i}"), u8::from(selected))
            })
            .collect()
    }
}

/// Answers accumulated across the questions screen, keyed by question.
///
/// Append-only until submitted: keys can be written and overwritten but
/// never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswers(BTreeMap<String, serde_json::Value>);

impl SurveyAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any prior answer for the same question.
    pub fn record(&mut self, question: impl Into<String>, answer: serde_json::Value) {
        self.0.insert(question.into(), answer);
    }

    pub fn get(&self, question: &str) -> Option<&serde_json::Value> {
        self.0.get(question)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.0.iter()
    }
}

/// Registration form data, submitted exactly once at stage completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub name: String,
    pub phone: String,
    pub personal_email: String,
    pub university_email: String,
}
