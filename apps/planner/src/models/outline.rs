use serde::{Deserialize, Serialize};

/// One body section of an outline: a heading and its ordered key points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSection {
    pub heading: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Structured skeleton of a blog post as returned under `generated_outline`.
///
/// Text fields default to empty so a sparse outline still deserializes; the formatter
/// skips whatever is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogOutline {
    #[serde(default)]
    pub title_suggestion: String,
    #[serde(default)]
    pub introduction_hook: String,
    #[serde(default)]
    pub sections: Vec<OutlineSection>,
    #[serde(default)]
    pub conclusion_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
}

impl BlogOutline {
    /// The call to action, if present and not blank.
    pub fn call_to_action(&self) -> Option<&str> {
        self.call_to_action
            .as_deref()
            .filter(|cta| !cta.is_empty())
    }
}
