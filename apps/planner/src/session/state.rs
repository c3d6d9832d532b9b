//! Session state: one finite-state record per action plus the form fields.
//!
//! All mutation goes through the transition functions below. Each submission issues a
//! `Ticket`; a completion whose ticket is no longer current is dropped, so a slow response
//! can never overwrite the result of a newer request.

use tracing::debug;

use crate::config::clamp_num_topics;
use crate::errors::PlannerError;
use crate::models::BlogOutline;

pub const EMPTY_THEME_MESSAGE: &str = "Please enter a blog theme.";
pub const NO_SELECTION_MESSAGE: &str = "Please select a topic first.";

/// Lifecycle of one asynchronous action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> ActionState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ActionState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionState::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Topics,
    Outline,
}

/// Proof that a request was issued at a given generation of its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    action: Action,
    generation: u64,
}

/// Outcome of feeding a response back into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission (or a reset) superseded this request; the response was dropped.
    Stale,
}

/// Inputs captured when a topics request is submitted.
#[derive(Debug, Clone)]
pub struct PendingTopics {
    pub ticket: Ticket,
    pub theme: String,
    pub num_topics: u32,
}

/// Inputs captured when an outline request is submitted.
#[derive(Debug, Clone)]
pub struct PendingOutline {
    pub ticket: Ticket,
    pub selected_topic: String,
    pub target_audience: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    theme: String,
    num_topics: u32,
    target_audience: String,
    topics: ActionState<Vec<String>>,
    /// Set when the form was rejected client-side; the topics action itself is untouched.
    topics_validation: Option<String>,
    selected_topic: Option<String>,
    outline: ActionState<BlogOutline>,
    topics_generation: u64,
    outline_generation: u64,
}

impl Session {
    pub fn new(num_topics: u32, target_audience: impl Into<String>) -> Self {
        Self {
            theme: String::new(),
            num_topics: clamp_num_topics(num_topics),
            target_audience: target_audience.into(),
            topics: ActionState::Idle,
            topics_validation: None,
            selected_topic: None,
            outline: ActionState::Idle,
            topics_generation: 0,
            outline_generation: 0,
        }
    }

    // ── form fields ─────────────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        self.theme = theme.into();
    }

    /// Clamped into [1, 10].
    pub fn set_num_topics(&mut self, n: u32) {
        self.num_topics = clamp_num_topics(n);
    }

    pub fn set_target_audience(&mut self, audience: impl Into<String>) {
        self.target_audience = audience.into();
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn num_topics(&self) -> u32 {
        self.num_topics
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn topics(&self) -> &ActionState<Vec<String>> {
        &self.topics
    }

    /// Message to show above the topic list: a form rejection, else a failed request.
    pub fn topics_error(&self) -> Option<&str> {
        self.topics_validation
            .as_deref()
            .or_else(|| self.topics.error())
    }

    /// Topics currently on offer; empty unless the last topics action succeeded.
    pub fn topic_list(&self) -> &[String] {
        self.topics.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_topic(&self) -> Option<&str> {
        self.selected_topic.as_deref()
    }

    pub fn outline(&self) -> &ActionState<BlogOutline> {
        &self.outline
    }

    // ── topics action ───────────────────────────────────────────────────────

    /// Moves the topics action to `Loading` and clears everything that depends on it.
    ///
    /// A blank theme is rejected without entering `Loading`: the validation message is
    /// recorded next to the topics action, the current list and selection stay, only the
    /// outline is reset, and no request may be sent.
    pub fn begin_topics(&mut self) -> Result<PendingTopics, PlannerError> {
        if self.theme.trim().is_empty() {
            self.topics_validation = Some(EMPTY_THEME_MESSAGE.to_string());
            self.reset_outline();
            return Err(PlannerError::validation(EMPTY_THEME_MESSAGE));
        }

        self.topics_validation = None;
        self.topics_generation += 1;
        self.reset_selection();
        self.topics = ActionState::Loading;
        Ok(PendingTopics {
            ticket: Ticket {
                action: Action::Topics,
                generation: self.topics_generation,
            },
            theme: self.theme.clone(),
            num_topics: self.num_topics,
        })
    }

    pub fn complete_topics(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<String>, String>,
    ) -> Completion {
        if !self.is_current(ticket) {
            debug!("Dropping stale topics response (generation {})", ticket.generation);
            return Completion::Stale;
        }

        self.topics = match result {
            Ok(topics) => ActionState::Success(topics),
            Err(message) => ActionState::Error(message),
        };
        Completion::Applied
    }

    // ── selection ───────────────────────────────────────────────────────────

    /// Selects a topic by exact text. The outline action returns to `Idle` whatever its
    /// previous state, and any in-flight outline request becomes stale.
    pub fn select_topic(&mut self, topic: &str) -> Result<&str, PlannerError> {
        let index = self
            .topic_list()
            .iter()
            .position(|t| t == topic)
            .ok_or_else(|| {
                PlannerError::validation(format!("'{topic}' is not one of the suggested topics."))
            })?;
        self.select_topic_at(index)
    }

    /// Selects the topic at a zero-based position in the current list.
    pub fn select_topic_at(&mut self, index: usize) -> Result<&str, PlannerError> {
        let topic = self
            .topic_list()
            .get(index)
            .cloned()
            .ok_or_else(|| {
                PlannerError::validation(format!(
                    "No topic number {}; {} topic(s) available.",
                    index + 1,
                    self.topic_list().len()
                ))
            })?;

        self.reset_outline();
        Ok(self.selected_topic.insert(topic).as_str())
    }

    // ── outline action ──────────────────────────────────────────────────────

    /// Moves the outline action to `Loading`. Without a selection the action records the
    /// validation message and no request may be sent.
    pub fn begin_outline(&mut self) -> Result<PendingOutline, PlannerError> {
        self.outline_generation += 1;

        let Some(selected_topic) = self.selected_topic.clone() else {
            self.outline = ActionState::Error(NO_SELECTION_MESSAGE.to_string());
            return Err(PlannerError::validation(NO_SELECTION_MESSAGE));
        };

        self.outline = ActionState::Loading;
        Ok(PendingOutline {
            ticket: Ticket {
                action: Action::Outline,
                generation: self.outline_generation,
            },
            selected_topic,
            target_audience: self.target_audience.clone(),
        })
    }

    pub fn complete_outline(
        &mut self,
        ticket: Ticket,
        result: Result<BlogOutline, String>,
    ) -> Completion {
        if !self.is_current(ticket) {
            debug!("Dropping stale outline response (generation {})", ticket.generation);
            return Completion::Stale;
        }

        self.outline = match result {
            Ok(outline) => ActionState::Success(outline),
            Err(message) => ActionState::Error(message),
        };
        Completion::Applied
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn is_current(&self, ticket: Ticket) -> bool {
        match ticket.action {
            Action::Topics => {
                ticket.generation == self.topics_generation && self.topics.is_loading()
            }
            Action::Outline => {
                ticket.generation == self.outline_generation && self.outline.is_loading()
            }
        }
    }

    fn reset_selection(&mut self) {
        self.selected_topic = None;
        self.reset_outline();
    }

    fn reset_outline(&mut self) {
        self.outline_generation += 1;
        self.outline = ActionState::Idle;
    }
}
