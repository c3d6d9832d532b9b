//! Panel rendering for the two halves of the planner: topic ideas and blog outline.

use crate::outline::render_outline;
use crate::session::{ActionState, Session};

pub const TOPICS_HINT: &str = "Enter a theme and run 'topics' to get started.";
pub const OUTLINE_HINT: &str = "Select a topic to generate an outline.";

pub fn render_topics_panel(session: &Session) -> String {
    let mut out = String::from("── Topic Ideas ──\n");

    if session.topics().is_loading() {
        out.push_str("Generating topics...\n");
    }
    if let Some(message) = session.topics_error() {
        out.push_str(&format!("Error: {message}\n"));
    }

    let topics = session.topic_list();
    for (index, topic) in topics.iter().enumerate() {
        let marker = if session.selected_topic() == Some(topic.as_str()) {
            " [selected]"
        } else {
            ""
        };
        out.push_str(&format!("  {}. {topic}{marker}\n", index + 1));
    }

    if topics.is_empty() && !session.topics().is_loading() && session.topics_error().is_none() {
        out.push_str(&format!("{TOPICS_HINT}\n"));
    }

    out
}

pub fn render_outline_panel(session: &Session) -> String {
    let mut out = String::from("── Blog Outline ──\n");

    match (session.outline(), session.selected_topic()) {
        (ActionState::Loading, _) => out.push_str("Generating outline...\n"),
        (ActionState::Error(message), _) => out.push_str(&format!("Error: {message}\n")),
        (ActionState::Success(outline), _) => {
            out.push_str(&render_outline(outline));
            out.push_str("\nRun 'export json' or 'export md' to save this outline.\n");
        }
        (ActionState::Idle, Some(topic)) => out.push_str(&format!(
            "Run 'outline' to create the blog structure for: {topic}\n"
        )),
        (ActionState::Idle, None) => out.push_str(&format!("{OUTLINE_HINT}\n")),
    }

    out
}

/// Form values as currently set.
pub fn render_form(session: &Session) -> String {
    let theme = if session.theme().trim().is_empty() {
        "(not set)"
    } else {
        session.theme()
    };
    format!(
        "Theme: {theme}\nNumber of topic ideas: {}\nTarget audience: {}\n",
        session.num_topics(),
        session.target_audience()
    )
}
