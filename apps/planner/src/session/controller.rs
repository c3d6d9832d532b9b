//! Planner: drives the session through a backend.
//!
//! Flow per action: validate (session) → backend call → complete (session).
//! Errors are recorded on the triggering action and also returned to the caller.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::api_client::BlogBackend;
use crate::errors::PlannerError;
use crate::models::BlogOutline;
use crate::outline::{export_json, export_markdown, ExportArtifact};
use crate::session::state::{Completion, Session};

const NO_OUTLINE_MESSAGE: &str = "Generate an outline before exporting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

pub struct Planner<B: BlogBackend> {
    backend: B,
    session: Session,
}

impl<B: BlogBackend> Planner<B> {
    pub fn new(backend: B, session: Session) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Submits the topics form. A blank theme fails before any request is made.
    pub async fn generate_topics(&mut self) -> Result<&[String], PlannerError> {
        let pending = self.session.begin_topics()?;
        info!(
            "Requesting {} topic(s) for theme {:?}",
            pending.num_topics, pending.theme
        );

        let result = self
            .backend
            .request_topic_suggestions(&pending.theme, pending.num_topics)
            .await;

        match result {
            Ok(topics) => {
                info!("Received {} topic(s)", topics.len());
                if self.session.complete_topics(pending.ticket, Ok(topics)) == Completion::Stale {
                    warn!("Topics response arrived after a newer request; ignored");
                }
                Ok(self.session.topic_list())
            }
            Err(e) => {
                warn!(status = ?e.status(), "Topic generation failed: {e}");
                self.session.complete_topics(pending.ticket, Err(e.to_string()));
                Err(e)
            }
        }
    }

    /// Selects by exact topic text.
    pub fn select_topic(&mut self, topic: &str) -> Result<&str, PlannerError> {
        self.session.select_topic(topic)
    }

    /// Selects by 1-based position, the numbering shown to the user.
    pub fn select_topic_number(&mut self, number: usize) -> Result<&str, PlannerError> {
        if number == 0 {
            return Err(PlannerError::validation("Topic numbers start at 1."));
        }
        self.session.select_topic_at(number - 1)
    }

    /// Submits the outline request for the current selection.
    pub async fn generate_outline(&mut self) -> Result<&BlogOutline, PlannerError> {
        let pending = self.session.begin_outline()?;
        info!(
            "Requesting outline for {:?} (audience: {:?})",
            pending.selected_topic, pending.target_audience
        );

        let result = self
            .backend
            .request_outline(&pending.selected_topic, &pending.target_audience)
            .await;

        match result {
            Ok(outline) => {
                info!(
                    "Received outline {:?} with {} section(s)",
                    outline.title_suggestion,
                    outline.sections.len()
                );
                if self.session.complete_outline(pending.ticket, Ok(outline)) == Completion::Stale {
                    warn!("Outline response arrived after the selection changed; ignored");
                }
                self.session
                    .outline()
                    .data()
                    .ok_or_else(|| PlannerError::validation("The outline was superseded."))
            }
            Err(e) => {
                warn!(status = ?e.status(), "Outline generation failed: {e}");
                self.session.complete_outline(pending.ticket, Err(e.to_string()));
                Err(e)
            }
        }
    }

    /// Builds the export artifact for the outline in memory.
    pub fn export_artifact(&self, format: ExportFormat) -> Result<ExportArtifact, PlannerError> {
        let outline = self
            .session
            .outline()
            .data()
            .ok_or_else(|| PlannerError::validation(NO_OUTLINE_MESSAGE))?;

        match format {
            ExportFormat::Json => export_json(outline),
            ExportFormat::Markdown => Ok(export_markdown(outline)),
        }
    }

    /// Writes the current outline into `dir` and returns the file path.
    pub fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf, PlannerError> {
        self.export_artifact(format)?.write_to(dir)
    }
}
