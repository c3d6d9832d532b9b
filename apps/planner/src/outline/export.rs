//! Outline export to `{slug}_outline.json` and `{slug}_outline.md`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::PlannerError;
use crate::models::BlogOutline;
use crate::outline::formatter::to_markdown;

const FALLBACK_SLUG: &str = "blog";

/// A file ready to be written: name, MIME type and full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportArtifact {
    /// Writes the artifact into `dir`, creating the directory if needed.
    /// An existing file with the same name is overwritten.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, PlannerError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        info!("Exported {} ({} bytes) to {}", self.mime, self.contents.len(), path.display());
        Ok(path)
    }
}

/// Lowercases `title` and replaces every whitespace run with one `_`.
/// Other characters are left as they are. An empty title becomes `blog`.
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}

/// Pretty-printed JSON (2-space indent) of the outline.
pub fn export_json(outline: &BlogOutline) -> Result<ExportArtifact, PlannerError> {
    Ok(ExportArtifact {
        file_name: format!("{}_outline.json", slug(&outline.title_suggestion)),
        mime: "application/json",
        contents: serde_json::to_string_pretty(outline)?,
    })
}

pub fn export_markdown(outline: &BlogOutline) -> ExportArtifact {
    ExportArtifact {
        file_name: format!("{}_outline.md", slug(&outline.title_suggestion)),
        mime: "text/markdown",
        contents: to_markdown(outline),
    }
}
