//! Outline formatters: Markdown for export and a plain rendering for the terminal.
//!
//! Both skip any block whose field is empty. No placeholders are emitted.

use crate::models::BlogOutline;

/// Converts an outline into the Markdown document used for `.md` export.
///
/// Block order: title, introduction, sections, conclusion, call to action.
pub fn to_markdown(outline: &BlogOutline) -> String {
    let mut md = String::new();

    if !outline.title_suggestion.is_empty() {
        md.push_str(&format!("# {}\n\n", outline.title_suggestion));
    }

    if !outline.introduction_hook.is_empty() {
        md.push_str(&format!("## Introduction\n{}\n\n", outline.introduction_hook));
    }

    for section in &outline.sections {
        md.push_str(&format!("## {}\n", section.heading));
        for point in &section.key_points {
            md.push_str(&format!("- {point}\n"));
        }
        md.push('\n');
    }

    if !outline.conclusion_summary.is_empty() {
        md.push_str(&format!("## Conclusion\n{}\n\n", outline.conclusion_summary));
    }

    if let Some(cta) = outline.call_to_action() {
        md.push_str(&format!("### Call to Action\n{cta}\n"));
    }

    md
}

/// Renders an outline for display in the terminal, with numbered sections.
pub fn render_outline(outline: &BlogOutline) -> String {
    let mut out = String::new();

    if !outline.title_suggestion.is_empty() {
        out.push_str(&format!("{}\n", outline.title_suggestion));
        out.push_str(&format!("{}\n\n", "=".repeat(outline.title_suggestion.chars().count())));
    }

    if !outline.introduction_hook.is_empty() {
        out.push_str(&format!("Introduction\n  {}\n\n", outline.introduction_hook));
    }

    for (index, section) in outline.sections.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, section.heading));
        for point in &section.key_points {
            out.push_str(&format!("   - {point}\n"));
        }
        out.push('\n');
    }

    if !outline.conclusion_summary.is_empty() {
        out.push_str(&format!("Conclusion\n  {}\n\n", outline.conclusion_summary));
    }

    if let Some(cta) = outline.call_to_action() {
        out.push_str(&format!("Call to Action\n  {cta}\n"));
    }

    out
}
