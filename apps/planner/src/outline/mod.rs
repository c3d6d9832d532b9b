// Outline presentation: Markdown/terminal formatting and file export.
// Everything here is pure except `ExportArtifact::write_to`.

pub mod export;
pub mod formatter;

pub use export::{export_json, export_markdown, ExportArtifact};
pub use formatter::render_outline;
