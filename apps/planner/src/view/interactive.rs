//! Interactive command loop. Reads one command per line, applies it to the planner and
//! redraws the affected panel.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::api_client::BlogBackend;
use crate::session::Planner;
use crate::view::commands::{parse_command, Command, TopicChoice, HELP_TEXT};
use crate::view::render::{render_form, render_outline_panel, render_topics_panel};

const PROMPT: &str = "planner> ";

pub async fn run_interactive<B, R, W>(
    planner: &mut Planner<B>,
    input: R,
    out: &mut W,
    export_dir: &Path,
) -> Result<()>
where
    B: BlogBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Blog Planner. Type 'help' for commands.\n")?;
    write!(out, "{}", render_form(planner.session()))?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => {
                write!(out, "{PROMPT}")?;
                out.flush()?;
                continue;
            }
            Err(message) => {
                writeln!(out, "{message}")?;
                write!(out, "{PROMPT}")?;
                out.flush()?;
                continue;
            }
        };

        debug!("Command: {command:?}");
        if command == Command::Quit {
            break;
        }

        apply(planner, command, out, export_dir).await?;
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

/// Applies one command. Action failures are already recorded in the session, so they are
/// shown through the panels rather than propagated.
async fn apply<B, W>(
    planner: &mut Planner<B>,
    command: Command,
    out: &mut W,
    export_dir: &Path,
) -> Result<()>
where
    B: BlogBackend,
    W: Write,
{
    match command {
        Command::Theme(theme) => {
            planner.session_mut().set_theme(theme);
            write!(out, "{}", render_form(planner.session()))?;
        }
        Command::Count(n) => {
            planner.session_mut().set_num_topics(n);
            write!(out, "{}", render_form(planner.session()))?;
        }
        Command::Audience(audience) => {
            planner.session_mut().set_target_audience(audience);
            write!(out, "{}", render_form(planner.session()))?;
        }
        Command::Topics => {
            writeln!(out, "Generating topics...")?;
            out.flush()?;
            if let Err(e) = planner.generate_topics().await {
                if e.is_client_side() {
                    debug!("Topics form rejected: {e}");
                } else {
                    debug!("Topics request failed: {e}");
                }
            }
            write!(out, "{}", render_topics_panel(planner.session()))?;
        }
        Command::Select(choice) => {
            let selected = match &choice {
                TopicChoice::Number(n) => planner.select_topic_number(*n).map(str::to_string),
                TopicChoice::Text(text) => planner.select_topic(text).map(str::to_string),
            };
            match selected {
                Ok(_) => {
                    write!(out, "{}", render_topics_panel(planner.session()))?;
                    write!(out, "{}", render_outline_panel(planner.session()))?;
                }
                Err(e) => writeln!(out, "Error: {e}")?,
            }
        }
        Command::Outline => {
            if planner.session().selected_topic().is_some() {
                writeln!(out, "Generating outline...")?;
                out.flush()?;
            }
            if let Err(e) = planner.generate_outline().await {
                if e.is_client_side() {
                    debug!("Outline request rejected: {e}");
                } else {
                    debug!("Outline request failed: {e}");
                }
            }
            write!(out, "{}", render_outline_panel(planner.session()))?;
        }
        Command::Export(format) => match planner.export(format, export_dir) {
            Ok(path) => writeln!(out, "Saved {}", path.display())?,
            Err(e) => writeln!(out, "Error: {e}")?,
        },
        Command::Show => {
            write!(out, "{}", render_form(planner.session()))?;
            write!(out, "{}", render_topics_panel(planner.session()))?;
            write!(out, "{}", render_outline_panel(planner.session()))?;
        }
        Command::Help => writeln!(out, "{HELP_TEXT}")?,
        Command::Quit => {}
    }
    Ok(())
}
