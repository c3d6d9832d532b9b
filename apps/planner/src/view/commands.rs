//! Parser for the interactive command language.

use crate::session::ExportFormat;

pub const HELP_TEXT: &str = "\
Commands:
  theme <text>        set the blog theme or topic area
  count <1-10>        set how many topic ideas to request
  audience <text>     describe the target audience
  topics              generate topic ideas for the theme
  select <n|topic>    select a topic by number or exact text
  outline             generate an outline for the selected topic
  export json|md      write the outline to the export directory
  show                redraw both panels
  help                show this list
  quit                leave the planner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicChoice {
    /// 1-based, as displayed.
    Number(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Theme(String),
    Count(u32),
    Audience(String),
    Topics,
    Select(TopicChoice),
    Outline,
    Export(ExportFormat),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "theme" => Command::Theme(rest.to_string()),
        "audience" => Command::Audience(rest.to_string()),
        "count" => {
            let n = rest
                .parse::<u32>()
                .map_err(|_| format!("'{rest}' is not a number. Usage: count <1-10>"))?;
            Command::Count(n)
        }
        "topics" => Command::Topics,
        "select" => {
            if rest.is_empty() {
                return Err("Usage: select <n|topic>".to_string());
            }
            match rest.parse::<usize>() {
                Ok(n) => Command::Select(TopicChoice::Number(n)),
                Err(_) => Command::Select(TopicChoice::Text(rest.to_string())),
            }
        }
        "outline" => Command::Outline,
        "export" => match rest.to_ascii_lowercase().as_str() {
            "json" => Command::Export(ExportFormat::Json),
            "md" | "markdown" => Command::Export(ExportFormat::Markdown),
            _ => return Err("Usage: export json|md".to_string()),
        },
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(format!(
                "Unknown command '{other}'. Type 'help' for the list of commands."
            ))
        }
    };

    Ok(Some(command))
}
