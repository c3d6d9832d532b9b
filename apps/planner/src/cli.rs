use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "planner")]
#[command(about = "Plan blog posts: topic ideas, outlines and exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the generation backend (overrides PLANNER_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Directory exported outlines are written to (overrides PLANNER_EXPORT_DIR)
    #[arg(long, global = true)]
    pub export_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session (default)
    Interactive,

    /// Request topic ideas for a theme and print them
    Topics(TopicsArgs),

    /// Request topic ideas, pick one, and print its outline
    Outline(OutlineArgs),
}

#[derive(Args, Debug)]
pub struct TopicsArgs {
    #[arg(long)]
    pub theme: String,

    /// Number of topic ideas (1-10)
    #[arg(long)]
    pub count: Option<u32>,
}

#[derive(Args, Debug)]
pub struct OutlineArgs {
    #[command(flatten)]
    pub topics: TopicsArgs,

    /// 1-based number of the topic to outline
    #[arg(long, default_value_t = 1)]
    pub pick: usize,

    #[arg(long)]
    pub audience: Option<String>,

    /// Also export the outline as JSON
    #[arg(long)]
    pub json: bool,

    /// Also export the outline as Markdown
    #[arg(long)]
    pub markdown: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["planner"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_outline_args_parse() {
        let cli = Cli::try_parse_from([
            "planner",
            "--api-base",
            "http://backend:5000",
            "outline",
            "--theme",
            "AI in Education",
            "--count",
            "4",
            "--pick",
            "2",
            "--markdown",
        ])
        .unwrap();

        assert_eq!(cli.api_base.as_deref(), Some("http://backend:5000"));
        match cli.command {
            Some(Commands::Outline(args)) => {
                assert_eq!(args.topics.theme, "AI in Education");
                assert_eq!(args.topics.count, Some(4));
                assert_eq!(args.pick, 2);
                assert!(args.markdown);
                assert!(!args.json);
                assert!(args.audience.is_none());
            }
            other => panic!("expected outline command, got {other:?}"),
        }
    }
}
