mod api_client;
mod cli;
mod config;
mod errors;
mod models;
mod outline;
mod session;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::cli::{Cli, Commands, OutlineArgs, TopicsArgs};
use crate::config::Config;
use crate::outline::render_outline;
use crate::session::{ExportFormat, Planner, Session};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::from_env()?;
    let cli = Cli::parse();

    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(export_dir) = cli.export_dir {
        config.export_dir = export_dir;
    }

    // Logs go to stderr so they never interleave with rendered output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Blog Planner v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(&config.api_base, config.request_timeout)?;
    info!("Backend: {}", client.base_url());

    let session = Session::new(config.default_num_topics, config.default_audience.clone());
    let mut planner = Planner::new(client, session);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            view::run_interactive(&mut planner, stdin, &mut stdout, &config.export_dir).await?;
        }
        Commands::Topics(args) => {
            for (index, topic) in fetch_topics(&mut planner, &args).await?.iter().enumerate() {
                println!("{}. {topic}", index + 1);
            }
        }
        Commands::Outline(args) => run_outline(&mut planner, args, &config).await?,
    }

    Ok(())
}

async fn fetch_topics(planner: &mut Planner<ApiClient>, args: &TopicsArgs) -> Result<Vec<String>> {
    let session = planner.session_mut();
    session.set_theme(args.theme.clone());
    if let Some(count) = args.count {
        session.set_num_topics(count);
    }

    let topics = planner
        .generate_topics()
        .await
        .context("Topic generation failed")?;
    Ok(topics.to_vec())
}

async fn run_outline(planner: &mut Planner<ApiClient>, args: OutlineArgs, config: &Config) -> Result<()> {
    let topics = fetch_topics(planner, &args.topics).await?;
    if let Some(audience) = args.audience {
        planner.session_mut().set_target_audience(audience);
    }

    let topic = planner
        .select_topic_number(args.pick)
        .with_context(|| format!("Could not pick topic {} of {}", args.pick, topics.len()))?
        .to_string();
    info!("Selected topic: {topic}");

    let outline = planner
        .generate_outline()
        .await
        .context("Outline generation failed")?;
    print!("{}", render_outline(outline));

    let mut formats = Vec::new();
    if args.json {
        formats.push(ExportFormat::Json);
    }
    if args.markdown {
        formats.push(ExportFormat::Markdown);
    }
    for format in formats {
        let path = planner.export(format, &config.export_dir)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}
