use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Base URL of the generation backend when nothing overrides it.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
/// Form defaults used when the environment leaves them unset.
pub const DEFAULT_AUDIENCE: &str = "General Audience";
pub const DEFAULT_NUM_TOPICS: u32 = 3;
pub const MIN_TOPICS: u32 = 1;
pub const MAX_TOPICS: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Every variable is optional; CLI flags are applied on top in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub export_dir: PathBuf,
    pub request_timeout: Duration,
    pub default_num_topics: u32,
    pub default_audience: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = match std::env::var("PLANNER_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("PLANNER_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let default_num_topics = match std::env::var("DEFAULT_NUM_TOPICS") {
            Ok(raw) => clamp_num_topics(
                raw.parse::<u32>()
                    .context("DEFAULT_NUM_TOPICS must be a positive integer")?,
            ),
            Err(_) => DEFAULT_NUM_TOPICS,
        };

        Ok(Config {
            api_base: std::env::var("PLANNER_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            export_dir: std::env::var("PLANNER_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            request_timeout: Duration::from_secs(timeout_secs),
            default_num_topics,
            default_audience: std::env::var("DEFAULT_AUDIENCE")
                .unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Keeps a topic count inside the range the form accepts.
pub fn clamp_num_topics(n: u32) -> u32 {
    n.clamp(MIN_TOPICS, MAX_TOPICS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_num_topics_bounds() {
        assert_eq!(clamp_num_topics(0), 1);
        assert_eq!(clamp_num_topics(1), 1);
        assert_eq!(clamp_num_topics(7), 7);
        assert_eq!(clamp_num_topics(10), 10);
        assert_eq!(clamp_num_topics(42), 10);
    }

    #[test]
    fn test_form_defaults_match_fresh_form() {
        assert_eq!(DEFAULT_NUM_TOPICS, 3);
        assert_eq!(DEFAULT_AUDIENCE, "General Audience");
        assert_eq!(clamp_num_topics(DEFAULT_NUM_TOPICS), DEFAULT_NUM_TOPICS);
    }
}
