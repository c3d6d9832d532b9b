//! API client: the single point of entry for all calls to the generation backend.
//!
//! Two endpoints, one error contract: every failure (network, non-2xx, malformed 2xx body)
//! comes back as a `PlannerError` whose `Display` is the message shown to the user.
//! No retries. The request timeout comes from `Config`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::errors::PlannerError;
use crate::models::BlogOutline;

pub const TOPICS_PATH: &str = "/api/topics";
pub const OUTLINE_PATH: &str = "/api/outline";

#[derive(Debug, Serialize)]
struct TopicsRequest<'a> {
    theme: &'a str,
    num_topics: u32,
}

#[derive(Debug, Serialize)]
struct OutlineRequest<'a> {
    selected_topic: &'a str,
    target_audience: &'a str,
}

#[derive(Debug, Deserialize)]
struct TopicsEnvelope {
    #[serde(default)]
    generated_topics: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct OutlineEnvelope {
    #[serde(default)]
    generated_outline: Option<BlogOutline>,
}

/// Best-effort error body. Anything that does not parse into this falls back to the
/// status line.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// The operations the session controller needs from a backend.
#[async_trait]
pub trait BlogBackend: Send + Sync {
    async fn request_topic_suggestions(
        &self,
        theme: &str,
        num_topics: u32,
    ) -> Result<Vec<String>, PlannerError>;

    async fn request_outline(
        &self,
        selected_topic: &str,
        target_audience: &str,
    ) -> Result<BlogOutline, PlannerError>;
}

/// HTTP implementation of `BlogBackend` over reqwest.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlannerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends `body` as JSON to `path` and decodes a 2xx body into `T`.
    /// Non-2xx responses are turned into `PlannerError::Api` here.
    async fn post_json<B, T>(&self, path: &str, body: &B, operation: &str) -> Result<T, PlannerError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("{operation}: POST {url}");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("{operation} error: request to {url} failed: {e}");
                PlannerError::Transport(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!("{operation} error: failed to read response body: {e}");
            PlannerError::Transport(e)
        })?;

        if !status.is_success() {
            let message = error_message_from_body(status, &text);
            warn!("{operation} error: backend returned {status}: {message}");
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            error!("{operation} error: response body is not the expected JSON: {e}");
            PlannerError::MalformedResponse(format!(
                "API Error: Response body could not be parsed: {e}"
            ))
        })
    }

    /// POST /api/topics
    ///
    /// `num_topics` is forwarded untouched; range checks belong to the form.
    pub async fn request_topic_suggestions(
        &self,
        theme: &str,
        num_topics: u32,
    ) -> Result<Vec<String>, PlannerError> {
        let envelope: TopicsEnvelope = self
            .post_json(
                TOPICS_PATH,
                &TopicsRequest { theme, num_topics },
                "request_topic_suggestions",
            )
            .await?;

        envelope.generated_topics.ok_or_else(|| {
            error!("request_topic_suggestions error: response did not contain 'generated_topics'");
            missing_field("generated_topics")
        })
    }

    /// POST /api/outline
    pub async fn request_outline(
        &self,
        selected_topic: &str,
        target_audience: &str,
    ) -> Result<BlogOutline, PlannerError> {
        let envelope: OutlineEnvelope = self
            .post_json(
                OUTLINE_PATH,
                &OutlineRequest {
                    selected_topic,
                    target_audience,
                },
                "request_outline",
            )
            .await?;

        envelope.generated_outline.ok_or_else(|| {
            error!("request_outline error: response did not contain 'generated_outline'");
            missing_field("generated_outline")
        })
    }
}

#[async_trait]
impl BlogBackend for ApiClient {
    async fn request_topic_suggestions(
        &self,
        theme: &str,
        num_topics: u32,
    ) -> Result<Vec<String>, PlannerError> {
        ApiClient::request_topic_suggestions(self, theme, num_topics).await
    }

    async fn request_outline(
        &self,
        selected_topic: &str,
        target_audience: &str,
    ) -> Result<BlogOutline, PlannerError> {
        ApiClient::request_outline(self, selected_topic, target_audience).await
    }
}

/// Picks the backend's `error` string if the body carries one, else the status line.
fn error_message_from_body(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| status_fallback_message(status))
}

fn status_fallback_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("API Error: {} {}", status.as_u16(), reason),
        None => format!("API Error: {}", status.as_u16()),
    }
}

fn missing_field(field: &str) -> PlannerError {
    PlannerError::MalformedResponse(format!(
        "API Error: Response did not contain '{field}'."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_error_message_prefers_backend_error_field() {
        let msg = error_message_from_body(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "rate limited"}"#,
        );
        assert_eq!(msg, "rate limited");
    }

    #[test]
    fn test_error_message_falls_back_on_non_json_body() {
        let msg = error_message_from_body(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(msg, "API Error: 502 Bad Gateway");
    }

    #[test]
    fn test_error_message_falls_back_when_field_absent_or_wrong_type() {
        let absent = error_message_from_body(StatusCode::NOT_FOUND, r#"{"message": "nope"}"#);
        assert_eq!(absent, "API Error: 404 Not Found");

        let wrong_type = error_message_from_body(StatusCode::BAD_REQUEST, r#"{"error": {"code": 1}}"#);
        assert_eq!(wrong_type, "API Error: 400 Bad Request");
    }

    #[test]
    fn test_error_message_falls_back_on_empty_error_string() {
        let msg = error_message_from_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": ""}"#);
        assert_eq!(msg, "API Error: 500 Internal Server Error");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint(TOPICS_PATH), "http://localhost:5000/api/topics");
    }

    #[tokio::test]
    async fn test_topics_success_returns_server_sequence_in_order() {
        // Echoes the request back so the wire names are checked too.
        let router = Router::new().route(
            TOPICS_PATH,
            post(|Json(body): Json<Value>| async move {
                let theme = body["theme"].as_str().unwrap_or_default().to_string();
                let n = body["num_topics"].as_u64().unwrap_or_default();
                let topics: Vec<String> = (1..=n).map(|i| format!("{theme} #{i}")).collect();
                Json(json!({ "generated_topics": topics }))
            }),
        );
        let base = spawn_backend(router).await;

        let topics = client_for(&base)
            .request_topic_suggestions("Rust", 3)
            .await
            .unwrap();
        assert_eq!(topics, vec!["Rust #1", "Rust #2", "Rust #3"]);
    }

    #[tokio::test]
    async fn test_topics_num_topics_is_passed_through_unclamped() {
        let router = Router::new().route(
            TOPICS_PATH,
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "generated_topics": [body["num_topics"].to_string()] }))
            }),
        );
        let base = spawn_backend(router).await;

        let topics = client_for(&base)
            .request_topic_suggestions("Rust", 25)
            .await
            .unwrap();
        assert_eq!(topics, vec!["25"]);
    }

    #[tokio::test]
    async fn test_topics_500_with_error_body_yields_exact_message() {
        let router = Router::new().route(
            TOPICS_PATH,
            post(|| async {
                (
                    AxumStatus::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "rate limited" })),
                )
            }),
        );
        let base = spawn_backend(router).await;

        let err = client_for(&base)
            .request_topic_suggestions("Rust", 3)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
        assert!(matches!(err, PlannerError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_topics_missing_field_is_malformed_response() {
        let router = Router::new().route(
            TOPICS_PATH,
            post(|| async { Json(json!({ "topics": ["wrong key"] })) }),
        );
        let base = spawn_backend(router).await;

        let err = client_for(&base)
            .request_topic_suggestions("Rust", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::MalformedResponse(_)));
        assert_eq!(
            err.to_string(),
            "API Error: Response did not contain 'generated_topics'."
        );
    }

    #[tokio::test]
    async fn test_topics_non_json_success_body_is_malformed_response() {
        let router = Router::new().route(TOPICS_PATH, post(|| async { "plain text" }));
        let base = spawn_backend(router).await;

        let err = client_for(&base)
            .request_topic_suggestions("Rust", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_outline_success_decodes_wire_names() {
        let router = Router::new().route(
            OUTLINE_PATH,
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "generated_outline": {
                        "title_suggestion": body["selected_topic"],
                        "introduction_hook": format!("For {}", body["target_audience"].as_str().unwrap_or_default()),
                        "sections": [{"heading": "S1", "key_points": ["a", "b"]}],
                        "conclusion_summary": "Done"
                    }
                }))
            }),
        );
        let base = spawn_backend(router).await;

        let outline = client_for(&base)
            .request_outline("Async Rust", "beginners")
            .await
            .unwrap();
        assert_eq!(outline.title_suggestion, "Async Rust");
        assert_eq!(outline.introduction_hook, "For beginners");
        assert_eq!(outline.sections[0].key_points, vec!["a", "b"]);
        assert!(outline.call_to_action.is_none());
    }

    #[tokio::test]
    async fn test_outline_missing_field_is_malformed_response() {
        let router = Router::new().route(OUTLINE_PATH, post(|| async { Json(json!({})) }));
        let base = spawn_backend(router).await;

        let err = client_for(&base)
            .request_outline("Async Rust", "beginners")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API Error: Response did not contain 'generated_outline'."
        );
    }

    #[tokio::test]
    async fn test_outline_error_without_body_uses_status_line() {
        let router = Router::new().route(
            OUTLINE_PATH,
            post(|| async { AxumStatus::SERVICE_UNAVAILABLE }),
        );
        let base = spawn_backend(router).await;

        let err = client_for(&base)
            .request_outline("Async Rust", "beginners")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API Error: 503 Service Unavailable");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .request_topic_suggestions("Rust", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Transport(_)));
    }
}
