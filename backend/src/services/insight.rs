//! Client for the external insight (ML) service. Transport failures are
//! folded into a small typed surface so handlers only ever see a bounded
//! set of upstream errors.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::{config::Config, error::AppError};

#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    #[error("ML service timeout")]
    Timeout { timeout_ms: u64 },
    #[error("ML service unreachable")]
    Unreachable { base_url: String },
    #[error("ML service error (status {status})")]
    Upstream { status: u16, detail: String },
    #[error("ML request failed: {0}")]
    Request(String),
}

impl From<InsightError> for AppError {
    fn from(err: InsightError) -> Self {
        match err {
            InsightError::Timeout { timeout_ms } => AppError::BadGateway {
                message: "ML service timeout".to_string(),
                detail: Some(serde_json::json!({
                    "detail": format!("Request to ML exceeded {}ms", timeout_ms),
                })),
            },
            InsightError::Unreachable { base_url } => AppError::BadGateway {
                message: "ML service unreachable".to_string(),
                detail: Some(serde_json::json!({
                    "detail": format!("Cannot reach ML service at {}", base_url),
                })),
            },
            InsightError::Upstream { status, detail } => AppError::BadGateway {
                message: "ML service error".to_string(),
                detail: Some(serde_json::json!({
                    "status": status,
                    "detail": detail,
                })),
            },
            InsightError::Request(detail) => AppError::BadGateway {
                message: "ML service error".to_string(),
                detail: Some(serde_json::json!({ "detail": detail })),
            },
        }
    }
}

#[async_trait]
pub trait InsightClient: Send + Sync {
    /// Sends the aggregated learner payload for persona generation and
    /// returns the service's JSON response.
    async fn generate_profile(&self, payload: &Value) -> Result<Value, InsightError>;
}

pub struct HttpInsightClient {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpInsightClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("learntrack-backend/1.0")
            .timeout(Duration::from_millis(config.ml_timeout_ms))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.ml_service_url.trim_end_matches('/').to_string(),
            timeout_ms: config.ml_timeout_ms,
        })
    }

    fn classify(&self, err: reqwest::Error) -> InsightError {
        if err.is_timeout() {
            return InsightError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }
        if err.is_connect() {
            return InsightError::Unreachable {
                base_url: self.base_url.clone(),
            };
        }
        InsightError::Request(err.to_string())
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, InsightError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail = if detail.is_empty() {
                format!("ML responded with status {}", status.as_u16())
            } else {
                detail
            };
            return Err(InsightError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        response.json().await.map_err(|e| self.classify(e))
    }
}

#[async_trait]
impl InsightClient for HttpInsightClient {
    async fn generate_profile(&self, payload: &Value) -> Result<Value, InsightError> {
        self.post_json("/profile/generate", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn timeout_maps_to_bad_gateway_with_deadline_detail() {
        let err: AppError = InsightError::Timeout { timeout_ms: 15_000 }.into();
        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_GATEWAY);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "ML service timeout");
        assert_eq!(json["details"]["detail"], "Request to ML exceeded 15000ms");
    }

    #[tokio::test]
    async fn unreachable_and_upstream_map_to_distinct_messages() {
        let unreachable: AppError = InsightError::Unreachable {
            base_url: "http://127.0.0.1:8000".into(),
        }
        .into();
        let upstream: AppError = InsightError::Upstream {
            status: 500,
            detail: "boom".into(),
        }
        .into();

        let body = |e: AppError| async {
            let response = e.into_response();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            serde_json::from_slice::<Value>(&bytes).unwrap()
        };

        let a = body(unreachable).await;
        let b = body(upstream).await;
        assert_eq!(a["error"], "ML service unreachable");
        assert_eq!(b["error"], "ML service error");
        assert_eq!(b["details"]["status"], 500);
    }
}
