//! Resend email delivery collaborator.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use proctor_core::error::DeliveryError;
use proctor_core::traits::{DeliveryReceipt, DeliveryRequest, ReportDelivery};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Delivery over a Resend-compatible email API.
pub struct ResendDelivery {
    api_key: String,
    base_url: String,
    sender: String,
    recipient: String,
    client: reqwest::Client,
}

impl ResendDelivery {
    pub fn new(api_key: &str, sender: &str, recipient: &str, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            client,
        }
    }
}

#[derive(Serialize)]
struct ResendRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ResendErrorBody {
    message: String,
}

/// Wrap the rendered breakdown in the full report email document.
fn build_email_html(request: &DeliveryRequest) -> String {
    let score = &request.score;
    let score_color = if score.percentage >= 70 {
        "#16a34a"
    } else if score.percentage >= 50 {
        "#eab308"
    } else {
        "#dc2626"
    };
    let date = chrono::Utc::now().format("%Y-%m-%d");

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px;">
  <div style="text-align: center; margin-bottom: 30px;">
    <h1 style="color: #1f2937; margin-bottom: 10px;">Candidate Assessment Results</h1>
    <div style="background: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
      <h2 style="color: #374151; margin: 0 0 10px 0;">Candidate: {first} {last}</h2>
      <div style="font-size: 36px; font-weight: bold; color: {score_color}; margin: 10px 0;">{percentage}%</div>
      <p style="color: #6b7280; margin: 0; font-size: 18px;">{correct} / {total} correct answers</p>
      <p style="color: #6b7280; margin: 10px 0 0 0;">Date: {date}</p>
    </div>
  </div>
  <div style="margin-top: 30px;">
    <h3 style="color: #374151; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px;">Answer Breakdown</h3>
    {breakdown}
  </div>
  <div style="margin-top: 30px; padding: 20px; background: #f9fafb; border-radius: 8px; text-align: center;">
    <p style="color: #6b7280; margin: 0; font-size: 14px;">This report was generated automatically by proctor</p>
  </div>
</div>"#,
        first = request.first_name,
        last = request.last_name,
        percentage = score.percentage,
        correct = score.correct,
        total = score.total,
        breakdown = request.breakdown_html,
    )
}

#[async_trait]
impl ReportDelivery for ResendDelivery {
    fn name(&self) -> &str {
        "resend"
    }

    #[instrument(skip(self, request), fields(candidate = %request.first_name))]
    async fn deliver(&self, request: &DeliveryRequest) -> anyhow::Result<DeliveryReceipt> {
        let start = Instant::now();

        let body = ResendRequest {
            from: self.sender.clone(),
            to: vec![self.recipient.clone()],
            subject: request.subject(),
            html: build_email_html(request),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    DeliveryError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(DeliveryError::Api { status, message }.into());
        }

        let api_response: ResendResponse =
            response.json().await.map_err(|e| DeliveryError::Api {
                status: 0,
                message: format!("failed to parse response: {e}"),
            })?;

        Ok(DeliveryReceipt {
            message_id: Some(api_response.id),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proctor_core::session::Score;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> DeliveryRequest {
        DeliveryRequest {
            first_name: "Alice".into(),
            last_name: "Martin".into(),
            score: Score {
                correct: 14,
                total: 20,
                percentage: 70,
            },
            breakdown_html: "<div>breakdown</div>".into(),
        }
    }

    #[tokio::test]
    async fn successful_delivery() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"id": "msg-123"})),
            )
            .mount(&server)
            .await;

        let delivery = ResendDelivery::new(
            "test-key",
            "assessments@example.com",
            "recruiting@example.com",
            Some(server.uri()),
        );

        let receipt = delivery.deliver(&request()).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("msg-123"));
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let delivery = ResendDelivery::new(
            "bad-key",
            "assessments@example.com",
            "recruiting@example.com",
            Some(server.uri()),
        );

        let err = delivery.deliver(&request()).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/emails"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "internal error"})),
            )
            .mount(&server)
            .await;

        let delivery = ResendDelivery::new(
            "test-key",
            "assessments@example.com",
            "recruiting@example.com",
            Some(server.uri()),
        );

        let err = delivery.deliver(&request()).await.unwrap_err();
        let delivery_err = err.downcast::<DeliveryError>().unwrap();
        match delivery_err {
            DeliveryError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn email_html_carries_score_and_breakdown() {
        let html = build_email_html(&request());
        assert!(html.contains("Alice Martin"));
        assert!(html.contains("70%"));
        assert!(html.contains("14 / 20"));
        assert!(html.contains("<div>breakdown</div>"));
        // 70 and above renders green.
        assert!(html.contains("#16a34a"));
    }
}
