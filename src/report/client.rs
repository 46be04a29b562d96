//! Core report operation: one envelope, one POST, two delivery modes.

use std::sync::Arc;

use crate::error::{ReportError, TransportError};
use crate::report::actions;
use crate::report::transport::{HttpTransport, Transport};

/// How much the caller gets to know about a report's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Opaque send: the HTTP status is not inspected, so a non-success
    /// response is never raised to the caller. Transport failures still
    /// surface so the wrapper can log them.
    BestEffort,
    /// The caller receives a definite success/failure signal; a non-success
    /// response is a failure carrying the status and body for diagnostics.
    Verified,
}

/// Client for the fixed collection endpoint.
pub struct Reporter {
    transport: Arc<dyn Transport>,
    url: String,
}

impl Reporter {
    pub fn new(url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            url: url.into(),
        }
    }

    /// Production reporter backed by [`HttpTransport`].
    pub fn over_http(url: impl Into<String>) -> Self {
        Self::new(url, Arc::new(HttpTransport::new()))
    }

    /// Serialize `{action, data}` and post it once to the endpoint.
    pub async fn report(
        &self,
        action: &str,
        data: serde_json::Value,
        mode: DeliveryMode,
    ) -> Result<(), ReportError> {
        let envelope = serde_json::json!({
            "action": action,
            "data": data,
        });
        let body = serde_json::to_string(&envelope)?;

        let response = match self.transport.post(&self.url, body).await {
            Ok(response) => response,
            Err(TransportError::FetchFailed(detail))
                if action == actions::SUBMIT_REGISTRATION_DATA =>
            {
                // The collection platform drops the response on some fully
                // processed registration posts; a missing response counts as
                // success for this action only.
                tracing::warn!(
                    action,
                    %detail,
                    "no response on registration submit; assuming success"
                );
                return Ok(());
            }
            Err(source) => {
                return Err(ReportError::Transport {
                    action: action.to_string(),
                    source,
                });
            }
        };

        if mode == DeliveryMode::Verified && !response.is_success() {
            tracing::error!(
                action,
                status = response.status,
                body = %response.body,
                "verified report rejected"
            );
            return Err(ReportError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::RecordingTransport;

    fn reporter(transport: Arc<RecordingTransport>) -> Reporter {
        Reporter::new("https://collect.example/exec", transport)
    }

    #[tokio::test]
    async fn envelope_wraps_action_and_data() {
        let transport = Arc::new(RecordingTransport::new());
        let client = reporter(Arc::clone(&transport));

        client
            .report(
                "logSurveyStart",
                serde_json::json!({"ip": "1.2.3.4", "surveyId": "s1"}),
                DeliveryMode::BestEffort,
            )
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://collect.example/exec");
        assert_eq!(requests[0].body["action"], "logSurveyStart");
        assert_eq!(requests[0].body["data"]["ip"], "1.2.3.4");
        assert_eq!(requests[0].body["data"]["surveyId"], "s1");
    }

    #[tokio::test]
    async fn best_effort_ignores_http_status() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_status(500, "boom");
        let client = reporter(Arc::clone(&transport));

        let result = client
            .report(
                "logSurveyStart",
                serde_json::json!({}),
                DeliveryMode::BestEffort,
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn verified_surfaces_status_and_body() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_status(403, "script not authorized");
        let client = reporter(Arc::clone(&transport));

        let error = client
            .report(
                "submitQuestionAnswers",
                serde_json::json!({}),
                DeliveryMode::Verified,
            )
            .await
            .unwrap_err();

        match error {
            ReportError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "script not authorized");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_failure_masked_for_registration_only() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_fetch_failure("Failed to fetch");
        let client = reporter(Arc::clone(&transport));

        let result = client
            .report(
                actions::SUBMIT_REGISTRATION_DATA,
                serde_json::json!({}),
                DeliveryMode::Verified,
            )
            .await;
        assert!(result.is_ok(), "registration fetch failure must be masked");
    }

    #[tokio::test]
    async fn fetch_failure_propagates_for_other_actions() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_fetch_failure("Failed to fetch");
        let client = reporter(Arc::clone(&transport));

        let error = client
            .report(
                "submitQuestionAnswers",
                serde_json::json!({}),
                DeliveryMode::Verified,
            )
            .await
            .unwrap_err();

        match error {
            ReportError::Transport { action, source } => {
                assert_eq!(action, "submitQuestionAnswers");
                assert!(matches!(source, TransportError::FetchFailed(_)));
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn request_error_not_masked_for_registration() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_request_error("body rejected");
        let client = reporter(Arc::clone(&transport));

        let result = client
            .report(
                actions::SUBMIT_REGISTRATION_DATA,
                serde_json::json!({}),
                DeliveryMode::Verified,
            )
            .await;
        assert!(result.is_err(), "only the no-response class is masked");
    }
}
