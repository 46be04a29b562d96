//! Reporting client — pushes survey actions to the collection endpoint.

pub mod actions;
pub mod client;
pub mod transport;

pub use client::{DeliveryMode, Reporter};
pub use transport::{HttpTransport, Transport, TransportResponse};

#[cfg(test)]
pub(crate) mod testing {
    //! Scriptable in-memory transport shared by the unit tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::TransportError;
    use crate::report::transport::{Transport, TransportResponse};

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub url: String,
        /// Envelope parsed back from the serialized body.
        pub body: serde_json::Value,
    }

    enum ScriptedOutcome {
        Status(u16, String),
        FetchFailed(String),
        RequestError(String),
    }

    /// Records every post and replays scripted outcomes in order; once the
    /// script is exhausted every post succeeds with an empty 200.
    pub(crate) struct RecordingTransport {
        requests: Mutex<Vec<RecordedRequest>>,
        script: Mutex<VecDeque<ScriptedOutcome>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                script: Mutex::new(VecDeque::new()),
            }
        }

        pub(crate) fn push_status(&self, status: u16, body: &str) {
            self.script
                .lock()
                .unwrap()
                .push_back(ScriptedOutcome::Status(status, body.to_string()));
        }

        pub(crate) fn push_fetch_failure(&self, detail: &str) {
            self.script
                .lock()
                .unwrap()
                .push_back(ScriptedOutcome::FetchFailed(detail.to_string()));
        }

        pub(crate) fn push_request_error(&self, detail: &str) {
            self.script
                .lock()
                .unwrap()
                .push_back(ScriptedOutcome::RequestError(detail.to_string()));
        }

        pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Action names of all recorded envelopes, in send order.
        pub(crate) fn actions(&self) -> Vec<String> {
            self.requests()
                .iter()
                .filter_map(|r| r.body["action"].as_str().map(String::from))
                .collect()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn post(
            &self,
            url: &str,
            body: String,
        ) -> Result<TransportResponse, TransportError> {
            let parsed =
                serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body.clone()));
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                body: parsed,
            });

            match self.script.lock().unwrap().pop_front() {
                Some(ScriptedOutcome::Status(status, body)) => {
                    Ok(TransportResponse { status, body })
                }
                Some(ScriptedOutcome::FetchFailed(detail)) => {
                    Err(TransportError::FetchFailed(detail))
                }
                Some(ScriptedOutcome::RequestError(detail)) => {
                    Err(TransportError::Request(detail))
                }
                None => Ok(TransportResponse {
                    status: 200,
                    body: String::new(),
                }),
            }
        }
    }
}
