//! Global runtime-error capture.
//!
//! Uncaught errors anywhere in the host are funneled through an
//! [`ErrorSink`] and forwarded as best-effort `trackError` reports tagged
//! with the session's survey id. The forwarding task lives for the session
//! and is torn down with [`ErrorMonitor::shutdown`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::report::Reporter;
use crate::session::identity::SurveyId;

/// A captured runtime error.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub message: String,
    pub stack: Option<String>,
}

/// Cloneable handle for pushing errors into the monitor.
///
/// Sends after the monitor has shut down are dropped silently.
#[derive(Clone)]
pub struct ErrorSink(mpsc::UnboundedSender<RuntimeError>);

impl ErrorSink {
    pub fn capture(&self, message: impl Into<String>, stack: Option<String>) {
        let error = RuntimeError {
            message: message.into(),
            stack,
        };
        let _ = self.0.send(error);
    }
}

/// Session-scoped error monitor: one forwarding task over an unbounded
/// channel, one `trackError` report per captured error.
pub struct ErrorMonitor {
    sink: ErrorSink,
    task: JoinHandle<()>,
}

impl ErrorMonitor {
    /// Spawn the forwarding task for this session.
    pub fn install(reporter: Arc<Reporter>, survey_id: SurveyId) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RuntimeError>();
        let task = tokio::spawn(async move {
            while let Some(error) = rx.recv().await {
                reporter
                    .track_error(survey_id.as_str(), &error.message, error.stack.as_deref())
                    .await;
            }
        });
        Self {
            sink: ErrorSink(tx),
            task,
        }
    }

    pub fn sink(&self) -> ErrorSink {
        self.sink.clone()
    }

    /// Stop forwarding. In-flight reports are abandoned; later captures go
    /// nowhere.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

/// Chain the process panic hook into the sink so uncaught panics are
/// captured for the session's lifetime.
///
/// The hook itself cannot be uninstalled; once the monitor shuts down its
/// sends are simply dropped.
pub fn install_panic_hook(sink: ErrorSink) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic with non-string payload".to_string());
        let location = info.location().map(|l| l.to_string());
        sink.capture(message, location);
        previous(info);
    }));
}
