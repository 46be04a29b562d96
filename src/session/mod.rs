//! Session wiring — identity, address resolution, and bootstrap glue.

pub mod identity;
pub mod lookup;

pub use identity::SurveyId;
pub use lookup::{AddressLookup, IpifyLookup, resolve_address, UNKNOWN_ADDRESS};

use std::sync::Arc;

use crate::config::SurveyConfig;
use crate::flow::SurveyController;
use crate::monitor::{install_panic_hook, ErrorMonitor, ErrorSink};
use crate::report::Reporter;

/// A fully wired survey session: controller, reporter, and error monitor.
///
/// Mirrors what the host does at mount: mint the identity, start the
/// one-shot address lookup in the background, and subscribe the global
/// error capture. Survey identity lives only in memory; ending the session
/// ends it.
pub struct SurveySession {
    controller: Arc<SurveyController>,
    monitor: ErrorMonitor,
}

impl SurveySession {
    /// Start a session against the configured endpoints.
    ///
    /// Must be called from within a tokio runtime. Stages after Landing
    /// render as Loading until the spawned address lookup resolves or
    /// falls back to the sentinel.
    pub fn start(config: SurveyConfig) -> Self {
        let reporter = Arc::new(Reporter::over_http(config.script_url.clone()));
        let controller = Arc::new(SurveyController::new(
            config.clone(),
            Arc::clone(&reporter),
        ));
        let monitor = ErrorMonitor::install(reporter, controller.survey_id().clone());
        install_panic_hook(monitor.sink());

        let lookup_url = config.ip_lookup_url;
        let lookup_controller = Arc::clone(&controller);
        tokio::spawn(async move {
            let lookup = IpifyLookup::new(lookup_url);
            lookup_controller.resolve_client_address(&lookup).await;
        });

        Self { controller, monitor }
    }

    pub fn controller(&self) -> Arc<SurveyController> {
        Arc::clone(&self.controller)
    }

    pub fn error_sink(&self) -> ErrorSink {
        self.monitor.sink()
    }

    /// Tear the session down. Pending transitions and in-flight reports
    /// are abandoned silently.
    pub fn shutdown(self) {
        self.monitor.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Stage, View};

    #[tokio::test(start_paused = true)]
    async fn session_starts_at_landing() {
        let config = SurveyConfig {
            // Unroutable endpoints; the lookup falls back to the sentinel.
            script_url: "http://127.0.0.1:9/".to_string(),
            ip_lookup_url: "http://127.0.0.1:9/".to_string(),
            ..SurveyConfig::default()
        };
        let session = SurveySession::start(config);
        let controller = session.controller();

        assert_eq!(controller.stage().await, Stage::Landing);
        assert_eq!(controller.view().await, View::Landing);

        session.shutdown();
    }
}
