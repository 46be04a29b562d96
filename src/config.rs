//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Deployed collection endpoint (Google Apps Script web app).
pub const DEFAULT_SCRIPT_URL: &str = "https://script.google.com/macros/s/AKfycbwa8mcbgZNJ3lRgE7k0vgwmCDyyaTCfWNPOiqzFMqoUGxYLdrZvfeClE5J8RyjSG-gOpQ/exec";

/// Third-party IP lookup service.
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Survey configuration.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Collection endpoint all reports are posted to.
    pub script_url: String,
    /// Address lookup endpoint, expected to return `{"ip": "..."}`.
    pub ip_lookup_url: String,
    /// Pacing delay shown between ordinary stage transitions.
    pub advance_delay: Duration,
    /// Shorter pacing delay for the registration → completed transition.
    pub completion_delay: Duration,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            script_url: DEFAULT_SCRIPT_URL.to_string(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            advance_delay: Duration::from_millis(2000),
            completion_delay: Duration::from_millis(1000),
        }
    }
}

impl SurveyConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Recognized: `SURVEY_SCRIPT_URL`, `SURVEY_IP_LOOKUP_URL`,
    /// `SURVEY_ADVANCE_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SURVEY_SCRIPT_URL") {
            config.script_url = url;
        }
        if let Ok(url) = std::env::var("SURVEY_IP_LOOKUP_URL") {
            config.ip_lookup_url = url;
        }
        if let Ok(raw) = std::env::var("SURVEY_ADVANCE_DELAY_MS") {
            let millis: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SURVEY_ADVANCE_DELAY_MS".to_string(),
                message: format!("expected milliseconds, got {raw:?}"),
            })?;
            config.advance_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }
}
