//! Per-session survey identity.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random suffix in a minted identifier.
const SUFFIX_LEN: usize = 9;

/// Opaque session identifier correlating every report of one traversal.
///
/// Minted once at controller construction, immutable for the session, and
/// never persisted anywhere durable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SurveyId(String);

impl SurveyId {
    /// Mint a fresh identifier: `survey_<unix-millis>_<random suffix>`.
    pub fn mint() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .map(char::from)
            .map(|c| c.to_ascii_lowercase())
            .take(SUFFIX_LEN)
            .collect();
        Self(format!("survey_{millis}_{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurveyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_format() {
        let id = SurveyId::mint();
        let parts: Vec<&str> = id.as_str().splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "survey");
        assert!(parts[1].parse::<i64>().is_ok(), "timestamp part: {}", parts[1]);
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn mint_is_unique_per_call() {
        let a = SurveyId::mint();
        let b = SurveyId::mint();
        assert_ne!(a, b);
    }
}
