//! Client address lookup — resolved once at session start.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SessionError;

/// Sentinel substituted when the lookup fails for any reason.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// One-shot lookup of the caller's network address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self) -> Result<String, SessionError>;
}

/// Lookup against an ipify-style endpoint returning `{"ip": "..."}`.
pub struct IpifyLookup {
    client: reqwest::Client,
    url: String,
}

impl IpifyLookup {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl AddressLookup for IpifyLookup {
    async fn lookup(&self) -> Result<String, SessionError> {
        #[derive(Deserialize)]
        struct IpResponse {
            ip: String,
        }

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SessionError::Lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SessionError::Lookup(format!(
                "lookup returned {}",
                response.status()
            )));
        }

        let parsed: IpResponse = response
            .json()
            .await
            .map_err(|e| SessionError::Lookup(e.to_string()))?;
        Ok(parsed.ip)
    }
}

/// Resolve the client address, substituting the sentinel on failure. The
/// failure never reaches the user.
pub async fn resolve_address(lookup: &dyn AddressLookup) -> String {
    match lookup.lookup().await {
        Ok(ip) => ip,
        Err(error) => {
            tracing::warn!(%error, "address lookup failed; using sentinel");
            UNKNOWN_ADDRESS.to_string()
        }
    }
}
