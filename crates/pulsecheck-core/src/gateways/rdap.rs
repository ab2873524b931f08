//! Domain registration lookup over RDAP.
//!
//! `rdap.org` redirects to the registry responsible for the TLD, so one
//! endpoint covers every registrable domain.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{GatewayError, RegistrationGateway};

pub struct RdapGateway {
    client: reqwest::Client,
    base: String,
}

impl RdapGateway {
    pub fn new(base: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .context("failed to build RDAP client")?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Deserialize)]
struct RdapResponse {
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction")]
    action: String,
    #[serde(rename = "eventDate")]
    date: DateTime<Utc>,
}

#[async_trait]
impl RegistrationGateway for RdapGateway {
    async fn creation_date(&self, host: &str) -> Result<DateTime<Utc>, GatewayError> {
        let url = format!("{}/domain/{host}", self.base);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let parsed: RdapResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))?;

        parsed
            .events
            .into_iter()
            .find(|event| event.action == "registration")
            .map(|event| event.date)
            .ok_or_else(|| GatewayError::Decode("no registration event in RDAP record".to_string()))
    }
}
