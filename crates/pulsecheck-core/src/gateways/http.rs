//! Production HTTP fetcher backed by reqwest.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::{FetchGateway, FetchOutcome};

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetchGateway for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        debug!(url, "GET");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                return FetchOutcome::Failure {
                    status: err.status().map(|s| s.as_u16()),
                    error: err.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Failure {
                status: Some(status.as_u16()),
                error: format!("HTTP {status}"),
            };
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        match response.text().await {
            Ok(body) => FetchOutcome::Success {
                status: status.as_u16(),
                body,
                headers,
            },
            Err(err) => FetchOutcome::Failure {
                status: Some(status.as_u16()),
                error: format!("failed to read response body: {err}"),
            },
        }
    }
}
