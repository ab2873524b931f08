//! Configuration and the single public entry point.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::collectors;
use crate::gateways::{github::GitHubGateway, http::HttpFetcher, rdap::RdapGateway, Gateways};
use crate::report::Report;
use crate::scoring;
use crate::url_utils::Subject;

const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_RDAP_BASE: &str = "https://rdap.org";

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Timeout applied to every individual external call.
    pub request_timeout: Duration,
    /// Envelope around each collector task; must exceed the sum a single
    /// collector can spend on its sequential calls being slow-but-alive.
    pub collector_envelope: Duration,
    pub user_agent: String,
    pub github_api_base: String,
    pub rdap_base: String,
    pub github_token: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            collector_envelope: Duration::from_secs(20),
            user_agent: format!("pulsecheck/{} (analysis bot)", env!("CARGO_PKG_VERSION")),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            rdap_base: DEFAULT_RDAP_BASE.to_string(),
            github_token: None,
        }
    }
}

impl AnalyzerConfig {
    /// Default configuration with the GitHub token taken from the
    /// `GITHUB_TOKEN` environment variable, when set.
    pub fn from_env() -> Self {
        Self {
            github_token: std::env::var("GITHUB_TOKEN").ok(),
            ..Self::default()
        }
    }
}

/// Runs the full pipeline for one subject: concurrent signal collection,
/// then rubric scoring. Never fails once constructed; the worst case is a
/// report of unknown-state signals.
pub struct Analyzer {
    gateways: Gateways,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Build an analyzer with production gateways.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let gateways = Gateways {
            fetch: Arc::new(HttpFetcher::new(config.request_timeout, &config.user_agent)?),
            repos: Arc::new(GitHubGateway::new(
                &config.github_api_base,
                config.request_timeout,
                &config.user_agent,
                config.github_token.clone(),
            )?),
            registration: Arc::new(RdapGateway::new(
                &config.rdap_base,
                config.request_timeout,
                &config.user_agent,
            )?),
        };
        Ok(Self { gateways, config })
    }

    /// Build an analyzer over caller-supplied gateways.
    pub fn with_gateways(config: AnalyzerConfig, gateways: Gateways) -> Self {
        Self { gateways, config }
    }

    /// Analyze a subject against the current wall clock.
    pub async fn analyze(&self, subject: &Subject) -> Report {
        self.analyze_at(subject, Utc::now()).await
    }

    /// Analyze a subject against a caller-supplied clock. Deterministic
    /// given fixed gateway responses and `now`.
    pub async fn analyze_at(&self, subject: &Subject, now: DateTime<Utc>) -> Report {
        info!(origin = %subject.origin, "starting analysis");

        let bag = collectors::collect_signals(
            subject,
            &self.gateways,
            self.config.collector_envelope,
            now,
        )
        .await;
        let report = scoring::score(&bag, subject, now);

        info!(
            origin = %subject.origin,
            score = report.overall_score,
            status = %report.status,
            "analysis complete"
        );
        report
    }
}
