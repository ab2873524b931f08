//! External data sources, behind object-safe traits.
//!
//! Collectors only ever see these traits, so tests substitute canned
//! fakes and never touch the network. Production implementations live in
//! the submodules.

pub mod github;
pub mod http;
pub mod rdap;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Outcome of a timed HTTP GET. Transport errors and non-2xx statuses are
/// data, not errors; fetching never propagates a failure.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success {
        status: u16,
        body: String,
        headers: HashMap<String, String>,
    },
    Failure {
        status: Option<u16>,
        error: String,
    },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchOutcome::Success { status, .. } => Some(*status),
            FetchOutcome::Failure { status, .. } => *status,
        }
    }
}

/// Timed HTTP GET against arbitrary URLs.
#[async_trait]
pub trait FetchGateway: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Repository metadata returned by the code-hosting API.
#[derive(Debug, Clone)]
pub struct RepoMetadata {
    pub pushed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub open_issues: u64,
}

/// One commit's author date.
#[derive(Debug, Clone, Copy)]
pub struct Commit {
    pub authored_at: DateTime<Utc>,
}

/// Code-hosting REST API: repo metadata and recent commit history.
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    async fn repo_metadata(&self, repo: &str) -> Result<RepoMetadata, GatewayError>;

    /// Most recent commits, newest first, up to `page_size`.
    async fn recent_commits(&self, repo: &str, page_size: u32)
        -> Result<Vec<Commit>, GatewayError>;
}

/// Domain registration data: when was the domain created.
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    async fn creation_date(&self, host: &str) -> Result<DateTime<Utc>, GatewayError>;
}

/// The gateway set shared by all collectors. Cheap to clone into tasks.
#[derive(Clone)]
pub struct Gateways {
    pub fetch: Arc<dyn FetchGateway>,
    pub repos: Arc<dyn RepositoryGateway>,
    pub registration: Arc<dyn RegistrationGateway>,
}
