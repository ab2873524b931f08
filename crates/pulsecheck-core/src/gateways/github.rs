//! GitHub REST API gateway for repository metadata and commit history.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::{Commit, GatewayError, RepoMetadata, RepositoryGateway};

pub struct GitHubGateway {
    client: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl GitHubGateway {
    pub fn new(
        base: &str,
        timeout: Duration,
        user_agent: &str,
        token: Option<String>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .context("failed to build GitHub client")?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, "GET");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

#[derive(Deserialize)]
struct RepoResponse {
    pushed_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    open_issues_count: u64,
}

#[derive(Deserialize)]
struct CommitResponse {
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    date: DateTime<Utc>,
}

#[async_trait]
impl RepositoryGateway for GitHubGateway {
    async fn repo_metadata(&self, repo: &str) -> Result<RepoMetadata, GatewayError> {
        let response: RepoResponse = self.get_json(&format!("/repos/{repo}")).await?;
        Ok(RepoMetadata {
            pushed_at: response.pushed_at,
            updated_at: response.updated_at,
            open_issues: response.open_issues_count,
        })
    }

    async fn recent_commits(
        &self,
        repo: &str,
        page_size: u32,
    ) -> Result<Vec<Commit>, GatewayError> {
        let response: Vec<CommitResponse> = self
            .get_json(&format!("/repos/{repo}/commits?per_page={page_size}"))
            .await?;
        Ok(response
            .into_iter()
            .filter_map(|entry| entry.commit.author)
            .map(|author| Commit {
                authored_at: author.date,
            })
            .collect())
    }
}
