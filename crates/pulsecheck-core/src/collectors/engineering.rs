//! Engineering activity collector: repository discovery on the homepage,
//! then push recency, commit frequency, and open-issue count.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::classify;
use crate::gateways::{FetchOutcome, Gateways};
use crate::page::PageSnapshot;
use crate::signals::{CommitWindows, EngineeringSignals, RepoActivity};
use crate::url_utils::Subject;

const COMMIT_PAGE_SIZE: u32 = 100;

pub async fn collect(
    subject: &Subject,
    gateways: &Gateways,
    now: DateTime<Utc>,
) -> EngineeringSignals {
    let body = match gateways.fetch.fetch(&subject.origin).await {
        FetchOutcome::Success { body, .. } => body,
        FetchOutcome::Failure { error, .. } => {
            warn!(origin = %subject.origin, %error, "homepage unreachable, no repository discovered");
            return EngineeringSignals::RepoAbsent;
        }
    };

    let snapshot = PageSnapshot::parse(&body);
    let repo = match classify::find_repo_link(&snapshot.anchors) {
        Some(repo) => repo,
        None => return EngineeringSignals::RepoAbsent,
    };
    debug!(%repo, "repository discovered");

    let mut activity = RepoActivity::new(repo.clone());

    // Each API call degrades independently; a failure drops only its own
    // sub-metrics from the rubric.
    match gateways.repos.repo_metadata(&repo).await {
        Ok(metadata) => {
            activity.last_push_days = Some((now - metadata.pushed_at).num_days().max(0));
            activity.open_issues = Some(metadata.open_issues);
            debug!(%repo, updated_at = %metadata.updated_at, "repository metadata retrieved");
        }
        Err(err) => {
            warn!(%repo, %err, "repository metadata unavailable");
        }
    }

    match gateways.repos.recent_commits(&repo, COMMIT_PAGE_SIZE).await {
        Ok(commits) => {
            let within = |days: i64| {
                commits
                    .iter()
                    .filter(|commit| now - commit.authored_at < Duration::days(days))
                    .count()
            };
            activity.commit_windows = Some(CommitWindows {
                last_30_days: within(30),
                last_90_days: within(90),
            });
        }
        Err(err) => {
            warn!(%repo, %err, "commit history unavailable");
        }
    }

    EngineeringSignals::RepoPresent(activity)
}
