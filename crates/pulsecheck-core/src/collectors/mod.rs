//! The three category collectors and the failure-isolating aggregator.
//!
//! Each collector runs as its own task under an envelope timeout; the
//! join waits for all three and collapses any error, panic, or timeout to
//! that category's empty default, never aborting the others.

pub mod business;
pub mod engineering;
pub mod site;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinError;
use tokio::time::error::Elapsed;
use tracing::warn;

use crate::gateways::Gateways;
use crate::signals::SignalBag;
use crate::url_utils::Subject;

/// How one collector branch ended.
#[derive(Debug)]
enum Settled<T> {
    Completed(T),
    Failed(String),
    TimedOut,
}

fn settle<T>(joined: Result<Result<T, Elapsed>, JoinError>) -> Settled<T> {
    match joined {
        Ok(Ok(value)) => Settled::Completed(value),
        Ok(Err(_)) => Settled::TimedOut,
        Err(err) => Settled::Failed(err.to_string()),
    }
}

fn collapse<T: Default>(category: &str, settled: Settled<T>) -> T {
    match settled {
        Settled::Completed(value) => value,
        Settled::TimedOut => {
            warn!(category, "collector timed out, substituting empty signal set");
            T::default()
        }
        Settled::Failed(reason) => {
            warn!(category, %reason, "collector failed, substituting empty signal set");
            T::default()
        }
    }
}

fn spawn_enveloped<T, F>(envelope: Duration, fut: F) -> tokio::task::JoinHandle<Result<T, Elapsed>>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(tokio::time::timeout(envelope, fut))
}

/// Run the three collectors concurrently and merge their results.
///
/// Always yields a bag with all three categories present.
pub async fn collect_signals(
    subject: &Subject,
    gateways: &Gateways,
    envelope: Duration,
    now: DateTime<Utc>,
) -> SignalBag {
    let site_task = {
        let subject = subject.clone();
        let gateways = gateways.clone();
        spawn_enveloped(envelope, async move {
            site::collect(&subject, &gateways, now).await
        })
    };
    let engineering_task = {
        let subject = subject.clone();
        let gateways = gateways.clone();
        spawn_enveloped(envelope, async move {
            engineering::collect(&subject, &gateways, now).await
        })
    };
    let business_task = {
        let subject = subject.clone();
        let gateways = gateways.clone();
        spawn_enveloped(envelope, async move {
            business::collect(&subject, &gateways).await
        })
    };

    let (site, engineering, business) =
        tokio::join!(site_task, engineering_task, business_task);

    SignalBag {
        site: collapse("site", settle(site)),
        engineering: collapse("engineering", settle(engineering)),
        business: collapse("business", settle(business)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateways::testing::{
        gateways, FailingFetch, FakeRegistration, FakeRepos, PanickingFetch, StaticFetch,
    };
    use crate::signals::EngineeringSignals;
    use chrono::TimeZone;

    fn subject() -> Subject {
        Subject {
            origin: "https://example.com".to_string(),
            host: "example.com".to_string(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
    }

    const ENVELOPE: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn all_failing_dependencies_still_yield_a_full_bag() {
        let gw = gateways(FailingFetch, FakeRepos::default(), FakeRegistration::default());

        let bag = collect_signals(&subject(), &gw, ENVELOPE, fixed_now()).await;

        assert_eq!(bag.site.domain_age_years, None);
        assert!(!bag.site.reachable.unwrap().success);
        assert!(matches!(bag.engineering, EngineeringSignals::RepoAbsent));
        assert!(bag.business.is_none());
    }

    #[tokio::test]
    async fn a_panicking_collector_is_isolated_from_the_others() {
        let gw = gateways(
            PanickingFetch,
            FakeRepos::default(),
            FakeRegistration {
                created: Some(fixed_now() - chrono::Duration::days(4 * 365)),
            },
        );

        let bag = collect_signals(&subject(), &gw, ENVELOPE, fixed_now()).await;

        // Site's registration lookup ran before the panicking fetch, so the
        // category keeps nothing; the panic must not escape the aggregator.
        assert!(matches!(bag.engineering, EngineeringSignals::RepoAbsent));
        assert!(bag.business.is_none());
    }

    #[tokio::test]
    async fn healthy_collectors_run_independently_of_a_failing_one() {
        let home = r#"
            <html><body>
                <p>support@example.com</p>
                <a href="/terms">Terms</a>
                <a href="https://github.com/acme/widget">Source</a>
            </body></html>
        "#;
        let fetch = StaticFetch::default().with_page("https://example.com", home);
        // Registration always fails; everything else works.
        let gw = gateways(fetch, FakeRepos::default(), FakeRegistration::default());

        let bag = collect_signals(&subject(), &gw, ENVELOPE, fixed_now()).await;

        assert_eq!(bag.site.domain_age_years, None);
        assert!(bag.site.reachable.unwrap().success);
        assert!(matches!(bag.engineering, EngineeringSignals::RepoPresent(_)));
        let business = bag.business.unwrap();
        assert_eq!(business.support_email.as_deref(), Some("support@example.com"));
        assert!(business.legal_found);
    }
}
