//! # pulsecheck-core
//!
//! Estimates whether a web-hosted product is still actively maintained.
//! Three collectors gather independent signals about the site, its
//! engineering activity, and its business operations; a deterministic
//! rubric folds them into one explainable health score.
//!
//! The pipeline is failure-tolerant end to end: gateway errors become
//! unknown signal states, and a collector that dies entirely only costs
//! its own category.
//!
//! ## Example
//!
//! ```no_run
//! use pulsecheck_core::{Analyzer, AnalyzerConfig, normalize_subject};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let subject = normalize_subject("https://example.com")?;
//! let analyzer = Analyzer::new(AnalyzerConfig::from_env())?;
//! let report = analyzer.analyze(&subject).await;
//! println!("{} scored {}", report.subject.origin, report.overall_score);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod classify;
pub mod collectors;
pub mod gateways;
pub mod page;
pub mod report;
pub mod scoring;
pub mod signals;
pub mod url_utils;

// Re-export the types callers touch.
pub use analyzer::{Analyzer, AnalyzerConfig};
pub use report::{CategoryScore, HealthStatus, Impact, Report, SignalObservation, SignalStatus};
pub use signals::SignalBag;
pub use url_utils::{normalize_subject, Subject, SubjectError};
