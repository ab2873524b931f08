//! Raw signal data produced by the collectors.
//!
//! Each category has a typed bag with a conservative `Default` standing in
//! for a failed collector. The scoring engine is the only consumer.

/// Everything the three collectors observed for one subject.
#[derive(Debug, Clone, Default)]
pub struct SignalBag {
    pub site: SiteSignals,
    pub engineering: EngineeringSignals,
    pub business: Option<BusinessSnapshot>,
}

/// Site vitality observations. `None` means the datum could not be
/// determined; it is scored as unknown, never skipped.
#[derive(Debug, Clone, Default)]
pub struct SiteSignals {
    /// Whole years since domain registration.
    pub domain_age_years: Option<i64>,
    /// Homepage fetch outcome; `None` when the check never ran.
    pub reachable: Option<Reachability>,
    /// Whether `/sitemap.xml` answered successfully.
    pub sitemap_found: bool,
    /// Whether a blog/news/changelog link was present on the homepage.
    pub blog_found: bool,
    /// Days since the most recent detectable content update.
    pub last_update_days: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reachability {
    pub success: bool,
    pub status: Option<u16>,
}

/// Engineering activity observations.
///
/// The variant carries the category's scoring shape: without a repository
/// the rubric stops at the single discovery line item; with one, each
/// sub-metric contributes to the maximum only when its data was obtained.
#[derive(Debug, Clone, Default)]
pub enum EngineeringSignals {
    #[default]
    RepoAbsent,
    RepoPresent(RepoActivity),
}

#[derive(Debug, Clone)]
pub struct RepoActivity {
    /// `owner/name` path on the code host.
    pub repo: String,
    /// Days since the last push, if repo metadata was retrievable.
    pub last_push_days: Option<i64>,
    /// Commit counts over trailing windows, if commit history was retrievable.
    pub commit_windows: Option<CommitWindows>,
    /// Open issue count, if repo metadata was retrievable.
    pub open_issues: Option<u64>,
}

impl RepoActivity {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            last_push_days: None,
            commit_windows: None,
            open_issues: None,
        }
    }
}

/// Commits counted within trailing wall-clock windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitWindows {
    pub last_30_days: usize,
    pub last_90_days: usize,
}

/// Business health observations derived from one homepage snapshot.
///
/// The collector yields `None` (an empty bag) when the homepage itself
/// was unreachable; there are no partial defaults.
#[derive(Debug, Clone, Default)]
pub struct BusinessSnapshot {
    pub support_email: Option<String>,
    pub careers_found: bool,
    pub social_platforms: Vec<SocialPlatform>,
    pub legal_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialPlatform {
    LinkedIn,
    Twitter,
    Facebook,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::LinkedIn => "linkedin",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Facebook => "facebook",
        }
    }
}
