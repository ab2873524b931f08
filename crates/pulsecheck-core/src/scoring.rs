//! The rubric engine: a pure, deterministic mapping from a signal bag to
//! the final report.
//!
//! Point tables are fixed. Category scores are `earned / max` as a
//! rounded percentage; the overall score weights site 30%, engineering
//! 40%, business 30%. Percentages round half-up (`f64::round`).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::report::{
    CategoryScore, HealthStatus, Impact, Report, SignalObservation, SignalStatus,
};
use crate::signals::{BusinessSnapshot, EngineeringSignals, SignalBag, SiteSignals};
use crate::url_utils::Subject;

const SITE_WEIGHT: f64 = 0.30;
const ENGINEERING_WEIGHT: f64 = 0.40;
const BUSINESS_WEIGHT: f64 = 0.30;

/// Evaluate the rubric over a signal bag.
///
/// Deterministic given the bag and `now`; only the correlation id is
/// freshly generated.
pub fn score(bag: &SignalBag, subject: &Subject, now: DateTime<Utc>) -> Report {
    let site = score_site(&bag.site);
    let engineering = score_engineering(&bag.engineering);
    let business = score_business(bag.business.as_ref());

    let overall = round_half_up(
        SITE_WEIGHT * f64::from(site.score)
            + ENGINEERING_WEIGHT * f64::from(engineering.score)
            + BUSINESS_WEIGHT * f64::from(business.score),
    );
    let status = if overall >= 80 {
        HealthStatus::Healthy
    } else if overall >= 50 {
        HealthStatus::Caution
    } else {
        HealthStatus::Risk
    };
    let narrative = narrative(status, site.score, engineering.score, business.score);

    Report {
        subject: subject.clone(),
        timestamp: now,
        overall_score: overall,
        status,
        site,
        engineering,
        business,
        narrative,
        correlation_id: Uuid::new_v4(),
    }
}

fn round_half_up(value: f64) -> u8 {
    value.round() as u8
}

fn percentage(earned: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    round_half_up(f64::from(earned) / f64::from(max) * 100.0)
}

/// "N days ago" under a month, then months, then years.
fn humanize_days(days: i64) -> String {
    if days < 30 {
        format!("{days} days ago")
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else {
        format!("{} years ago", days / 365)
    }
}

fn score_site(site: &SiteSignals) -> CategoryScore {
    let mut earned = 0u32;
    let mut signals = Vec::with_capacity(5);

    // Domain age, 20 points.
    match site.domain_age_years {
        Some(years) => {
            earned += if years >= 3 {
                20
            } else if years >= 1 {
                15
            } else {
                10
            };
            signals.push(SignalObservation {
                name: "Domain Age",
                status: if years >= 3 {
                    SignalStatus::Healthy
                } else if years >= 1 {
                    SignalStatus::Warning
                } else {
                    SignalStatus::Risk
                },
                value: format!("{years} years"),
                impact: if years >= 3 {
                    Impact::Positive
                } else {
                    Impact::Neutral
                },
                explanation: if years >= 3 {
                    format!("Domain registered {years} years ago, indicating established presence")
                } else {
                    format!("Domain is relatively new ({years} years old)")
                },
            });
        }
        None => signals.push(SignalObservation::unknown(
            "Domain Age",
            "Could not determine domain age",
        )),
    }

    // Reachability, 25 points.
    match site.reachable {
        Some(reach) if reach.success => {
            earned += 25;
            signals.push(SignalObservation {
                name: "Website Reachable",
                status: SignalStatus::Healthy,
                value: match reach.status {
                    Some(code) => format!("{code} OK"),
                    None => "OK".to_string(),
                },
                impact: Impact::Positive,
                explanation: "Website responds successfully".to_string(),
            });
        }
        other => signals.push(SignalObservation {
            name: "Website Reachable",
            status: SignalStatus::Risk,
            value: other
                .and_then(|reach| reach.status)
                .map(|code| code.to_string())
                .unwrap_or_else(|| "Failed".to_string()),
            impact: Impact::Negative,
            explanation: "Website is not accessible or responding with errors".to_string(),
        }),
    }

    // Sitemap, 10 points; absence still earns a floor of 5.
    if site.sitemap_found {
        earned += 10;
        signals.push(SignalObservation {
            name: "Sitemap",
            status: SignalStatus::Healthy,
            value: "Found".to_string(),
            impact: Impact::Positive,
            explanation: "Sitemap.xml detected, indicating active maintenance".to_string(),
        });
    } else {
        earned += 5;
        signals.push(SignalObservation {
            name: "Sitemap",
            status: SignalStatus::Warning,
            value: "Not found".to_string(),
            impact: Impact::Neutral,
            explanation: "No sitemap detected".to_string(),
        });
    }

    // Blog/news section, 15 points.
    if site.blog_found {
        earned += 15;
        signals.push(SignalObservation {
            name: "Blog/News Section",
            status: SignalStatus::Healthy,
            value: "Found".to_string(),
            impact: Impact::Positive,
            explanation: "Blog or news section detected".to_string(),
        });
    } else {
        signals.push(SignalObservation {
            name: "Blog/News Section",
            status: SignalStatus::Warning,
            value: "Not found".to_string(),
            impact: Impact::Neutral,
            explanation: "No blog or news section found".to_string(),
        });
    }

    // Last content update, 30 points.
    match site.last_update_days {
        Some(days) => {
            earned += if days <= 30 {
                30
            } else if days <= 90 {
                20
            } else if days <= 180 {
                10
            } else {
                5
            };
            let when = humanize_days(days);
            signals.push(SignalObservation {
                name: "Last Content Update",
                status: if days <= 90 {
                    SignalStatus::Healthy
                } else if days <= 180 {
                    SignalStatus::Warning
                } else {
                    SignalStatus::Risk
                },
                value: when.clone(),
                impact: if days <= 90 {
                    Impact::Positive
                } else {
                    Impact::Negative
                },
                explanation: if days <= 90 {
                    "Recent content updates detected".to_string()
                } else {
                    format!("No recent updates detected (last update {when})")
                },
            });
        }
        None => signals.push(SignalObservation::unknown(
            "Last Content Update",
            "Could not determine last update date",
        )),
    }

    CategoryScore {
        score: percentage(earned, 100),
        signals,
    }
}

fn score_engineering(engineering: &EngineeringSignals) -> CategoryScore {
    let activity = match engineering {
        EngineeringSignals::RepoAbsent => {
            return CategoryScore {
                score: percentage(0, 20),
                signals: vec![SignalObservation {
                    name: "GitHub Repository",
                    status: SignalStatus::Warning,
                    value: "Not found".to_string(),
                    impact: Impact::Negative,
                    explanation: "No public repository detected on website".to_string(),
                }],
            };
        }
        EngineeringSignals::RepoPresent(activity) => activity,
    };

    // Repository discovery, 20 points; sub-metrics extend the maximum
    // only when their data was actually obtained.
    let mut earned = 20u32;
    let mut max = 20u32;
    let mut signals = vec![SignalObservation {
        name: "GitHub Repository",
        status: SignalStatus::Healthy,
        value: "Found".to_string(),
        impact: Impact::Positive,
        explanation: format!("Public repository detected: {}", activity.repo),
    }];

    // Last commit, 40 points.
    if let Some(days) = activity.last_push_days {
        max += 40;
        earned += if days <= 14 {
            40
        } else if days <= 30 {
            30
        } else if days <= 90 {
            20
        } else if days <= 180 {
            10
        } else {
            5
        };
        signals.push(SignalObservation {
            name: "Last Commit",
            status: if days <= 30 {
                SignalStatus::Healthy
            } else if days <= 90 {
                SignalStatus::Warning
            } else {
                SignalStatus::Risk
            },
            value: humanize_days(days),
            impact: if days <= 30 {
                Impact::Positive
            } else {
                Impact::Negative
            },
            explanation: if days <= 30 {
                "Active recent development".to_string()
            } else if days <= 90 {
                "Development activity has slowed".to_string()
            } else {
                "Development appears stagnant".to_string()
            },
        });
    }

    // Commit frequency, 25 points.
    if let Some(windows) = activity.commit_windows {
        max += 25;
        let (last_30, last_90) = (windows.last_30_days, windows.last_90_days);
        earned += if last_30 >= 10 {
            25
        } else if last_30 >= 5 {
            20
        } else if last_90 >= 10 {
            15
        } else if last_90 >= 5 {
            10
        } else {
            5
        };
        signals.push(SignalObservation {
            name: "Commit Frequency",
            status: if last_30 >= 5 {
                SignalStatus::Healthy
            } else if last_90 >= 5 {
                SignalStatus::Warning
            } else {
                SignalStatus::Risk
            },
            value: format!("{last_30} commits (30 days)"),
            impact: if last_30 >= 5 {
                Impact::Positive
            } else {
                Impact::Negative
            },
            explanation: if last_30 >= 5 {
                "Regular development activity".to_string()
            } else if last_90 >= 5 {
                "Infrequent development activity".to_string()
            } else {
                "Minimal development activity".to_string()
            },
        });
    }

    // Open issues, 15 points. A moderate count is the healthy case; zero
    // can mean an abandoned tracker, hence the non-monotonic table.
    if let Some(count) = activity.open_issues {
        max += 15;
        earned += if (5..=50).contains(&count) {
            15
        } else if count > 50 {
            10
        } else if count == 0 {
            10
        } else {
            12
        };
        signals.push(SignalObservation {
            name: "Open Issues",
            status: if (5..=50).contains(&count) {
                SignalStatus::Healthy
            } else {
                SignalStatus::Warning
            },
            value: format!("{count} open"),
            impact: Impact::Neutral,
            explanation: if count == 0 {
                "No open issues (may indicate low community engagement)".to_string()
            } else if count <= 50 {
                "Normal issue activity".to_string()
            } else {
                "High number of open issues".to_string()
            },
        });
    }

    CategoryScore {
        score: percentage(earned, max),
        signals,
    }
}

fn score_business(business: Option<&BusinessSnapshot>) -> CategoryScore {
    let snapshot = match business {
        Some(snapshot) => snapshot,
        // Total homepage failure: empty bag, nothing earned, no defaults.
        None => {
            return CategoryScore {
                score: 0,
                signals: Vec::new(),
            };
        }
    };

    let mut earned = 0u32;
    let mut signals = Vec::with_capacity(4);

    // Support contact, 30 points.
    match &snapshot.support_email {
        Some(email) => {
            earned += 30;
            signals.push(SignalObservation {
                name: "Support Contact",
                status: SignalStatus::Healthy,
                value: "Found".to_string(),
                impact: Impact::Positive,
                explanation: format!("Support email detected: {email}"),
            });
        }
        None => signals.push(SignalObservation {
            name: "Support Contact",
            status: SignalStatus::Risk,
            value: "Not found".to_string(),
            impact: Impact::Negative,
            explanation: "No support contact information found".to_string(),
        }),
    }

    // Careers page, 25 points; absence still earns 5.
    if snapshot.careers_found {
        earned += 25;
        signals.push(SignalObservation {
            name: "Careers Page",
            status: SignalStatus::Healthy,
            value: "Found".to_string(),
            impact: Impact::Positive,
            explanation: "Hiring activity detected, indicating growth".to_string(),
        });
    } else {
        earned += 5;
        signals.push(SignalObservation {
            name: "Careers Page",
            status: SignalStatus::Warning,
            value: "Not found".to_string(),
            impact: Impact::Neutral,
            explanation: "No hiring activity detected".to_string(),
        });
    }

    // Social presence, 20 points, tiered by platform count.
    let count = snapshot.social_platforms.len();
    let platforms = snapshot
        .social_platforms
        .iter()
        .map(|platform| platform.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    earned += if count >= 2 {
        20
    } else if count == 1 {
        15
    } else {
        5
    };
    signals.push(SignalObservation {
        name: "Social Presence",
        status: if count >= 2 {
            SignalStatus::Healthy
        } else if count == 1 {
            SignalStatus::Warning
        } else {
            SignalStatus::Risk
        },
        value: if count > 0 {
            platforms.clone()
        } else {
            "None".to_string()
        },
        impact: if count >= 1 {
            Impact::Positive
        } else {
            Impact::Negative
        },
        explanation: if count >= 2 {
            format!("Active on multiple platforms: {platforms}")
        } else if count == 1 {
            format!("Limited social presence: {platforms}")
        } else {
            "No social media presence detected".to_string()
        },
    });

    // Legal pages, 25 points; absence still earns 10.
    if snapshot.legal_found {
        earned += 25;
        signals.push(SignalObservation {
            name: "Legal Documentation",
            status: SignalStatus::Healthy,
            value: "Found".to_string(),
            impact: Impact::Positive,
            explanation: "Terms of service and privacy policy detected".to_string(),
        });
    } else {
        earned += 10;
        signals.push(SignalObservation {
            name: "Legal Documentation",
            status: SignalStatus::Warning,
            value: "Not found".to_string(),
            impact: Impact::Neutral,
            explanation: "No terms of service or privacy policy detected".to_string(),
        });
    }

    CategoryScore {
        score: percentage(earned, 100),
        signals,
    }
}

fn narrative(status: HealthStatus, site: u8, engineering: u8, business: u8) -> String {
    let opening = match status {
        HealthStatus::Healthy => "This product shows strong maintenance activity",
        HealthStatus::Caution => "This product shows moderate maintenance activity",
        HealthStatus::Risk => "This product shows limited or no maintenance activity",
    };

    let mut concerns = Vec::new();
    if engineering < 50 {
        concerns.push("engineering signals indicate development has stalled");
    } else if engineering < 70 {
        concerns.push("engineering signals indicate slowed development");
    }
    if business < 50 {
        concerns.push("business signals suggest reduced operations");
    }
    if site < 50 {
        concerns.push("website shows signs of neglect");
    }

    let detail = if concerns.is_empty() {
        "core infrastructure remains operational with regular updates".to_string()
    } else {
        concerns.join(" and ")
    };

    format!("{opening}. {detail}.")
}
