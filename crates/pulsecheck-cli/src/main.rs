//! pulsecheck CLI: analyze one subject and render the report.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pulsecheck_core::{
    normalize_subject, Analyzer, AnalyzerConfig, CategoryScore, Report, SignalStatus,
};

const RULE: &str = "─────────────────────────────────────────────────────────────";

#[derive(Parser)]
#[command(
    name = "pulsecheck",
    version,
    about = "Estimate whether a web-hosted product is still actively maintained"
)]
struct Cli {
    /// URL or bare domain of the product to analyze
    url: String,

    /// Emit the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Timeout per external call, in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// GitHub API token for higher rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;

    let subject = normalize_subject(&cli.url).context("could not interpret the given URL")?;

    // clap already resolved GITHUB_TOKEN from the environment.
    let config = AnalyzerConfig {
        request_timeout: Duration::from_secs(cli.timeout),
        github_token: cli.github_token.clone(),
        ..AnalyzerConfig::default()
    };
    let analyzer = Analyzer::new(config)?;
    let report = analyzer.analyze(&subject).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }

    Ok(())
}

fn status_glyph(status: SignalStatus) -> &'static str {
    match status {
        SignalStatus::Healthy => "✓",
        SignalStatus::Warning => "~",
        SignalStatus::Risk => "✗",
        SignalStatus::Unknown => "?",
    }
}

fn render_category(out: &mut String, title: &str, category: &CategoryScore) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{title}  —  {}/100\n", category.score));
    out.push_str(RULE);
    out.push('\n');

    if category.signals.is_empty() {
        out.push_str("  (no signals collected)\n");
    }
    for signal in &category.signals {
        out.push_str(&format!(
            "  {} {:<22} {:<24} {}\n",
            status_glyph(signal.status),
            signal.name,
            signal.value,
            signal.explanation
        ));
    }
    out.push('\n');
}

fn render_report(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("# Maintenance health: {}\n", report.subject.origin));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Overall: {}/100 ({})\n",
        report.overall_score, report.status
    ));
    out.push_str(&format!("{}\n\n", report.narrative));

    render_category(&mut out, "Site Vitality", &report.site);
    render_category(&mut out, "Engineering Activity", &report.engineering);
    render_category(&mut out, "Business Health", &report.business);

    out.push_str(&format!(
        "Scanned {} · id {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M UTC"),
        report.correlation_id
    ));

    out
}
