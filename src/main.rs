mod analyzer;
mod config;
mod fetcher;
mod model;
mod normalizer;
mod notifier;
mod reporter;
mod utils;

use analyzer::analyzer_for;
use chrono::{Local, NaiveDate};
use config::{AppConfig, Credentials, ReportMode, load_config_or_default};
use fetcher::{PriceSource, YahooSource};
use model::NotifyError;
use notifier::{LineNotifier, Notifier};
use reporter::build_report;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How a single run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Sent,
    NothingToSend,
    NotConfigured,
    SendFailed,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    if let Err(e) = dotenvy::dotenv() {
        info!("No .env loaded: {}", e);
    }

    let config_path = std::env::var("SENTINEL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = match load_config_or_default(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let credentials = match Credentials::from_env() {
        Ok(c) => Some(c),
        Err(e) => {
            warn!("Credential error: {}", e);
            None
        }
    };

    let source = match YahooSource::new() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create market-data client: {}", e);
            return;
        }
    };

    let notifier = match LineNotifier::new(credentials, config.push_endpoint.clone()) {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to create notifier: {}", e);
            return;
        }
    };

    if !notifier.is_configured() {
        warn!("LINE credentials missing; the report will only be logged");
    }

    let outcome = run_once(&config, &source, &notifier, Local::now().date_naive()).await;
    info!("Run finished: {:?}", outcome);
}

/// One full pass: analyze the watchlist, then push the report at most once.
async fn run_once(
    config: &AppConfig,
    source: &dyn PriceSource,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> RunOutcome {
    info!(
        "Checking {} symbols ({:?} mode, {} lookback)",
        config.watchlist.len(),
        config.mode,
        config.lookback
    );

    let analyzer = analyzer_for(config);
    let report = build_report(
        &config.watchlist,
        config.lookback,
        source,
        analyzer.as_ref(),
        today,
    )
    .await;

    if report.is_empty() && config.mode == ReportMode::Alert {
        info!("No alerts today");
        return RunOutcome::NothingToSend;
    }

    let text = report.render();
    info!("Report:\n{}", text);

    match notifier.send(&text).await {
        Ok(()) => {
            info!("Report delivered.");
            RunOutcome::Sent
        }
        Err(NotifyError::NotConfigured(reason)) => {
            warn!("Report not sent: {}", reason);
            RunOutcome::NotConfigured
        }
        Err(e) => {
            warn!("Report delivery failed: {}", e);
            RunOutcome::SendFailed
        }
    }
}
