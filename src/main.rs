// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Sync batch job
//!
//! Runs one sync of recent Strava activities into the JSON store and
//! exits. Intended to be scheduled (cron, CI) with no overlapping runs.

use std::process::ExitCode;
use strava_sync::{config::Config, services::SyncPipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Structured JSON logs on stderr; stdout carries only the summary
    init_logging();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error (configuration): {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = SyncPipeline::from_config(&config);
    match pipeline.run().await {
        Ok(report) => {
            println!("✅ {}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error ({}): {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("strava_sync=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
