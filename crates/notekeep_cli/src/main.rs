//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notekeep_core` linkage.
//! - Run one note analysis from the shell with environment-derived config.
//!
//! Usage:
//! - `notekeep_cli` prints ping and version.
//! - `notekeep_cli analyze <title> <body>` prints the outcome as JSON.
//!
//! Set `NOTEKEEP_LOG_DIR` (absolute path) to write rolling logs.

use log::warn;
use notekeep_core::{
    default_log_level, init_logging, AnalysisConfig, AnalysisRejected, AnalysisService,
    SystemClock,
};
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const LOG_DIR_ENV: &str = "NOTEKEEP_LOG_DIR";

#[tokio::main]
async fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            println!("notekeep_core ping={}", notekeep_core::ping());
            println!("notekeep_core version={}", notekeep_core::core_version());
            ExitCode::SUCCESS
        }
        Some("analyze") if args.len() == 3 => analyze(&args[1], &args[2]).await,
        Some(_) => {
            eprintln!("usage: notekeep_cli [analyze <title> <body>]");
            ExitCode::from(2)
        }
    }
}

async fn analyze(title: &str, body: &str) -> ExitCode {
    let config = AnalysisConfig::from_env();
    let service = AnalysisService::from_config(config, Arc::new(SystemClock));
    let cancel = CancellationToken::new();

    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let outcome = match service.analyze(title, body, &cancel).await {
        Ok(outcome) => outcome,
        Err(AnalysisRejected::EmptyBody) => {
            eprintln!("error: note body is empty");
            return ExitCode::from(2);
        }
        Err(AnalysisRejected::Cancelled) => {
            eprintln!("cancelled");
            return ExitCode::from(130);
        }
    };

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            warn!("event=cli_output module=cli status=error error={err}");
            eprintln!("error: could not render outcome: {err}");
            return ExitCode::FAILURE;
        }
    }
    println!("mode={}", outcome.mode());
    ExitCode::SUCCESS
}
