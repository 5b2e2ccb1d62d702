//! `musicspace-uploader` -- batch take upload for one TakeOne app user.
//!
//! Reads a JSON workflow file, signs in with a one-time authorization code,
//! uploads every configured take into the user's latest project, then
//! requests a production and accepts it once rendered.
//!
//! # Arguments
//!
//! | Argument      | Env fallback                 | Description                                     |
//! |---------------|------------------------------|-------------------------------------------------|
//! | `CONFIG_FILE` | `TAKEONE_WORKFLOW_FILE`      | Path to the workflow JSON                       |
//! | `CODE`        | `TAKEONE_AUTHORIZATION_CODE` | App user authorization code from the invitation |
//!
//! Env fallbacks may come from a `.env` file. `RUST_LOG` controls verbosity
//! (default `musicspace_uploader=info`). Ctrl-C cancels the run at any
//! point, including mid-part.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use musicspace_uploader::config::WorkflowConfig;
use musicspace_uploader::probe::FfprobeProber;
use musicspace_uploader::{UploadError, Uploader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "musicspace-uploader", about = "Upload takes to TakeOne and request a production")]
struct Args {
    /// Workflow JSON file.
    #[arg(env = "TAKEONE_WORKFLOW_FILE")]
    config_file: PathBuf,
    /// One-time app user authorization code.
    #[arg(env = "TAKEONE_AUTHORIZATION_CODE", hide_env_values = true)]
    code: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musicspace_uploader=info,musicspace_takeone=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = WorkflowConfig::load(&args.config_file)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Cannot load workflow");
            std::process::exit(1);
        });

    tracing::info!(
        config_file = %args.config_file.display(),
        segments = config.project.video_segments.len(),
        "Starting musicspace-uploader",
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl-C, cancelling upload");
            on_signal.cancel();
        }
    });

    let connected = tokio::select! {
        result = Uploader::connect(config, &args.code, Arc::new(FfprobeProber)) => result,
        () = cancel.cancelled() => Err(UploadError::Cancelled),
    };
    let uploader = match connected {
        Ok(uploader) => uploader,
        Err(e) => {
            tracing::error!(error = %e, "Authorization failed");
            std::process::exit(1);
        }
    };

    match uploader.run(&cancel).await {
        Ok(summary) => {
            tracing::info!(
                project_id = %summary.project_id,
                production_request_id = %summary.production_request.id,
                segments = summary.segment_ids.len(),
                "Upload workflow complete",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload workflow failed");
            std::process::exit(1);
        }
    }
}
