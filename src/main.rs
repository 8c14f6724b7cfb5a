use std::path::{Path, PathBuf};

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use base64::{prelude::BASE64_STANDARD, Engine};
use clap::{Parser, Subcommand};
use classifier_backend::{config::AppConfig, handlers, ScoreRequest, Scorer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(version, about = "Image classifier scoring endpoint")]
struct Cli {
    /// Configuration file; defaults and CLASSIFIER__* variables apply on top.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Score a local image file and print the JSON response.
    Score {
        #[arg(short, long)]
        image: PathBuf,
    },
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level '{default_level}'"))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.server.log_level)?;

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Score { image } => score_file(&config, &image),
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let scorer = web::Data::new(Scorer::from_config(&config.model)?);
    info!(labels = %scorer.labels_path().display(), "model loaded");

    let max_body_bytes = config.server.max_body_bytes;
    info!("Server running at http://{}", config.server.bind_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(scorer.clone())
            .configure(handlers::configure_with_limit(max_body_bytes))
    })
    .bind(config.server.bind_address.as_str())
    .with_context(|| format!("cannot bind {}", config.server.bind_address))?
    .run()
    .await?;

    Ok(())
}

fn score_file(config: &AppConfig, image: &Path) -> Result<()> {
    let scorer = Scorer::from_config(&config.model)?;

    let bytes = std::fs::read(image).with_context(|| format!("cannot read {}", image.display()))?;
    let body = serde_json::to_vec(&ScoreRequest {
        image: BASE64_STANDARD.encode(bytes),
    })?;

    let response = scorer.run(&body);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
