//! Diagnosis Model Trainer - Main Entry Point

use anyhow::Context;
use clap::Parser;
use inference_engine::TrainingOptions;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use trainer::{train, TrainConfig};

/// Train the breast-cancer diagnosis model and write its artifacts.
#[derive(Parser)]
#[command(name = "train-model", version)]
struct Cli {
    /// Input CSV with a `diagnosis` column (M/B)
    #[arg(long, default_value = "data/breast-cancer.csv")]
    data: PathBuf,

    /// Directory to write the model, scaler and metadata into
    #[arg(long, default_value = "model")]
    output_dir: PathBuf,

    /// Fraction of each class held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Shuffle seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum gradient descent iterations
    #[arg(long, default_value_t = 1000)]
    max_iter: usize,

    /// Inverse regularization strength
    #[arg(long, default_value_t = 1.0)]
    c: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let config = TrainConfig {
        data: cli.data,
        output_dir: cli.output_dir,
        test_size: cli.test_size,
        seed: cli.seed,
        options: TrainingOptions {
            c: cli.c,
            max_iter: cli.max_iter,
            ..TrainingOptions::default()
        },
    };

    info!("Training model from {}", config.data.display());
    let summary = train(&config)?;

    info!("Model accuracy: {:.4}", summary.report.accuracy);
    info!("Classification report:\n{}", summary.report);
    info!("Artifacts written to {}", config.output_dir.display());

    Ok(())
}
