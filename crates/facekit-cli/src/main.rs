use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod enroll;
mod recognize;
mod train;

use config::{Config, DetectionArgs, PathArgs, TrainingArgs};

#[derive(Parser)]
#[command(
    name = "facekit",
    about = "Webcam face enrollment, LBPH training, and live recognition"
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture labeled face samples from the camera into the dataset
    Enroll {
        /// Person name (folder-safe); prompted for interactively if omitted
        #[arg(short, long)]
        name: Option<String>,

        #[command(flatten)]
        detection: DetectionArgs,
    },
    /// Train the LBPH model from the full sample dataset
    Train {
        #[command(flatten)]
        training: TrainingArgs,
    },
    /// Run live recognition with the trained model
    Recognize {
        #[command(flatten)]
        detection: DetectionArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.paths);

    match cli.command {
        Commands::Enroll { name, detection } => enroll::run(&config, name, detection.to_params()),
        Commands::Train { training } => train::run(&config, training.to_params()),
        Commands::Recognize { detection } => recognize::run(&config, detection.to_params()),
    }
}
