//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::artifact::DEFAULT_MODEL_PATH;

mod parsers;

#[derive(Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "TRACES_SAMPLE_RATE", value_parser = parsers::sample_rate)]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommands,
}

#[derive(Subcommand)]
pub enum Subcommands {
    Web(WebOpts),
    Train(TrainOpts),
}

/// Serves the prediction API
#[derive(Args, Clone)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Model artifact to serve, the API starts without a model if it can't be loaded
    #[arg(long, default_value = DEFAULT_MODEL_PATH, env = "MODEL_PATH")]
    pub model_path: PathBuf,
}

/// Fits the regression on the housing dataset and overwrites the model artifact
#[derive(Args, Clone)]
pub struct TrainOpts {
    /// Housing CSV with the `Area`, `Bedrooms`, `Age` and `Price` columns
    #[arg(long, default_value = "data/house_data.csv", env = "DATA_PATH")]
    pub data_path: PathBuf,

    /// Where to save the model artifact
    #[arg(long, default_value = DEFAULT_MODEL_PATH, env = "MODEL_PATH")]
    pub model_path: PathBuf,
}
