use clap::Parser;

use crate::opts::{Opts, Subcommands};
use crate::prelude::*;

mod artifact;
mod helpers;
mod math;
mod model;
mod opts;
mod prelude;
mod service;
mod trainer;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = helpers::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    match opts.subcommand {
        Subcommands::Web(opts) => web::run(opts).await,
        Subcommands::Train(opts) => trainer::run(opts),
    }
}
