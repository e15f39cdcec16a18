//! Prediction HTTP API.

use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, post, Endpoint, EndpointExt, Response, Route, Server};

use crate::artifact::ArtifactStore;
use crate::opts::WebOpts;
use crate::prelude::*;
use crate::service::PredictionService;
use crate::web::middleware::{ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware};

mod middleware;
mod responses;
#[cfg(test)]
mod test;
mod views;

const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Loads the model once and serves it until interrupted.
pub async fn run(opts: WebOpts) -> Result {
    sentry::configure_scope(|scope| scope.set_tag("app", "web"));

    let service = PredictionService::initialize(&ArtifactStore::new(&opts.model_path));
    info!(
        host = opts.host.as_str(),
        port = opts.port,
        model_loaded = service.is_loaded(),
        "listening…",
    );
    Server::new(TcpListener::bind((IpAddr::from_str(&opts.host)?, opts.port)))
        .run_with_graceful_shutdown(
            create_app(service),
            async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => info!("shutting down…"),
                    Err(error) => {
                        error!("failed to listen for the shutdown signal: {:#}", error);
                        std::future::pending::<()>().await;
                    }
                }
            },
            Some(SHUTDOWN_TIMEOUT),
        )
        .await?;
    Ok(())
}

pub fn create_app(service: PredictionService) -> impl Endpoint<Output = Response> {
    Route::new()
        .at("/", get(views::index::get_root))
        .at("/health", get(views::index::get_health))
        .at("/predict", post(views::predict::post_predict))
        .data(service)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}
