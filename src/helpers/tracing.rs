use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Environment variable and its fallback directive for one output.
struct LogFilter {
    variable: &'static str,
    default: &'static str,
}

impl LogFilter {
    const CONSOLE: Self = Self {
        variable: "HOUSE_PRICE_SERVICE_LOG",
        default: "house_price_service=info,poem=info",
    };

    const SENTRY: Self = Self {
        variable: "HOUSE_PRICE_SERVICE_SENTRY_LOG",
        default: "house_price_service=debug",
    };

    fn build(&self) -> Result<EnvFilter> {
        EnvFilter::try_from_env(self.variable)
            .or_else(|_| EnvFilter::try_new(self.default))
            .with_context(|| format!("invalid `{}`", self.variable))
    }
}

/// Initialises the console output and Sentry reporting.
///
/// Without a DSN the Sentry client is disabled and only the console output remains.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));

    tracing_subscriber::registry()
        .with(sentry_layer()?)
        .with(console_layer()?)
        .try_init()?;

    Ok(guard)
}

fn sentry_layer<S>() -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = sentry::integrations::tracing::layer()
        .event_filter(sentry_event_filter)
        .span_filter(|metadata| *metadata.level() <= Level::INFO);
    Ok(layer.with_filter(LogFilter::SENTRY.build()?))
}

fn console_layer<S>() -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer().with_target(true);
    Ok(layer.with_filter(LogFilter::CONSOLE.build()?))
}

/// Warnings and errors get reported, everything else is kept as breadcrumbs.
fn sentry_event_filter(metadata: &Metadata) -> EventFilter {
    if *metadata.level() <= Level::WARN {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}

pub fn format_elapsed(instant: Instant) -> String {
    humantime::format_duration(instant.elapsed()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse_ok() -> Result {
        LogFilter::CONSOLE.build()?;
        LogFilter::SENTRY.build()?;
        Ok(())
    }
}
