mod error;
mod security_headers;
mod sentry;

pub use self::error::ErrorMiddleware;
pub use self::security_headers::SecurityHeadersMiddleware;
pub use self::sentry::SentryMiddleware;
