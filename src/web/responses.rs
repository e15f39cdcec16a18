use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use serde::Serialize;

#[derive(Serialize)]
struct Detail {
    detail: String,
}

/// Error response with a `{"detail": …}` body.
pub fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    Json(Detail {
        detail: message.into(),
    })
    .with_status(status)
    .into_response()
}
