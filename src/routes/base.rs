use axum::http::StatusCode;

/// The endpoint the harness points at by default.
#[tracing::instrument(name = "Serving base")]
pub async fn base() -> StatusCode {
    StatusCode::OK
}
