use axum::http::StatusCode;

/// Returns 200 OK if the stub target is running
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
