use axum::Router;
use axum::routing::get;
use std::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::configuration::StubSettings;
use crate::routes::{base, health_check};

/// Local stand-in for the service under test, answering `/base` with 200.
pub struct Application {
    port: u16,
    listener: TcpListener,
}

impl Application {
    pub async fn build(configuration: &StubSettings) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(address)?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();

        Ok(Self { port, listener })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let app = router();
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/base", get(base))
        .route("/health_check", get(health_check))
        .layer(TraceLayer::new_for_http())
}
