// Starts the stub target so the harness has something to point at locally.
// Run with: cargo run --bin spawn_stub_target

use roomsync_load::configuration::get_configuration;
use roomsync_load::startup::Application;
use roomsync_load::telemetry::{get_subscriber, init_subscriber};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("stub_target".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let configuration = get_configuration()?;
    let application = Application::build(&configuration.stub).await?;
    let port = application.port();

    // Output the port and address as JSON to stdout
    let output = serde_json::json!({
        "port": port,
        "address": format!("http://{}:{}", configuration.stub.host, port),
    });
    println!("{}", serde_json::to_string(&output)?);
    io::stdout().flush()?;

    tokio::select! {
        outcome = application.run_until_stopped() => outcome?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C, shutting down the stub target.");
        }
    }
    Ok(())
}
