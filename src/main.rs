use anyhow::Context;
use roomsync_load::configuration::get_configuration;
use roomsync_load::scenarios::run_all;
use roomsync_load::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the JSON summary only.
    let subscriber = get_subscriber("roomsync-load".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let client = configuration
        .target
        .client()
        .context("Failed to build the probe client.")?;

    let summary = run_all(&client, &configuration.load).await;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    anyhow::ensure!(summary.passed(), "One or more scenarios failed.");
    Ok(())
}
