use crate::helpers::unused_local_port;
use crate::test_app::spawn_app;
use claims::{assert_err, assert_ok};
use roomsync_load::configuration::get_configuration;
use roomsync_load::scenarios::{ScenarioError, basic_uptime};

#[tokio::test]
async fn basic_uptime_passes_against_a_running_target() {
    let test_app = spawn_app().await;

    assert_ok!(basic_uptime(&test_app.probe_client("/base")).await);
}

#[tokio::test]
async fn basic_uptime_fails_when_the_path_is_missing() {
    let test_app = spawn_app().await;

    let error = assert_err!(basic_uptime(&test_app.probe_client("/missing")).await);

    assert!(matches!(error, ScenarioError::UnexpectedStatus { .. }));
}

#[tokio::test]
async fn basic_uptime_fails_when_nothing_is_listening() {
    let mut target = get_configuration()
        .expect("Failed to read configuration.")
        .target;
    target.base_url = format!("http://127.0.0.1:{}/base", unused_local_port());
    let client = target.client().expect("Failed to build probe client.");

    let error = assert_err!(basic_uptime(&client).await);

    assert!(matches!(error, ScenarioError::Unreachable { .. }));
}
