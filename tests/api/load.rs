use crate::helpers::unused_local_port;
use crate::test_app::spawn_app;
use claims::{assert_err, assert_ok};
use roomsync_load::configuration::{LoadSettings, get_configuration};
use roomsync_load::scenarios::{ScenarioError, run_all, simultaneous_users};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn five_hundred_simultaneous_users_mostly_succeed() {
    let test_app = spawn_app().await;
    let settings = test_app.settings.load.clone();
    assert_eq!(settings.total_requests, 500);
    assert_eq!(settings.workers, 100);

    let report =
        assert_ok!(simultaneous_users(&test_app.probe_client("/base"), &settings).await);

    assert_eq!(report.attempted, 500);
    assert!(
        report.succeeded >= 450,
        "Expected at least 450 successful responses, got {}",
        report.succeeded
    );
}

#[tokio::test]
async fn load_against_a_missing_path_fails_the_threshold() {
    let test_app = spawn_app().await;
    let settings = LoadSettings {
        total_requests: 50,
        workers: 10,
        success_ratio: 0.9,
    };

    let error =
        assert_err!(simultaneous_users(&test_app.probe_client("/missing"), &settings).await);

    match error {
        ScenarioError::BelowThreshold {
            required,
            succeeded,
            report,
        } => {
            assert_eq!(required, 45);
            assert_eq!(succeeded, 0);
            assert_eq!(report.status_counts.get("404"), Some(&50));
        }
        other => panic!("Unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn full_run_passes_against_the_stub_target() {
    let test_app = spawn_app().await;
    let settings = LoadSettings {
        total_requests: 100,
        workers: 20,
        success_ratio: 0.9,
    };

    let summary = run_all(&test_app.probe_client("/base"), &settings).await;

    assert!(summary.passed());
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["results"][0]["scenario"], "basic_uptime");
    assert_eq!(json["results"][1]["report"]["attempted"], 100);
}

#[tokio::test]
async fn full_run_fails_when_the_target_is_down() {
    let mut target = get_configuration()
        .expect("Failed to read configuration.")
        .target;
    target.base_url = format!("http://127.0.0.1:{}/base", unused_local_port());
    let client = target.client().expect("Failed to build probe client.");
    let settings = LoadSettings {
        total_requests: 20,
        workers: 5,
        success_ratio: 0.9,
    };

    let summary = run_all(&client, &settings).await;

    assert!(!summary.passed());
    assert!(summary.results.iter().all(|r| !r.passed));
    let load = summary.results[1].report.as_ref().unwrap();
    assert_eq!(load.attempted, 20);
    assert_eq!(load.succeeded, 0);
}
