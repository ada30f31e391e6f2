use crate::helpers::TRACING;
use roomsync_load::configuration::{Settings, get_configuration};
use roomsync_load::probe_client::ProbeClient;
use roomsync_load::startup::Application;
use std::sync::LazyLock;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub settings: Settings,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Probe client aimed at `path` on this app, using the configured timeouts.
    pub fn probe_client(&self, path: &str) -> ProbeClient {
        let mut target = self.settings.target.clone();
        target.base_url = format!("{}{}", self.address, path);
        target.client().expect("Failed to build probe client.")
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    let settings = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.stub.host = "127.0.0.1".into();
        // Use a random OS port
        c.stub.port = 0;
        c
    };

    let application = Application::build(&settings.stub)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());

    #[allow(clippy::let_underscore_future)]
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        settings,
        api_client: reqwest::Client::new(),
    }
}
