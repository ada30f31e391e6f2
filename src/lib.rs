pub mod configuration;
pub mod domain;
pub mod load_runner;
pub mod probe_client;
pub mod report;
pub mod routes;
pub mod scenarios;
pub mod startup;
pub mod telemetry;
mod utils;
