// almost everything lives here in the library crate (rather than in
// src/main.rs) so that the API tests in tests/api can spawn the full
// application in-process; only the entrypoint stays in the binary

pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
