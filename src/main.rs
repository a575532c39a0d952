use cc_goodies::configuration::get_configuration;
use cc_goodies::startup::Application;
use cc_goodies::telemetry::get_subscriber;
use cc_goodies::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the server.
///
/// The store pool is lazy, so startup succeeds without a reachable
/// database; the first store-touching request would then 500. `RUST_LOG`
/// overrides the default `info` filter; pipe the output through `bunyan`
/// for human-readable logs.
#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("cc-goodies", "info", std::io::stdout);
    init_subscriber(subscriber);

    let cfg = get_configuration().expect("failed to read configuration");

    let app = Application::build(cfg).await?;
    tracing::info!("listening on port {}", app.get_port());
    app.run_until_stopped().await?;

    Ok(())
}
