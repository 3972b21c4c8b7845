use todo_viewer::{run_app, UreqTransport};
use todo_viewer_core::{ApiClient, App, ClientConfig, FailurePolicy};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let client = ApiClient::new(ClientConfig::default(), UreqTransport::new());
    info!(base_url = client.base_url(), "starting viewer");
    let mut app = App::new(client, FailurePolicy::default());

    let teardown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };
    let outcome = run_app(&mut app, teardown, |html| println!("{html}"))?;
    info!(?outcome, "viewer finished");
    Ok(())
}
