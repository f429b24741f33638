//! Binary entrypoint for the A2UI API server.
use a2ui_api::{init_tracing, run, ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    run(ApiConfig::from_env()).await
}
