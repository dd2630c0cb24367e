use anyhow::Context;
use petclinic_server::{store, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    petclinic_server::telemetry::init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    let store = match store::open(&config.store).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, "could not open the record store, exiting");
            return Err(err).context("could not open the record store");
        }
    };

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}:{}", config.bind, config.port))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let state = AppState::new(store.clone()).with_strict_not_found(config.strict_not_found);
    let served = petclinic_server::run(listener, state).await;

    store.close().await.context("failed to close the record store")?;
    tracing::info!("record store closed");
    served.context("server error")
}
