use clap::Parser;

use edge_server::config::{loader, Cli};
use edge_server::http::HttpServer;
use edge_server::lifecycle::{signals, startup, Shutdown};
use edge_server::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = loader::from_cli(Cli::parse());

    logging::init(config.as_ref().map_or("info", |c| c.log_level.as_str()));

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start");
            std::process::exit(2);
        }
    };

    let server = HttpServer::new(config)?;
    let listener = startup::bind(server.config()).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::terminated().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
