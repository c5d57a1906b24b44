use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launchpad::{api, config::ServerConfig, store::Catalog, store::IdStrategy};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Rocket, launch and customer catalog over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API (overrides LAUNCHPAD_PORT / PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides LAUNCHPAD_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Id generation: `uuid` or `sequential` (overrides LAUNCHPAD_ID_STRATEGY)
        #[arg(long)]
        ids: Option<IdStrategy>,
    },
}

fn init_tracing(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter().into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ServerConfig::from_env()?;

    // No subcommand: serve with environment settings only
    if let Some(Commands::Serve { port, host, ids }) = cli.command {
        if let Some(port) = port {
            config.port = port;
        }
        if let Some(host) = host {
            config.host = host;
        }
        if let Some(ids) = ids {
            config.id_strategy = ids;
        }
    }

    init_tracing(&config);
    serve(config).await
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(
        ids = %config.id_strategy,
        "Starting Launchpad server on {}",
        config.bind_addr()
    );

    let catalog = Catalog::new(config.id_strategy);
    let app = api::create_router_with_cors(catalog, config.cors_layer());

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Launchpad server listening on http://{}", config.bind_addr());
    tracing::info!("Check health on http://{}/health", config.bind_addr());

    axum::serve(listener, app).await?;
    Ok(())
}
