use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flockbook::{api, client::FlockClient, config::AppConfig, db};

#[derive(Parser)]
#[command(name = "flock")]
#[command(about = "Sheep records, feed planning and sale calculations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Flockbook server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind to
        #[arg(short, long)]
        bind: Option<String>,

        /// Directory holding the database file
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Sheep fixture: file path, URL or "bundled"
        #[arg(long)]
        sheep_fixture: Option<String>,

        /// Feed stock fixture: file path, URL or "bundled"
        #[arg(long)]
        feed_fixture: Option<String>,
    },
    /// Check whether a server is responding
    Status {
        /// Server API base URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Print herd and feed stock counts from a running server
    Summary {
        /// Server API base URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Print the 14-day depletion chart for a feed plan entry
    FeedChart {
        /// Position of the entry in the feed plan
        index: usize,

        /// Server API base URL
        #[arg(long)]
        url: Option<String>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "flockbook=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn client_for(url: Option<String>) -> FlockClient {
    url.map(FlockClient::new).unwrap_or_else(FlockClient::from_env)
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let db = match &config.data_dir {
        Some(dir) => db::Database::open_in_dir(dir)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let state = api::AppState::initialize(db, &config.fixtures()).await;
    let app = api::create_router_with_cors(state, config.cors_layer());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Flockbook server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve {
            port,
            bind,
            data_dir,
            sheep_fixture,
            feed_fixture,
        }) => {
            let mut config = AppConfig::load();
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if data_dir.is_some() {
                config.data_dir = data_dir;
            }
            if sheep_fixture.is_some() {
                config.sheep_fixture = sheep_fixture;
            }
            if feed_fixture.is_some() {
                config.feed_fixture = feed_fixture;
            }
            serve(config).await?;
        }
        Some(Commands::Status { url }) => {
            let client = client_for(url);
            match client.health().await {
                Ok(health) => println!("Flockbook server is up ({})", health.status),
                Err(e) => {
                    println!("Flockbook server is not reachable: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Summary { url }) => {
            let summary = client_for(url).dashboard().await?;
            println!("Total sheep: {}", summary.total);
            println!("  Healthy:   {}", summary.counts.healthy);
            println!("  Sick:      {}", summary.counts.sick);
            println!("  Sold:      {}", summary.counts.sold);
            println!("  Dead:      {}", summary.counts.dead);
            if !summary.feed_stock.is_empty() {
                println!("Feed stock:");
                for level in &summary.feed_stock {
                    println!("  {:<8} {:.1} kg", level.category, level.stock_kg);
                }
            }
            if let Some(error) = summary.load_error {
                println!("Warning: {}", error);
            }
        }
        Some(Commands::FeedChart { index, url }) => {
            let chart = client_for(url).feed_chart(index).await?;
            print!("{}", chart);
        }
        None => {
            tracing::info!("No command given, starting server");
            serve(AppConfig::load()).await?;
        }
    }

    Ok(())
}
