use anyhow::Result;
use clap::Parser;

use exam_extractor::{router, AppState, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the extraction server to
    #[arg(short, long)]
    address: Option<String>,

    /// Directory for persisted question batches
    #[arg(short = 'd', long)]
    data_dir: Option<String>,

    /// Directory for uploaded images
    #[arg(short = 'i', long)]
    images_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let mut config = Config::from_env()?;

    // CLI flags override environment variables.
    let args = Args::parse();
    if let Some(address) = args.address {
        config.address = address;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(images_dir) = args.images_dir {
        config.images_dir = images_dir;
    }

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| format!("exam_extractor={}", config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    std::fs::create_dir_all(&config.data_dir)?;
    std::fs::create_dir_all(&config.images_dir)?;

    let state = AppState::new(&config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.address).await?;
    tracing::info!("extraction server listening on {}", config.address);
    axum::serve(listener, app).await?;

    Ok(())
}
