use std::net::SocketAddr;
use std::path::PathBuf;
use clap::Parser;
use serde_json::Value;
use tracing::info;
use ding_availability::core::controller::AppState;
use ding_availability::items::dto::parse_payload;
use ding_availability::provider::controller::build_router;
use ding_availability::utils::logging::setup_tracing;

#[derive(Parser)]
#[command(name = "provider")]
#[command(about = "Serve availability records from a JSON fixture", long_about = None)]
struct Args {
    /// JSON object of availability records keyed by item id
    #[arg(long)]
    fixture: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    setup_tracing();
    let args = Args::parse();

    let json = tokio::fs::read_to_string(&args.fixture).await?;
    let records = parse_payload(serde_json::from_str::<Value>(json.as_str())?)?;
    info!(records = records.len(), bind = %args.bind, "starting availability provider");

    let app = build_router(AppState::new(records));
    axum::Server::bind(&args.bind)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
