use std::path::PathBuf;
use std::sync::Arc;
use clap::Parser;
use serde_json::{json, Value};
use tracing::info;
use ding_availability::availability::command::activate_cmd::{ActivateCommand, ActivateCommandRequest};
use ding_availability::availability::domain::model::ActivationSettings;
use ding_availability::availability::factory::create_availability_service;
use ding_availability::core::command::Command;
use ding_availability::core::domain::Configuration;
use ding_availability::core::library::{GroupKind, RESERVATION_PREFIX};
use ding_availability::display::page::{MemoryPage, Region};
use ding_availability::display::updater::HIDDEN_CLASS;
use ding_availability::gateway::GatewayVia;
use ding_availability::gateway::logs::LoggingListener;
use ding_availability::items::factory::create_availability_cache;
use ding_availability::utils::logging::setup_tracing;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "availability")]
#[command(about = "Resolve item availability for a page and print the decorated regions", long_about = None)]
struct Args {
    /// Activation settings as JSON (native shape or legacy ding_availability map)
    #[arg(long)]
    settings: PathBuf,

    /// Optional configuration file with default mode, timeout and labels
    #[arg(long)]
    config: Option<PathBuf>,

    /// Origin of the availability provider
    #[arg(long, default_value = "http://localhost:8080")]
    origin: String,

    /// Answer from a JSON fixture instead of calling the provider
    #[arg(long)]
    fixture: Option<PathBuf>,
}

async fn read_json(path: &PathBuf) -> Result<Value, BoxError> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(json.as_str())?)
}

// every group gets its region, indicators also get their hidden reservation button
fn build_page(settings: &ActivationSettings) -> MemoryPage {
    let page = MemoryPage::new();
    for (group_id, group) in settings.group_mapping.iter() {
        page.add_region(group_id, Region::default());
        if let (GroupKind::Indicator, Some(first)) = (&group.kind, group.first()) {
            page.add_region(format!("{}{}", RESERVATION_PREFIX, first).as_str(), Region::with_classes(&[HIDDEN_CLASS]));
        }
    }
    page
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    setup_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => serde_json::from_value::<Configuration>(read_json(path).await?)?,
        None => Configuration::new(),
    };
    let settings = ActivationSettings::from_value(read_json(&args.settings).await?)?;
    let via = match args.fixture {
        Some(path) => GatewayVia::Fixture { path },
        None => GatewayVia::Http { origin: args.origin },
    };
    info!(groups = settings.group_mapping.len(), "activating availability");

    let page = Arc::new(build_page(&settings));
    let mut svc = create_availability_service(&config, create_availability_cache(), page.clone(), &via).await?;
    svc.subscribe(Box::new(LoggingListener::new()));
    let res = ActivateCommand::new(svc).execute(ActivateCommandRequest::new(settings)).await?;

    let out = json!({
        "report": res.report,
        "page": page.snapshot(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
