// Neighborhood Demographics - Map Server
// Loads the data files once and serves the REST API plus the raw files

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use neighborhood_demographics::api::{app, AppState};
use neighborhood_demographics::config::{GROUPS_PATH, OUTPUT_PATH, SERVER_ADDR};
use neighborhood_demographics::{Demographics, Groups};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🗺️  Neighborhood Demographics - Map Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let demographics_path = Path::new(OUTPUT_PATH);
    if !demographics_path.exists() {
        eprintln!("❌ {} not found!", OUTPUT_PATH);
        eprintln!("   Run: cargo run");
        eprintln!("   to seed it first.");
        std::process::exit(1);
    }

    let demographics = Demographics::load(demographics_path)
        .with_context(|| format!("Failed to load {}", OUTPUT_PATH))?;
    let groups = Groups::load_optional(Path::new(GROUPS_PATH))
        .with_context(|| format!("Failed to load {}", GROUPS_PATH))?;
    info!("Loaded {} neighborhoods, {} groups", demographics.len(), groups.len());

    let app = app(AppState::new(demographics, groups));

    let listener = tokio::net::TcpListener::bind(SERVER_ADDR)
        .await
        .with_context(|| format!("Failed to bind to {}", SERVER_ADDR))?;

    println!("\n🚀 Server running on http://{}", SERVER_ADDR);
    println!("   API:  http://{}/api/summary/<name>", SERVER_ADDR);
    println!("   Data: http://{}/{}", SERVER_ADDR, OUTPUT_PATH);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
