use anyhow::{Context, Result};
use log::debug;
use std::env;
use std::path::Path;

use neighborhood_demographics::config::{GROUPS_PATH, OUTPUT_PATH};
use neighborhood_demographics::{run_seed, summarize, Demographics, Groups, SeedConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("summary") => run_summary(&args[2..])?,
        Some("groups") => run_groups()?,
        // Seed mode (default)
        _ => run_seed_mode()?,
    }

    Ok(())
}

fn run_seed_mode() -> Result<()> {
    let config = SeedConfig::default();
    let report = run_seed(&config)?;
    debug!(
        "{} features, {} entities, {} duplicate names",
        report.features,
        report.entities,
        report.duplicates.len()
    );

    println!("{}", report.confirmation());
    Ok(())
}

/// Seeded (and hand-populated) document plus optional groups
fn load_data() -> Result<(Demographics, Groups)> {
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

    Ok((demographics, groups))
}

fn run_summary(names: &[String]) -> Result<()> {
    let (demographics, groups) = load_data()?;

    if names.is_empty() {
        for name in demographics.names() {
            if let Some(summary) = summarize(&[name], &demographics, &groups) {
                println!("{}", summary);
            }
        }
        return Ok(());
    }

    for name in names {
        match summarize(std::slice::from_ref(name), &demographics, &groups) {
            Some(summary) => println!("{}", summary),
            None => eprintln!("⚠️  No information on '{}'", name),
        }
    }

    Ok(())
}

fn run_groups() -> Result<()> {
    let (demographics, groups) = load_data()?;
    let view = groups.view(demographics.names());

    for group in &view.groups {
        println!("{}: {}", group.name, group.members.join(", "));
    }
    for name in &view.ungrouped {
        println!("{}", name);
    }

    Ok(())
}
