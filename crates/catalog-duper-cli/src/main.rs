mod commands;
mod logging;
mod progress;
mod render;

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use catalog_duper_core::engine::{StatusMessage, STORE_INACTIVE_MESSAGE};
use catalog_duper_core::storage::{import, Database};
use catalog_duper_core::{AdminRequest, AppConfig, DedupeEngine};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info, warn};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match catalog_duper_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Scan { page, json }) => run_admin(&config, AdminRequest::Scan { page }, json),
        Some(Commands::DeleteSelected { ids, yes, page }) => {
            let candidate_ids: BTreeSet<i64> = ids.into_iter().collect();
            if !yes
                && !prompt_confirm(
                    "Are you sure? This will delete selected duplicates, keeping the lowest priced product in each group.",
                    Some(false),
                )?
            {
                process::exit(0);
            }
            run_admin(
                &config,
                AdminRequest::DeleteSelected {
                    candidate_ids: Some(candidate_ids),
                    page,
                },
                false,
            )
        }
        Some(Commands::DeleteAll { yes, page }) => {
            if !yes
                && !prompt_confirm(
                    "Are you sure? This will delete ALL duplicates, keeping only the lowest priced product in each group. This action cannot be undone.",
                    Some(false),
                )?
            {
                process::exit(0);
            }
            run_admin(&config, AdminRequest::DeleteAll { page }, false)
        }
        Some(Commands::Import { csv }) => run_import(&config, &csv),
        Some(Commands::DeletionLog { limit }) => run_deletion_log(&config, limit),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        process::exit(1);
    }

    Ok(())
}

fn run_admin(config: &AppConfig, request: AdminRequest, json: bool) -> anyhow::Result<()> {
    let db = match Database::open_existing(&config.database_path) {
        Ok(db) => db,
        Err(err) => {
            warn!("Cannot open catalog at {}: {}", config.database_path, err);
            render::print_status(&StatusMessage::error(STORE_INACTIVE_MESSAGE));
            return Ok(());
        }
    };

    let engine = DedupeEngine::new(db, config.clone());
    let reporter = CliReporter::new();
    let response = engine.handle(&request, &reporter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        render::print_response(&response, config.missing_price);
    }
    Ok(())
}

fn run_import(config: &AppConfig, csv: &Path) -> anyhow::Result<()> {
    let db = Database::open(&config.database_path)
        .with_context(|| format!("opening catalog at {}", config.database_path))?;
    let written = import::import_catalog_csv(&db, csv)?;
    info!(
        "{} items imported, {} items in catalog",
        format!("{}", written).green(),
        format!("{}", db.count_items()?).cyan(),
    );
    Ok(())
}

fn run_deletion_log(config: &AppConfig, limit: i64) -> anyhow::Result<()> {
    let db = Database::open_existing(&config.database_path)
        .with_context(|| format!("opening catalog at {}", config.database_path))?;
    let entries = db.get_deletion_log(0, limit)?;
    render::print_deletion_log(&entries);
    Ok(())
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
