//! CLI administration tool for the shortener.
//!
//! Talks to the configured store, cache and alias generator directly,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Save a URL under a generated alias
//! cargo run --bin shortener-admin -- save https://example.com
//!
//! # Save a URL under a chosen alias
//! cargo run --bin shortener-admin -- save https://example.com --alias promo
//!
//! # Look an alias up
//! cargo run --bin shortener-admin -- resolve promo
//!
//! # Delete an alias (asks for confirmation unless -y is given)
//! cargo run --bin shortener-admin -- delete promo -y
//!
//! # Check store and cache connectivity
//! cargo run --bin shortener-admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shortener::config`].

use shortener::application::services::{ResolutionService, ShortenerError};
use shortener::api::dto::save_url::SaveUrlRequest;
use shortener::config::{self, Config};
use shortener::domain::deadline::Deadline;
use shortener::server::{self, build_shortener};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use validator::Validate;

/// CLI tool for managing the shortener.
#[derive(Parser)]
#[command(name = "shortener-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a URL
    Save {
        /// Target URL (http or https)
        url: String,

        /// Alias to save under (generated if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the target of an alias
    Resolve { alias: String },

    /// Delete an alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Check store and cache connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    server::init_tracing("warn", &config.log_format);

    let shortener = build_shortener(&config).await?;

    let result = match cli.command {
        Commands::Save { url, alias } => save(&shortener.service, &config, url, alias).await,
        Commands::Resolve { alias } => resolve(&shortener.service, &config, &alias).await,
        Commands::Delete { alias, yes } => delete(&shortener.service, &config, &alias, yes).await,
        Commands::Check => check(&shortener.service, &config).await,
    };

    shortener
        .shutdown(Deadline::after(config.shutdown_timeout()))
        .await;

    result
}

async fn save(
    service: &ResolutionService,
    config: &Config,
    url: String,
    alias: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Save URL".bright_blue().bold());
    println!();

    let request = SaveUrlRequest { url, alias };
    if let Err(errors) = request.validate() {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_deref()
                    .unwrap_or(error.code.as_ref())
                    .to_string();
                println!("  {} {}: {}", "❌".red(), field.cyan(), message);
            }
        }
        anyhow::bail!("Invalid input");
    }

    let target = request
        .normalized_url()
        .ok_or_else(|| anyhow::anyhow!("Invalid URL format"))?;

    let deadline = Deadline::after(config.request_timeout());
    match service
        .save(deadline, &target, request.requested_alias())
        .await
    {
        Ok(alias) => {
            println!("{}", "✅ Saved".green().bold());
            println!("  Alias:  {}", alias.bright_yellow().bold());
            println!("  Target: {}", target.cyan());
            println!();
            Ok(())
        }
        Err(ShortenerError::AliasConflict { alias }) => {
            println!("{} Alias {} is already taken", "⚠️ ".yellow(), alias.cyan());
            anyhow::bail!("Alias already exists")
        }
        Err(e) => Err(anyhow::anyhow!("Failed to save URL: {}", e)),
    }
}

async fn resolve(service: &ResolutionService, config: &Config, alias: &str) -> Result<()> {
    let deadline = Deadline::after(config.request_timeout());

    match service.resolve(deadline, alias).await {
        Ok(target) => {
            println!("  {} → {}", alias.bright_yellow(), target.cyan());
            Ok(())
        }
        Err(ShortenerError::NotFound { .. }) => {
            println!("{} Alias {} not found", "❌".red(), alias.cyan());
            anyhow::bail!("Alias not found")
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve alias: {}", e)),
    }
}

/// Deletes an alias after an explicit confirmation (default: No).
async fn delete(
    service: &ResolutionService,
    config: &Config,
    alias: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete alias".bright_blue().bold());
    println!();
    println!("  Alias: {}", alias.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this alias?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deadline = Deadline::after(config.request_timeout());
    match service.delete(deadline, alias).await {
        Ok(()) => {
            println!("{}", "✅ Deleted".green().bold());
            println!();
            Ok(())
        }
        Err(ShortenerError::NotFound { .. }) => {
            println!("{} Alias {} not found", "❌".red(), alias.cyan());
            anyhow::bail!("Alias not found")
        }
        Err(e) => Err(anyhow::anyhow!("Failed to delete alias: {}", e)),
    }
}

async fn check(service: &ResolutionService, config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking backends...".bright_blue().bold());
    println!();

    let store_ok = service.store().health_check().await;
    let cache_ok = service.cache().health_check().await;

    print_check(&format!("Store ({})", config.storage_backend), store_ok);
    let cache_label = if config.is_cache_enabled() {
        "Cache (redis)"
    } else {
        "Cache (disabled)"
    };
    print_check(cache_label, cache_ok);
    println!();

    if !store_ok || !cache_ok {
        anyhow::bail!("One or more backends are unreachable");
    }

    Ok(())
}

fn print_check(label: &str, ok: bool) {
    let status = if ok { "OK".green() } else { "FAILED".red() };
    println!("  {:<20} {}", label.bright_white(), status);
}
