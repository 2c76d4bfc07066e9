//! CLI administration tool for snaplink.
//!
//! Runs the same services as the HTTP API directly against the database.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a random code
//! cargo run --bin admin -- shorten https://www.rust-lang.org
//!
//! # Shorten with (or move an existing mapping to) a custom code
//! cargo run --bin admin -- shorten https://www.rust-lang.org --code rust
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve rust
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment variables as the server (see `snaplink::config`).

use snaplink::config;
use snaplink::domain::entities::UrlType;
use snaplink::infrastructure::persistence::PgUrlMappingRepository;
use snaplink::server::connect_pool;
use snaplink::state::AppState;
use snaplink::utils::code_generator::RandomCodeGenerator;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// The original URL
        url: String,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation when replacing an existing code
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the original URL for a short code
    Resolve {
        /// The short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show mapping counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = connect_pool(&config.database).await?;

    let repository = Arc::new(PgUrlMappingRepository::new(Arc::new(pool.clone())));
    let state = AppState::new(
        repository,
        Arc::new(RandomCodeGenerator),
        config.shortener_settings(),
    );

    match cli.command {
        Commands::Shorten { url, code, yes } => shorten(&state, url, code, yes).await?,
        Commands::Resolve { code } => resolve(&state, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Shortens a URL, asking before an existing mapping is moved to a new code.
async fn shorten(state: &AppState, url: String, code: Option<String>, yes: bool) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url_type = if code.is_some() {
        UrlType::Custom
    } else {
        UrlType::Random
    };

    if let Some(new_code) = &code
        && !yes
        && let Some(existing) = state
            .repository
            .find_by_original_url(url.trim())
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        && existing.short_url != *new_code
    {
        println!(
            "  This URL is already shortened as {}",
            existing.short_url.bright_yellow()
        );
        println!();

        let confirmed = Confirm::new()
            .with_prompt(format!("Replace it with '{}'?", new_code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let outcome = state
        .shortening_service
        .shorten(&url, code.as_deref(), url_type)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    if outcome.already_existed {
        println!("{}", "♻️  Existing mapping".yellow());
    } else {
        println!("{}", "✅ Mapping created".green().bold());
    }
    println!();
    println!("  Original: {}", outcome.original_url.cyan());
    println!("  Short:    {}", outcome.short_url.bright_yellow().bold());
    println!(
        "  Created:  {}",
        outcome
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Prints the target of a short code.
async fn resolve(state: &AppState, code: &str) -> Result<()> {
    match state.redirect_service.resolve(code).await {
        Ok(original_url) => {
            println!("  {} → {}", code.bright_yellow(), original_url.cyan());
            Ok(())
        }
        Err(snaplink::AppError::NotFound(_)) => {
            println!("{}", format!("❌ Short URL '{}' not found", code).red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Dispatches database operation commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔌 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").execute(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "📊 Mappings".bright_blue().bold());
            println!();

            let (total, custom): (i64, i64) = sqlx::query_as(
                "SELECT COUNT(*), COUNT(*) FILTER (WHERE url_type = 'CUSTOM') FROM url_mappings",
            )
            .fetch_one(pool)
            .await?;

            println!("  Total:  {}", total.to_string().bright_white().bold());
            println!("  Custom: {}", custom.to_string().bright_white().bold());
            println!(
                "  Random: {}",
                (total - custom).to_string().bright_white().bold()
            );
            println!();
        }
    }

    Ok(())
}
