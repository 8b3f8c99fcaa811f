//! CLI administration tool for user-api.
//!
//! Issues API tokens, inspects and creates users, and performs database
//! checks without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token valid for 24 hours
//! cargo run --bin admin -- token issue --subject deploy-bot
//!
//! # List users
//! cargo run --bin admin -- user list --page 2 --per-page 20
//!
//! # Show a single user
//! cargo run --bin admin -- user show 42
//!
//! # Create a user interactively
//! cargo run --bin admin -- user create
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `JWT_SECRET` (required for `token`): HS256 signing secret
//! - `DATABASE_URL` or `DB_*` (required for `user` and `db`)

use user_api::api::dto::page_request::MAX_PER_PAGE;
use user_api::api::dto::user::CreateUserRequest;
use user_api::config::Config;
use user_api::domain::repositories::UserRepository;
use user_api::infrastructure::persistence::PgUserRepository;
use user_api::utils::jwt::{self, Claims};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing user-api.
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
    /// Issue API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Inspect and create users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Sign a new HS256 token with JWT_SECRET
    Issue {
        /// Token subject (who the token is for)
        #[arg(short, long)]
        subject: Option<String>,

        /// Lifetime in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

/// User subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List users page by page
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        per_page: u32,
    },

    /// Show a single user
    Show { id: i64 },

    /// Create a user
    Create {
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::User { action } => {
            let pool = connect().await?;
            handle_user_action(action, &pool).await?;
        }
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { subject, ttl_hours } => issue_token(subject, ttl_hours),
    }
}

/// Signs a token and prints it with usage instructions.
///
/// The secret must match the server's `JWT_SECRET`; tokens are not stored
/// anywhere and stay valid until they expire.
fn issue_token(subject: Option<String>, ttl_hours: i64) -> Result<()> {
    println!("{}", "🔑 Issue API Token".bright_blue().bold());
    println!();

    let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
    if ttl_hours <= 0 {
        anyhow::bail!("--ttl-hours must be positive, got {}", ttl_hours);
    }

    let subject = match subject {
        Some(s) => s,
        None => Input::new()
            .with_prompt("Token subject")
            .with_initial_text("admin")
            .interact_text()?,
    };

    let claims = Claims::new(subject, chrono::Duration::hours(ttl_hours));
    let token = jwt::issue(&claims, &secret).context("Failed to sign token")?;

    let expires = chrono::DateTime::from_timestamp(claims.exp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| claims.exp.to_string());

    println!("{}", "Token details:".bright_white().bold());
    println!("  Subject: {}", claims.sub.cyan());
    println!("  Expires: {}", expires.bright_black());
    println!("  Token:   {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches user commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List { page, per_page } => list_users(&repo, page, per_page).await?,
        UserAction::Show { id } => show_user(&repo, id).await?,
        UserAction::Create {
            full_name,
            email,
            yes,
        } => create_user(&repo, full_name, email, yes).await?,
    }

    Ok(())
}

/// Prints one page of users as a table.
///
/// ```text
/// 👥 Users (page 1 of 3, 25 total)
///
///   ID    Name                      Email                          Created
///   ───────────────────────────────────────────────────────────────────────────
///   1     Ada Lovelace              ada@example.com                2025-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository, page: u32, per_page: u32) -> Result<()> {
    if page == 0 || per_page == 0 || per_page > MAX_PER_PAGE {
        anyhow::bail!("--page must be at least 1 and --per-page between 1 and {MAX_PER_PAGE}");
    }

    let offset = (i64::from(page) - 1)
        .checked_mul(i64::from(per_page))
        .ok_or_else(|| anyhow::anyhow!("--page is out of range"))?;
    let users = repo
        .list(offset, i64::from(per_page))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
    let total_pages = u64::try_from(total)
        .unwrap_or_default()
        .div_ceil(u64::from(per_page));

    println!(
        "{}",
        format!("👥 Users (page {page} of {total_pages}, {total} total)")
            .bright_blue()
            .bold()
    );
    println!();

    if users.is_empty() {
        println!("{}", "  No users on this page".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<30} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<25} {:<30} {}",
            user.id.to_string().bright_black(),
            user.full_name.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }
    println!();

    Ok(())
}

async fn show_user(repo: &PgUserRepository, id: i64) -> Result<()> {
    let user = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    println!("{}", "👤 User".bright_blue().bold());
    println!();
    println!("  ID:      {}", user.id.to_string().bright_white());
    println!("  Name:    {}", user.full_name.cyan());
    println!("  Email:   {}", user.email);
    println!("  Created: {}", user.created_at.to_rfc3339().bright_black());
    println!("  Updated: {}", user.updated_at.to_rfc3339().bright_black());
    println!();

    Ok(())
}

/// Creates a user, prompting for missing fields.
async fn create_user(
    repo: &PgUserRepository,
    full_name: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "➕ Create User".bright_blue().bold());
    println!();

    let full_name = match full_name {
        Some(n) => n,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };
    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let request = CreateUserRequest { full_name, email };
    request.validate().context("Invalid user")?;

    println!("  Name:  {}", request.full_name.cyan());
    println!("  Email: {}", request.email.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = repo
        .create(request.into_new_user())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
