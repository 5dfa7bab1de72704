use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use client::catalog::{self, ALL_CATEGORIES, PRODUCTS};
use client::net::api::{ApiClient, ApiConfig, ApiError, DEFAULT_API_BASE_URL, DEFAULT_SITE_BASE_URL, SiteClient};
use client::state::auth::{AuthError, AuthScope};
use client::state::notify::Notifier;
use client::state::session::FileSessionStore;
use serde_json::Value;

const DEFAULT_SESSION_FILE: &str = ".dracarys-session.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("relay answered with status {0}")]
    RelayStatus(u16),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "dracarys", about = "Dracarys site session and catalog CLI")]
struct Cli {
    #[arg(long, env = "DRACARYS_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    #[arg(long, env = "DRACARYS_SITE_URL", default_value = DEFAULT_SITE_BASE_URL)]
    site_url: String,

    #[arg(long, env = "DRACARYS_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the site server is up.
    Ping,
    /// Restore the stored session and print the signed-in user.
    Whoami,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DRACARYS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "DRACARYS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Ask the site to send a password reset email.
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// List catalog products, optionally for one category.
    Products {
        #[arg(long, default_value = ALL_CATEGORIES)]
        category: String,
    },
}

/// Prints notifications to stderr so stdout stays machine-readable.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.site_url).await,
        Command::Whoami => run_whoami(&mount(&cli).await?),
        Command::Login { ref email, ref password } => run_login(&cli, email, password).await,
        Command::Register { ref name, ref email, ref password } => run_register(&cli, name, email, password).await,
        Command::Logout => run_logout(&cli).await,
        Command::ForgotPassword { ref email } => run_forgot_password(&cli.site_url, email).await,
        Command::Products { ref category } => run_products(category),
    }
}

/// One CLI invocation is one page load: a fresh context bootstrapped from
/// the session file.
async fn mount(cli: &Cli) -> Result<AuthScope, CliError> {
    let backend = ApiClient::new(&ApiConfig::new(&cli.api_url))?;
    let store = FileSessionStore::new(&cli.session_file);
    Ok(AuthScope::mount(Arc::new(backend), Arc::new(store), Arc::new(ConsoleNotifier)).await)
}

async fn run_ping(site_url: &str) -> Result<(), CliError> {
    SiteClient::new(&ApiConfig::new(site_url))?.health().await?;
    println!("ok");
    Ok(())
}

fn run_whoami(scope: &AuthScope) -> Result<(), CliError> {
    match scope.use_auth()?.user() {
        Some(user) => print_json(&serde_json::to_value(user)?),
        None => {
            println!("anonymous");
            Ok(())
        }
    }
}

async fn run_login(cli: &Cli, email: &str, password: &str) -> Result<(), CliError> {
    let auth = mount(cli).await?.use_auth()?;
    auth.login(email, password).await?;
    print_json(&serde_json::to_value(auth.user())?)
}

async fn run_register(cli: &Cli, name: &str, email: &str, password: &str) -> Result<(), CliError> {
    let auth = mount(cli).await?.use_auth()?;
    auth.register(name, email, password).await?;
    print_json(&serde_json::to_value(auth.user())?)
}

async fn run_logout(cli: &Cli) -> Result<(), CliError> {
    mount(cli).await?.use_auth()?.logout();
    Ok(())
}

async fn run_forgot_password(site_url: &str, email: &str) -> Result<(), CliError> {
    let reply = SiteClient::new(&ApiConfig::new(site_url))?
        .forgot_password(email)
        .await?;
    print_json(&reply.body)?;
    if !reply.is_success() {
        return Err(CliError::RelayStatus(reply.status));
    }
    Ok(())
}

fn run_products(category: &str) -> Result<(), CliError> {
    if catalog::category_name(category).is_none() {
        return Err(CliError::UnknownCategory(category.to_owned()));
    }
    print_json(&serde_json::to_value(catalog::filter_by_category(&PRODUCTS, category))?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
