//! `dockhand-probe`: smoke test for a Dockhand installation.
//!
//! Logs in with the credentials from the environment, checks that the API
//! answers and prints the stacks of the default environment.
//!
//! ## Usage
//!
//! 1. Create a `.env` file with `DOCKHAND_ENDPOINT`, `DOCKHAND_USERNAME`
//!    and `DOCKHAND_PASSWORD`
//! 2. Run: `cargo run --bin dockhand-probe`

#![allow(clippy::print_stdout)] // Allow println! in the smoke-test binary

use dockhand_provider::{DockhandClient, DockhandConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let cfg = DockhandConfig::from_env()?;
    println!("Configuration loaded:");
    println!("  Endpoint: {}", cfg.endpoint);
    println!("  User: {}", cfg.username);
    println!("  Provider: {}", cfg.auth_provider);
    if !cfg.default_env.is_empty() {
        println!("  Default environment: {}", cfg.default_env);
    }

    let client = DockhandClient::connect(&cfg).await?;
    println!("\nLogged in to {}", client.base_url());

    let health = client.health("").await?;
    println!("API status: {} ({})", health.data.status, health.status);

    let stacks = client.list_stacks("").await?.into_data();
    println!("\nStacks ({}):", stacks.len());
    for stack in &stacks {
        let status = if stack.status.is_empty() { "unknown" } else { stack.status.as_str() };
        println!("  {} [{}] {} container(s)", stack.name, status, stack.containers.len());
    }

    Ok(())
}
