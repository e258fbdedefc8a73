//! Project Hub CLI - list, create and open projects from the terminal.
//!
//! Human-readable output goes to stdout; JSON is printed for `create` and
//! `open` so the result can be piped. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use project_hub::{Config, HomeView, ProjectHubClient};

#[derive(Parser)]
#[command(name = "project-hub")]
#[command(about = "List and create projects on a Project Hub server")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL, overrides config and PROJECT_HUB_URL
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home screen
    List,
    /// Create a project
    Create {
        /// Project name
        name: String,
    },
    /// Open a project by id and print the detail hand-off
    Open {
        /// Project id
        id: String,
    },
}

/// Config file, then environment, then `--url`
fn load_config(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut config = Config::load_with(cli.config.as_deref(), env)?;
    if let Some(url) = &cli.url {
        config.server.base_url = url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli, |key| std::env::var(key).ok())?;

    tracing::debug!("Using Project Hub at {}", config.server.base_url);
    let client = ProjectHubClient::with_timeout(&config.server.base_url, config.timeout())?;
    let mut home = HomeView::from_config(Arc::new(client), &config);

    match cli.command {
        Commands::List => {
            // A failed load still renders the (empty) screen with its notice
            let _ = home.load_all().await;
            print!("{}", home.render_text());
        }
        Commands::Create { name } => {
            home.load_all()
                .await
                .context("could not load existing projects")?;
            home.activate_new_project();
            home.set_name(name);
            let project = home.submit().await?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        Commands::Open { id } => {
            home.load_all().await?;
            let route = home
                .select_by_id(&id)
                .ok_or_else(|| anyhow!("no project with id {}", id))?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }
    }

    home.teardown();
    Ok(())
}
