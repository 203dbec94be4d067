use aisle::api::{CategoryClient, FetchResult};
use aisle::app::{App, AppEvent};
use aisle::config::Config;
use aisle::state::ViewMode;
use aisle::ui;
use aisle::util::{format_timestamp, strip_control_chars, validate_http_url, TimeDisplay};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Get the config directory path (~/.config/aisle/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("aisle"))
}

#[derive(Parser, Debug)]
#[command(
    name = "aisle",
    version,
    about = "Browse product categories from a public REST API"
)]
struct Args {
    /// API root; `/categories` is appended
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Initial view: table or cards
    #[arg(long, value_name = "MODE")]
    view: Option<String>,

    /// Config file (default: ~/.config/aisle/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fetch once, print the categories as plain text, and exit
    #[arg(long)]
    dump: bool,
}

/// Log to stderr for one-shot runs, to a file while the TUI owns the screen.
fn init_tracing(dump: bool, config_dir: &Path) -> Result<()> {
    let filter = EnvFilter::from_default_env();

    if dump {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    let log_path = config_dir.join("aisle.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

/// Config file, then command-line flags on top.
fn resolve_config(args: &Args, config_dir: &Path) -> Result<Config> {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&path)
        .with_context(|| format!("Failed to load config '{}'", path.display()))?;

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.timeout_secs = timeout;
    }
    if let Some(view) = &args.view {
        if ViewMode::from_str_name(view).is_none() {
            anyhow::bail!("Unknown view '{}': expected 'table' or 'cards'", view);
        }
        config.view_mode = view.clone();
    }

    validate_http_url(&config.base_url)
        .with_context(|| format!("Invalid base URL '{}'", config.base_url))?;
    Ok(config)
}

/// Print categories as a plain table. Returns false if the fetch failed.
async fn dump(client: &CategoryClient, tz: TimeDisplay) -> bool {
    match client.fetch_categories().await {
        FetchResult::Success { categories } => {
            println!(
                "{:>5}  {:<24}  {:<19}  {:<19}  IMAGE",
                "ID", "NAME", "CREATED", "UPDATED"
            );
            for c in &categories {
                println!(
                    "{:>5}  {:<24}  {:<19}  {:<19}  {}",
                    c.id,
                    strip_control_chars(&c.name),
                    format_timestamp(&c.creation_at, tz),
                    format_timestamp(&c.updated_at, tz),
                    strip_control_chars(&c.image),
                );
            }
            println!("{} categories", categories.len());
            true
        }
        FetchResult::Failure { reason, message } => {
            tracing::error!(?reason, "Fetch failed");
            eprintln!("Error loading categories: {}", message);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_dir = get_config_dir()?;

    init_tracing(args.dump, &config_dir)?;

    let config = resolve_config(&args, &config_dir)?;
    let timeout = config.timeout();
    let client = CategoryClient::new(&config.base_url, timeout)
        .context("Failed to create HTTP client")?;

    if args.dump {
        if !dump(&client, config.time_display()).await {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut app = App::new(client, config.initial_view_mode());
    for warning in app.apply_config(&config) {
        tracing::warn!("{}", warning);
        app.set_status(warning);
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(64);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
