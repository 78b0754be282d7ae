use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tadmin::api::ApiClient;
use tadmin::app::App;
use tadmin::config::Config;
use tadmin::server::{Router, Server};
use tadmin::store::{JsonFileStore, MemoryStore, RecordStore};
use tadmin::{event, ui, VERSION};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Admin service and terminal client for Test records
#[derive(Parser, Debug)]
#[command(name = "tadmin", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level for debugging
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the /api/tests HTTP resource
    Serve(ServeArgs),
    /// Browse and edit records in the terminal (default)
    Ui(UiArgs),
}

#[derive(clap::Args, Debug, Default)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Persist records to this JSON file instead of memory
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Default)]
struct UiArgs {
    /// Base URL of the tadmin server
    #[arg(short, long)]
    server_url: Option<String>,

    /// Rows per table page
    #[arg(long)]
    page_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// File logging for the terminal UI, which owns stdout
fn setup_file_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("tadmin {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

/// Stderr logging for the server; RUST_LOG wins over the flag
fn setup_server_logging(level: Option<LogLevel>) {
    let fallback = match level.and_then(LogLevel::to_tracing_level) {
        Some(level) => level.to_string().to_lowercase(),
        None if level.is_some() => "off".to_string(),
        None => "info".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("tadmin").join("tadmin.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tadmin").join("tadmin.log");
    }
    PathBuf::from("tadmin.log")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load();

    match args.command {
        Some(Command::Serve(serve_args)) => {
            setup_server_logging(args.log_level);
            run_server(serve_args, &config).await
        },
        Some(Command::Ui(ui_args)) => run_ui(ui_args, config, args.log_level).await,
        None => run_ui(UiArgs::default(), config, args.log_level).await,
    }
}

async fn run_server(args: ServeArgs, config: &Config) -> Result<()> {
    let addr = config.effective_bind_addr(args.bind.as_deref())?;

    let store: Arc<dyn RecordStore> = match config.effective_data_file(args.data_file) {
        Some(path) => {
            tracing::info!("Using JSON file store at {:?}", path);
            Arc::new(JsonFileStore::new(path))
        },
        None => {
            tracing::info!("Using in-memory store");
            Arc::new(MemoryStore::new())
        },
    };
    // Surface a broken data file at startup rather than on the first request
    store
        .ensure_connected()
        .context("Failed to open record store")?;

    let router = Router::new(store).context("Failed to build routes")?;
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server
        .serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;
    Ok(())
}

async fn run_ui(args: UiArgs, mut config: Config, log_level: Option<LogLevel>) -> Result<()> {
    let _log_guard = setup_file_logging(log_level.unwrap_or(LogLevel::Off))?;

    let server_url = config.effective_server_url(args.server_url.as_deref());
    let client = ApiClient::new(&server_url, config.request_timeout())?;
    if let Err(e) = config.set_server_url(&server_url) {
        tracing::warn!("Failed to save config: {}", e);
    }
    let page_size = config.effective_page_size(args.page_size);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, config, page_size);
    let run_result = run_app(&mut terminal, &mut app).await;
    cleanup_terminal(&mut terminal)?;

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Initial fetch, drawn in its loading state first
    app.loading = true;
    terminal.draw(|f| ui::render(f, app))?;
    app.fetch_records().await;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // The busy frame is on screen; now send the request
        if app.has_pending_submit() {
            app.finish_submit().await;
            continue;
        }

        if event::handle_events(app).await? {
            return Ok(());
        }
    }
}
