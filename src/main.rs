mod api;
mod app;
mod config;
mod entry;
mod form;
mod manager;
mod preference;
mod settings;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{DiaryApi, HttpDiaryApi};
use app::App;
use config::Config;
use manager::EntryManager;
use preference::ThemePreference;
use settings::{FileSettingsStore, SettingsStore};

#[derive(Parser, Debug)]
#[command(name = "diary")]
#[command(about = "TUI diary journal backed by a REST diary server")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/diary-tui/config.toml")]
    config: String,

    /// Diary server base URL (overrides config)
    #[arg(long, short)]
    server: Option<String>,

    /// Log file path (default: ~/.local/share/diary-tui/diary.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Log to a file; stderr would draw over the alternate screen
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| config::data_dir().join("diary.log"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diary_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file)?;

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    let api = HttpDiaryApi::new(&config.server).context("Failed to create HTTP client")?;
    let store = FileSettingsStore::open(config.settings_path());
    tracing::info!("Settings file: {}", store.path().display());
    let theme_pref = ThemePreference::load(store);

    // Create app state and start the first fetch before the UI comes up
    let mut app = App::new(EntryManager::new(api), theme_pref, config);
    app.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B, A, S>(terminal: &mut Terminal<B>, app: &mut App<A, S>) -> Result<()>
where
    B: ratatui::backend::Backend,
    A: DiaryApi,
    S: SettingsStore,
{
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Let spawned requests make progress between ticks
        tokio::task::yield_now().await;
    }
}
