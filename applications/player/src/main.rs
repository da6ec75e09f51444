/// Bardo Player - random radio client for a Bardo backend
use anyhow::Result;
use bardo_catalog::{CatalogClient, ClientConfig, TrackFetcher};
use bardo_player::{PlayerConfig, PlayerSession, RodioLoader};
use bardo_transport::TransportState;
use clap::{Parser, Subcommand};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bardo-player")]
#[command(about = "Random radio player for a Bardo backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a random track and start the player
    Play {
        /// Backend base URL (overrides the config file)
        #[arg(short, long)]
        server: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bardo_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { server, config } => play(server, config).await,
    }
}

async fn play(server: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = PlayerConfig::load(config_path.as_deref())?;
    if let Some(url) = server {
        config.server.url = url;
    }
    config.validate()?;

    info!("Starting Bardo Player");
    info!("Backend: {}", config.server.url);

    let client = CatalogClient::new(ClientConfig::new(&config.server.url))?;
    let fetcher = TrackFetcher::new(client, config.fetch_policy());
    let loader = RodioLoader::new()?;
    let mut session = PlayerSession::new(fetcher, loader, config.transport_config());

    session.start().await?;

    println!("Controls: space play/pause | n change song | ←/→ seek 5s | +/- volume | q quit");

    let (key_tx, mut key_rx) = mpsc::unbounded_channel::<KeyEvent>();
    std::thread::spawn(move || read_keys(key_tx));

    crossterm::terminal::enable_raw_mode()?;
    let result = run(&mut session, &mut key_rx).await;
    crossterm::terminal::disable_raw_mode()?;
    println!();

    result
}

/// Blocking keyboard reader; forwards key presses to the async loop.
fn read_keys(tx: mpsc::UnboundedSender<KeyEvent>) {
    while let Ok(event) = crossterm::event::read() {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press && tx.send(key).is_err() {
                break;
            }
        }
    }
}

async fn run(
    session: &mut PlayerSession<RodioLoader>,
    keys: &mut mpsc::UnboundedReceiver<KeyEvent>,
) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.tick().await?;
            }
            key = keys.recv() => {
                let Some(key) = key else { break };
                if !handle_key(session, key).await? {
                    break;
                }
                session.pump_events().await?;
            }
        }

        render(session);
    }

    Ok(())
}

/// Apply one key press; returns false when the player should quit.
async fn handle_key(session: &mut PlayerSession<RodioLoader>, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(false);
        }
        KeyCode::Char(' ') => {
            if let Err(err) = session.transport_mut().toggle_play() {
                debug!(error = %err, "Play ignored");
            }
        }
        KeyCode::Char('n') => session.change_song().await?,
        KeyCode::Right => {
            if let Err(err) = session.transport_mut().skip_forward() {
                debug!(error = %err, "Skip ignored");
            }
        }
        KeyCode::Left => {
            if let Err(err) = session.transport_mut().rewind() {
                debug!(error = %err, "Rewind ignored");
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            session.transport_mut().apply_wheel(-120.0);
        }
        KeyCode::Char('-') | KeyCode::Down => {
            session.transport_mut().apply_wheel(120.0);
        }
        _ => {}
    }

    Ok(true)
}

fn render(session: &PlayerSession<RodioLoader>) {
    let transport = session.transport();

    let state = match transport.state() {
        TransportState::Playing => ">",
        TransportState::Paused => "||",
        TransportState::Ready => "--",
        TransportState::Loading | TransportState::Idle => "..",
    };

    let title = session
        .now_playing()
        .map(|now| match &now.artist {
            Some(artist) => format!("{} - {}", artist, now.title),
            None => now.title.clone(),
        })
        .unwrap_or_else(|| "loading...".to_string());

    let position = format_time(transport.display_position());
    let progress = transport
        .progress_percent()
        .map(|p| format!(" ({:>3.0}%)", p))
        .unwrap_or_default();

    let volume = (transport.display_volume() * 10.0).round() as usize;
    let bar: String = "#".repeat(volume) + &"-".repeat(10 - volume.min(10));

    print!("\r\x1b[2K{} {}  {}{}  vol [{}]", state, title, position, progress, bar);
    std::io::stdout().flush().ok();
}

fn format_time(duration: Duration) -> String {
    let total = duration.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
