// tunedeck - console music player
// Scans your music into a library, seeds the default playlist and reports
// where everything stands; the engine itself lives in the library crate

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tunedeck::{Config, ConsolePlayback, ListeningHistory, MusicLibrary, PlaybackSession};

#[derive(Parser)]
#[command(name = "tunedeck")]
#[command(about = "Console music player engine - playlists, party queue, listening history")]
struct Args {
    /// Music directory to scan (overrides the configured directories)
    music_dir: Option<PathBuf>,

    /// Enable developer logging (stderr notice + debug output)
    #[arg(long)]
    dev: bool,
}

fn init_logging(dev: bool) -> Result<()> {
    // Logs land next to the binary, one file per day
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "tunedeck.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tunedeck=debug"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(base_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if dev {
        eprintln!("Dev mode: debug output enabled (see logs/)");
    }

    // Keep the writer thread alive for the life of the process
    std::mem::forget(guard);

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.dev)?;

    // Load config - falls back to defaults if missing
    let config = Config::load()?;
    let directories = match &args.music_dir {
        Some(dir) => vec![dir.clone()],
        None => config.music_directories.clone(),
    };

    info!("Scanning {} music directories", directories.len());
    let library = MusicLibrary::scan(&directories)?;
    if library.is_empty() {
        println!("No songs found. Point tunedeck at a music directory:");
        println!("  tunedeck <MUSIC_DIR>");
        return Ok(());
    }

    let history = ListeningHistory::with_capacity(config.history.capacity)?;
    let mut session = PlaybackSession::new(Box::new(ConsolePlayback), history);
    session.catalog.create_playlist_from_library(
        "Library Mix",
        &library,
        config.playlist.default_library_take,
        Some("Seeded from the scanned library".to_string()),
    )?;

    print_status(&session, &library);

    Ok(())
}

fn print_status(session: &PlaybackSession, library: &MusicLibrary) {
    let stats = library.stats();
    println!("Library: {} songs from {} artists ({:.1} MB)",
        stats.total_songs,
        stats.artist_count,
        stats.total_bytes as f64 / 1_000_000.0,
    );

    for artist in library.artists() {
        println!("  {} ({} songs)", artist, library.songs_by_artist(artist).len());
    }

    println!("\nPlaylists: {}", session.catalog.len());
    if let Some(playlist) = session.catalog.current_playlist() {
        println!("  Active: {} ({} songs)", playlist.name, playlist.len());
        let current = playlist.current_song();
        for song in playlist.iter() {
            let marker = if current == Some(song) { "->" } else { "  " };
            println!("  {} {}", marker, song.display_label());
        }
    }

    println!("\nPlay next: {} queued", session.play_next.len());
    println!("Party queue: {} songs", session.party.len());
    for entry in session.party.iter() {
        println!("  [{} votes] {}", entry.votes, entry.song.display_label());
    }
    println!("History: {} of {} plays kept", session.history.len(), session.history.capacity());
}
