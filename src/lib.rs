// tunedeck - console music player engine
// Playlists, play-next queue, party mode and listening history over a
// scanned song library; audio output stays behind the Playback trait

pub mod config;   // settings and preferences
pub mod error;    // recoverable engine errors
pub mod history;  // capped most-recent-first play log
pub mod library;  // scanning, song records, library reports
pub mod playlist; // linked playlists with a cursor, plus the catalog
pub mod queue;    // play-next FIFO and the vote-ordered party queue
pub mod session;  // playback coordination and the audio boundary

// Export the stuff callers actually use
pub use config::Config;
pub use error::EngineError;
pub use history::ListeningHistory;
pub use library::{LibraryProvider, LibraryScanner, MusicLibrary, SongRecord};
pub use playlist::{Playlist, PlaylistCatalog};
pub use queue::{PartyQueue, PlayNextQueue};
pub use session::{ConsolePlayback, Playback, PlaybackSession};
