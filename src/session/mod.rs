use crate::history::ListeningHistory;
use crate::library::SongRecord;
use crate::playlist::PlaylistCatalog;
use crate::queue::{PartyQueue, PlayNextQueue};
use anyhow::Result;
use tracing::{debug, info};

/// The audio output boundary. Real decoding and device handling live behind
/// this; the engine only ever asks for play/stop.
pub trait Playback {
    fn play(&mut self, song: &SongRecord) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Playback sink that only logs. Stands in wherever real audio output is not
/// wired up.
#[derive(Debug, Default)]
pub struct ConsolePlayback;

impl Playback for ConsolePlayback {
    fn play(&mut self, song: &SongRecord) -> Result<()> {
        info!("Now playing: {}", song.display_label());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        info!("Playback stopped");
        Ok(())
    }
}

/// Ties the containers together: the playlist catalog, the play-next and
/// party queues, the listening history, and whatever is currently playing.
/// The session sequences cross-container operations (play, then record to
/// history); the containers themselves stay independent.
pub struct PlaybackSession {
    player: Box<dyn Playback>,
    pub catalog: PlaylistCatalog,
    pub play_next: PlayNextQueue,
    pub party: PartyQueue,
    pub history: ListeningHistory,
    currently_playing: Option<SongRecord>,
}

impl PlaybackSession {
    pub fn new(player: Box<dyn Playback>, history: ListeningHistory) -> Self {
        Self {
            player,
            catalog: PlaylistCatalog::new(),
            play_next: PlayNextQueue::new(),
            party: PartyQueue::new(),
            history,
            currently_playing: None,
        }
    }

    /// Play a song: route it to the sink, mark it current, log it to history.
    pub fn play_song(&mut self, song: SongRecord) -> Result<()> {
        self.player.play(&song)?;
        self.history.record_play(song.clone());
        self.currently_playing = Some(song);
        Ok(())
    }

    /// Play whatever should come next: the play-next queue is consulted
    /// first; when it is empty, the current playlist's cursor advances and
    /// that song plays. Returns the song that started, or None when both
    /// sources are exhausted.
    pub fn play_next_song(&mut self) -> Result<Option<SongRecord>> {
        if let Some(song) = self.play_next.dequeue() {
            self.play_song(song.clone())?;
            return Ok(Some(song));
        }

        let next = self
            .catalog
            .current_playlist_mut()
            .and_then(|playlist| playlist.next_song().cloned());
        match next {
            Some(song) => {
                self.play_song(song.clone())?;
                Ok(Some(song))
            }
            None => {
                debug!("Nothing queued and no next song in the current playlist");
                Ok(None)
            }
        }
    }

    /// Play the song under the current playlist's cursor without moving it.
    pub fn play_current_playlist_song(&mut self) -> Result<Option<SongRecord>> {
        let song = self
            .catalog
            .current_playlist()
            .and_then(|playlist| playlist.current_song().cloned());
        match song {
            Some(song) => {
                self.play_song(song.clone())?;
                Ok(Some(song))
            }
            None => Ok(None),
        }
    }

    /// Dequeue the top-voted party entry and play it.
    pub fn play_from_party_queue(&mut self) -> Result<Option<SongRecord>> {
        match self.party.dequeue_highest() {
            Some(entry) => {
                self.play_song(entry.song.clone())?;
                Ok(Some(entry.song))
            }
            None => {
                debug!("Party queue is empty");
                Ok(None)
            }
        }
    }

    pub fn stop(&mut self) -> Result<()> {
        self.player.stop()?;
        self.currently_playing = None;
        Ok(())
    }

    pub fn currently_playing(&self) -> Option<&SongRecord> {
        self.currently_playing.as_ref()
    }
}
