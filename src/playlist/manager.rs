use super::list::Playlist;
use crate::error::EngineError;
use crate::library::LibraryProvider;
use std::collections::HashMap;
use tracing::{info, warn};

/// All playlists by name, plus which one is selected. Everything lives in
/// memory; the catalog is rebuilt from the library each run.
#[derive(Debug, Default)]
pub struct PlaylistCatalog {
    playlists: HashMap<String, Playlist>,
    current: Option<String>,
}

impl PlaylistCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register an empty playlist. The first playlist created
    /// becomes the current one.
    pub fn create_playlist(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<(), EngineError> {
        if self.playlists.contains_key(name) {
            warn!("Playlist '{}' already exists", name);
            return Err(EngineError::DuplicatePlaylist(name.to_string()));
        }

        self.playlists
            .insert(name.to_string(), Playlist::new(name.to_string(), description));
        if self.current.is_none() {
            self.current = Some(name.to_string());
        }

        info!("Created playlist '{}'", name);
        Ok(())
    }

    /// Create a playlist seeded with up to `max_songs` records from the
    /// library snapshot, in snapshot order.
    pub fn create_playlist_from_library(
        &mut self,
        name: &str,
        library: &dyn LibraryProvider,
        max_songs: usize,
        description: Option<String>,
    ) -> Result<(), EngineError> {
        self.create_playlist(name, description)?;

        let playlist = self
            .playlists
            .get_mut(name)
            .ok_or_else(|| EngineError::PlaylistNotFound(name.to_string()))?;
        for song in library.song_library().iter().take(max_songs) {
            playlist.append(song.clone());
        }

        info!(
            "Seeded playlist '{}' with {} songs from the library",
            name,
            playlist.len()
        );
        Ok(())
    }

    pub fn switch_playlist(&mut self, name: &str) -> Result<(), EngineError> {
        if !self.playlists.contains_key(name) {
            return Err(EngineError::PlaylistNotFound(name.to_string()));
        }
        self.current = Some(name.to_string());
        info!("Switched to playlist '{}'", name);
        Ok(())
    }

    /// Delete a playlist. Deleting the current one leaves no selection; the
    /// caller has to switch before playlist operations do anything again.
    pub fn delete_playlist(&mut self, name: &str) -> Result<(), EngineError> {
        if self.playlists.remove(name).is_none() {
            return Err(EngineError::PlaylistNotFound(name.to_string()));
        }
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        info!("Deleted playlist '{}'", name);
        Ok(())
    }

    pub fn playlist_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.playlists.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name)
    }

    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.playlists.get(self.current.as_deref()?)
    }

    pub fn current_playlist_mut(&mut self) -> Option<&mut Playlist> {
        let name = self.current.clone()?;
        self.playlists.get_mut(&name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
