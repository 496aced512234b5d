use super::song::SongRecord;
use super::{LibraryProvider, LibraryScanner};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// The scanned song library: a flat, point-in-time snapshot plus the read
/// side of the old library menu (search, per-artist and per-type reports,
/// totals).
pub struct MusicLibrary {
    songs: Vec<SongRecord>,
}

#[derive(Debug, Default, PartialEq)]
pub struct LibraryStats {
    pub total_songs: usize,
    pub total_bytes: u64,
    pub artist_count: usize,
}

impl MusicLibrary {
    /// Scan the given directories and build a fresh snapshot.
    pub fn scan(directories: &[PathBuf]) -> Result<Self> {
        let scanner = LibraryScanner::new();
        let songs = scanner.scan_directories(directories)?;
        info!("Library loaded with {} songs", songs.len());
        Ok(Self::from_songs(songs))
    }

    pub fn from_songs(songs: Vec<SongRecord>) -> Self {
        Self { songs }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// All songs whose title or artist contains the query, case-insensitive.
    pub fn search(&self, query: &str) -> Vec<&SongRecord> {
        self.songs.iter().filter(|s| s.matches(query)).collect()
    }

    /// Distinct artists, sorted. Case differences collapse to the first
    /// spelling seen.
    pub fn artists(&self) -> Vec<&str> {
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for song in &self.songs {
            seen.entry(song.artist.to_lowercase())
                .or_insert(song.artist.as_str());
        }
        seen.into_values().collect()
    }

    pub fn songs_by_artist(&self, artist: &str) -> Vec<&SongRecord> {
        self.songs
            .iter()
            .filter(|s| s.artist.eq_ignore_ascii_case(artist))
            .collect()
    }

    pub fn songs_by_file_type(&self, file_type: &str) -> Vec<&SongRecord> {
        self.songs
            .iter()
            .filter(|s| s.file_type.eq_ignore_ascii_case(file_type))
            .collect()
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            total_songs: self.songs.len(),
            total_bytes: self.songs.iter().map(|s| s.file_size).sum(),
            artist_count: self.artists().len(),
        }
    }
}

impl LibraryProvider for MusicLibrary {
    fn song_library(&self) -> &[SongRecord] {
        &self.songs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> MusicLibrary {
        MusicLibrary::from_songs(vec![
            SongRecord::new("Highway Star", "Deep Purple", "mp3", "m/1.mp3", 100),
            SongRecord::new("Fireball", "Deep Purple", "mp3", "m/2.mp3", 200),
            SongRecord::new("Crazy Train", "Ozzy Osbourne", "mp3", "m/3.mp3", 300),
            SongRecord::new("Domination", "Pantera", "flac", "m/4.flac", 400),
        ])
    }

    #[test]
    fn test_search_matches_title_and_artist() {
        let lib = library();
        assert_eq!(lib.search("deep").len(), 2);
        assert_eq!(lib.search("TRAIN").len(), 1);
        assert!(lib.search("zeppelin").is_empty());
    }

    #[test]
    fn test_artists_sorted_and_deduped() {
        let lib = library();
        assert_eq!(lib.artists(), vec!["Deep Purple", "Ozzy Osbourne", "Pantera"]);
    }

    #[test]
    fn test_reports_by_artist_and_file_type() {
        let lib = library();
        assert_eq!(lib.songs_by_artist("deep purple").len(), 2);
        assert_eq!(lib.songs_by_file_type("flac").len(), 1);
        assert_eq!(lib.songs_by_file_type("wav").len(), 0);
    }

    #[test]
    fn test_stats_totals() {
        let stats = library().stats();
        assert_eq!(
            stats,
            LibraryStats {
                total_songs: 4,
                total_bytes: 1000,
                artist_count: 3,
            }
        );
    }

    #[test]
    fn test_snapshot_is_readable_through_provider() {
        let lib = library();
        let provider: &dyn LibraryProvider = &lib;
        assert_eq!(provider.song_library().len(), 4);
    }
}
