use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One song in the library. Immutable once it lands in a playlist, queue or
/// the listening history; containers clone it rather than mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub file_type: String, // lowercase extension, no leading dot
    pub file_path: PathBuf,
    pub file_size: u64,
}

impl SongRecord {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        file_type: impl Into<String>,
        file_path: impl Into<PathBuf>,
        file_size: u64,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            file_type: file_type.into(),
            file_path: file_path.into(),
            file_size,
        }
    }

    /// Identity for search and removal: (title, artist), case-insensitive.
    pub fn same_song(&self, other: &SongRecord) -> bool {
        self.title.eq_ignore_ascii_case(&other.title)
            && self.artist.eq_ignore_ascii_case(&other.artist)
    }

    pub fn title_matches(&self, title: &str) -> bool {
        self.title.eq_ignore_ascii_case(title)
    }

    /// Case-insensitive substring match over title and artist.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.artist.to_lowercase().contains(&query)
    }

    pub fn display_label(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, artist: &str) -> SongRecord {
        SongRecord::new(title, artist, "mp3", format!("music/{artist} - {title}.mp3"), 1024)
    }

    #[test]
    fn test_same_song_is_case_insensitive() {
        let a = song("Highway Star", "Deep Purple");
        let b = song("highway star", "DEEP PURPLE");
        assert!(a.same_song(&b));

        let c = song("Highway Star", "Ozzy Osbourne");
        assert!(!a.same_song(&c));
    }

    #[test]
    fn test_matches_substring_over_title_and_artist() {
        let s = song("Crazy Train", "Ozzy Osbourne");
        assert!(s.matches("crazy"));
        assert!(s.matches("OSBOURNE"));
        assert!(s.matches("zy tr"));
        assert!(!s.matches("purple"));
    }

    #[test]
    fn test_display_label() {
        let s = song("Fireball", "Deep Purple");
        assert_eq!(s.display_label(), "Fireball - Deep Purple");
    }
}
