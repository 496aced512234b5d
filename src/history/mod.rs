// Listening history - a capped, most-recent-first log of played songs.
// Not a real stack: nothing pops except capacity eviction at the old end.

use crate::error::EngineError;
use crate::library::SongRecord;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub song: SongRecord,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ListeningHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ListeningHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, EngineError> {
        if capacity == 0 {
            return Err(EngineError::InvalidArgument(
                "history capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Record a play at the front. Once full, the oldest entry falls off the
    /// back.
    pub fn record_play(&mut self, song: SongRecord) {
        debug!("History: played '{}'", song.display_label());
        self.entries.push_front(HistoryEntry {
            song,
            played_at: Utc::now(),
        });
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                debug!("History: evicted '{}'", evicted.song.display_label());
            }
        }
    }

    /// Most-recent-first, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(limit)
    }

    /// Everything still retained, most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// All retained songs whose title or artist contains the query,
    /// case-insensitive, most-recent-first.
    pub fn search(&self, query: &str) -> Vec<&SongRecord> {
        self.entries
            .iter()
            .map(|e| &e.song)
            .filter(|s| s.matches(query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ListeningHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str) -> SongRecord {
        SongRecord::new(title, "Artist", "mp3", format!("m/{title}.mp3"), 1)
    }

    fn recent_titles(history: &ListeningHistory, limit: usize) -> Vec<String> {
        history.recent(limit).map(|e| e.song.title.clone()).collect()
    }

    #[test]
    fn test_capacity_eviction_drops_oldest() {
        let mut history = ListeningHistory::with_capacity(3).unwrap();
        for title in ["P1", "P2", "P3", "P4"] {
            history.record_play(song(title));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(recent_titles(&history, 10), vec!["P4", "P3", "P2"]);
        assert!(history.search("P1").is_empty(), "evicted song is gone");
    }

    #[test]
    fn test_recent_respects_limit() {
        let mut history = ListeningHistory::new();
        for title in ["A", "B", "C"] {
            history.record_play(song(title));
        }
        assert_eq!(recent_titles(&history, 2), vec!["C", "B"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_finds_all_matches() {
        let mut history = ListeningHistory::new();
        history.record_play(SongRecord::new("Highway Star", "Deep Purple", "mp3", "m/1.mp3", 1));
        history.record_play(SongRecord::new("Fireball", "Deep Purple", "mp3", "m/2.mp3", 1));
        history.record_play(SongRecord::new("Crazy Train", "Ozzy Osbourne", "mp3", "m/3.mp3", 1));

        let matches = history.search("deep purple");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].title, "Fireball"); // most recent first
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(
            ListeningHistory::with_capacity(0),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_repeat_plays_are_logged_separately() {
        let mut history = ListeningHistory::new();
        history.record_play(song("A"));
        history.record_play(song("A"));
        assert_eq!(history.len(), 2);
    }
}
