use crate::library::SongRecord;
use std::cmp::Ordering;
use tracing::{debug, info};

/// One song waiting in the party queue, with its running vote count and the
/// order it arrived in.
#[derive(Debug, Clone)]
pub struct PartyEntry {
    pub song: SongRecord,
    pub votes: u32,
    arrival: u64,
}

impl PartyEntry {
    /// Highest votes first; between equal votes, the earlier arrival wins.
    fn priority_cmp(&self, other: &PartyEntry) -> Ordering {
        other
            .votes
            .cmp(&self.votes)
            .then(self.arrival.cmp(&other.arrival))
    }
}

/// Vote-ordered queue for party mode. Guests add songs, everyone upvotes,
/// the highest-voted song plays next. Ordering is deterministic even as
/// votes move: votes descending, arrival ascending.
///
/// Kept as a sorted vec and re-sorted on every vote change - party queues
/// are small enough that a fancier priority structure buys nothing.
#[derive(Debug, Default)]
pub struct PartyQueue {
    entries: Vec<PartyEntry>,
    next_arrival: u64,
}

impl PartyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, song: SongRecord, initial_votes: u32) {
        info!(
            "Added '{}' to party queue with {} votes",
            song.display_label(),
            initial_votes
        );
        let entry = PartyEntry {
            song,
            votes: initial_votes,
            arrival: self.next_arrival,
        };
        self.next_arrival += 1;
        self.entries.push(entry);
        self.reorder();
    }

    /// Upvote the first entry, in current priority order, whose title matches
    /// (case-insensitive). Returns the new vote count, or None when no entry
    /// matches.
    pub fn upvote(&mut self, title: &str) -> Option<u32> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.song.title_matches(title))?;
        entry.votes += 1;
        let votes = entry.votes;
        let label = entry.song.display_label();
        self.reorder();
        info!("Upvoted '{}' to {} votes", label, votes);
        Some(votes)
    }

    /// Remove and return the entry with the most votes (earliest arrival on
    /// a tie).
    pub fn dequeue_highest(&mut self) -> Option<PartyEntry> {
        if self.entries.is_empty() {
            debug!("Party queue is empty");
            return None;
        }
        let entry = self.entries.remove(0);
        debug!(
            "Dequeued '{}' from party queue ({} votes)",
            entry.song.display_label(),
            entry.votes
        );
        Some(entry)
    }

    /// Entries in play order.
    pub fn iter(&self) -> impl Iterator<Item = &PartyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        info!("Cleared party queue ({} songs)", self.entries.len());
        self.entries.clear();
    }

    fn reorder(&mut self) {
        self.entries.sort_by(PartyEntry::priority_cmp);
    }
}
