use crate::library::SongRecord;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Node {
    song: SongRecord,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A named, ordered playlist with a "now selected" cursor.
///
/// Backed by an arena of nodes addressed by stable indices rather than raw
/// pointers; head/tail/current are indices into the arena, so relinking
/// (remove, insert, shuffle) never moves a node. Freed slots go on a free
/// list and are reused by later inserts.
#[derive(Debug, Clone)]
pub struct Playlist {
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    current: Option<usize>,
    len: usize,
}

impl Playlist {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            name,
            description,
            created_at: now,
            modified_at: now,
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            current: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a song at the tail. The first song also becomes `current`.
    pub fn append(&mut self, song: SongRecord) {
        let idx = self.alloc(Node {
            song,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);

        if self.current.is_none() {
            self.current = Some(idx);
        }

        self.len += 1;
        self.touch();
        info!(
            "Added '{}' to playlist '{}'",
            self.nodes[idx].song.display_label(),
            self.name
        );
        self.assert_invariants();
    }

    /// Insert a song right after the first node whose title matches
    /// (case-insensitive). Returns false, with no mutation, when there is no
    /// match.
    pub fn insert_after(&mut self, target_title: &str, song: SongRecord) -> bool {
        let Some(target) = self.find_by_title(target_title) else {
            debug!("No '{}' in playlist '{}', nothing inserted", target_title, self.name);
            return false;
        };

        let after = self.nodes[target].next;
        let idx = self.alloc(Node {
            song,
            prev: Some(target),
            next: after,
        });

        self.nodes[target].next = Some(idx);
        match after {
            Some(after) => self.nodes[after].prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.len += 1;
        self.touch();
        info!(
            "Inserted '{}' after '{}' in playlist '{}'",
            self.nodes[idx].song.display_label(),
            target_title,
            self.name
        );
        self.assert_invariants();
        true
    }

    /// Remove the first node whose title matches (case-insensitive).
    ///
    /// If the removed node was `current`, the cursor moves to the next node,
    /// or to the previous one when nothing follows, or to nothing at all when
    /// the playlist ends up empty.
    pub fn remove(&mut self, title: &str) -> bool {
        let Some(idx) = self.find_by_title(title) else {
            debug!("No '{}' in playlist '{}', nothing removed", title, self.name);
            return false;
        };

        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);

        if self.current == Some(idx) {
            self.current = next.or(prev);
        }

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }

        self.release(idx);
        self.len -= 1;
        self.touch();
        info!("Removed '{}' from playlist '{}'", title, self.name);
        self.assert_invariants();
        true
    }

    /// Advance the cursor one song. No wrap: returns None at the tail or on
    /// an empty playlist, leaving the cursor where it was.
    pub fn next_song(&mut self) -> Option<&SongRecord> {
        let next = self.nodes[self.current?].next?;
        self.current = Some(next);
        Some(&self.nodes[next].song)
    }

    /// Step the cursor back one song. No wrap at the head.
    pub fn previous_song(&mut self) -> Option<&SongRecord> {
        let prev = self.nodes[self.current?].prev?;
        self.current = Some(prev);
        Some(&self.nodes[prev].song)
    }

    pub fn go_to_first_song(&mut self) {
        if self.head.is_some() {
            self.current = self.head;
        }
    }

    pub fn go_to_last_song(&mut self) {
        if self.tail.is_some() {
            self.current = self.tail;
        }
    }

    pub fn current_song(&self) -> Option<&SongRecord> {
        self.current.map(|idx| &self.nodes[idx].song)
    }

    /// First song whose title or artist contains the query, case-insensitive.
    pub fn search(&self, query: &str) -> Option<&SongRecord> {
        self.iter().find(|song| song.matches(query))
    }

    /// Randomly permute the playlist order. The set of songs and the song
    /// under the cursor are unchanged; only the links are rewired.
    pub fn shuffle(&mut self) {
        if self.len < 2 {
            return;
        }

        let mut order: Vec<usize> = self.indices().collect();
        order.shuffle(&mut rand::thread_rng());

        for (pos, &idx) in order.iter().enumerate() {
            self.nodes[idx].prev = if pos > 0 { Some(order[pos - 1]) } else { None };
            self.nodes[idx].next = order.get(pos + 1).copied();
        }
        self.head = order.first().copied();
        self.tail = order.last().copied();
        // `current` still points at the same arena slot, hence the same song.

        self.touch();
        info!("Shuffled playlist '{}' ({} songs)", self.name, self.len);
        self.assert_invariants();
    }

    /// Songs in playlist order.
    pub fn iter(&self) -> impl Iterator<Item = &SongRecord> {
        self.indices().map(|idx| &self.nodes[idx].song)
    }

    fn indices(&self) -> Indices<'_> {
        Indices {
            playlist: self,
            next: self.head,
        }
    }

    fn find_by_title(&self, title: &str) -> Option<usize> {
        self.indices()
            .find(|&idx| self.nodes[idx].song.title_matches(title))
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
        self.free.push(idx);
    }

    fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Structural self-check, compiled out of release builds. A failure here
    /// is a programming defect, never a user-visible condition.
    fn assert_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let forward: Vec<usize> = self.indices().collect();
        assert_eq!(forward.len(), self.len, "len out of sync with reachable nodes");

        if let Some(head) = self.head {
            assert!(self.nodes[head].prev.is_none(), "head has a prev link");
        }
        if let Some(tail) = self.tail {
            assert!(self.nodes[tail].next.is_none(), "tail has a next link");
        }
        assert_eq!(self.head.is_none(), self.len == 0);
        assert_eq!(self.tail.is_none(), self.len == 0);

        let mut back = Vec::with_capacity(self.len);
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            back.push(idx);
            cursor = self.nodes[idx].prev;
        }
        back.reverse();
        assert_eq!(forward, back, "forward and backward traversals disagree");

        if let Some(current) = self.current {
            assert!(forward.contains(&current), "cursor points at an unreachable node");
        } else {
            assert_eq!(self.len, 0, "cursor unset on a non-empty playlist");
        }
    }
}

struct Indices<'a> {
    playlist: &'a Playlist,
    next: Option<usize>,
}

impl Iterator for Indices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.next?;
        self.next = self.playlist.nodes[idx].next;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn song(title: &str) -> SongRecord {
        SongRecord::new(title, "Test Artist", "mp3", format!("m/{title}.mp3"), 1024)
    }

    fn playlist_with(titles: &[&str]) -> Playlist {
        let mut pl = Playlist::new("Test".to_string(), None);
        for t in titles {
            pl.append(song(t));
        }
        pl
    }

    fn titles(pl: &Playlist) -> Vec<String> {
        pl.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_append_grows_size_and_traversals_mirror() {
        let pl = playlist_with(&["A", "B", "C", "D"]);
        assert_eq!(pl.len(), 4);
        assert_eq!(titles(&pl), vec!["A", "B", "C", "D"]);

        // Backward walk from the tail must visit the same songs mirrored
        let mut back = Vec::new();
        let mut cursor = pl.tail;
        while let Some(idx) = cursor {
            back.push(pl.nodes[idx].song.title.clone());
            cursor = pl.nodes[idx].prev;
        }
        assert_eq!(back, vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_first_append_sets_cursor() {
        let mut pl = Playlist::new("Test".to_string(), None);
        assert!(pl.current_song().is_none());
        pl.append(song("A"));
        assert_eq!(pl.current_song().unwrap().title, "A");
        pl.append(song("B"));
        assert_eq!(pl.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_next_then_previous_restores_cursor() {
        let mut pl = playlist_with(&["A", "B", "C"]);
        pl.next_song();
        assert_eq!(pl.current_song().unwrap().title, "B");
        assert_eq!(pl.next_song().unwrap().title, "C");
        assert_eq!(pl.previous_song().unwrap().title, "B");
        assert_eq!(pl.current_song().unwrap().title, "B");
    }

    #[test]
    fn test_cursor_does_not_wrap() {
        let mut pl = playlist_with(&["A", "B"]);
        assert!(pl.previous_song().is_none(), "no wrap at head");
        assert_eq!(pl.current_song().unwrap().title, "A");

        pl.go_to_last_song();
        assert!(pl.next_song().is_none(), "no wrap at tail");
        assert_eq!(pl.current_song().unwrap().title, "B");

        let mut empty = Playlist::new("Empty".to_string(), None);
        assert!(empty.next_song().is_none());
        assert!(empty.previous_song().is_none());
    }

    #[test]
    fn test_go_to_first_and_last() {
        let mut pl = playlist_with(&["A", "B", "C"]);
        pl.go_to_last_song();
        assert_eq!(pl.current_song().unwrap().title, "C");
        pl.go_to_first_song();
        assert_eq!(pl.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_remove_current_advances_to_next() {
        let mut pl = playlist_with(&["A", "B", "C"]);
        pl.next_song(); // current = B
        assert!(pl.remove("B"));
        assert_eq!(pl.current_song().unwrap().title, "C");
        assert_eq!(titles(&pl), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_current_at_tail_falls_back_to_previous() {
        let mut pl = playlist_with(&["A", "B"]);
        pl.go_to_last_song();
        assert!(pl.remove("B"));
        assert_eq!(pl.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_remove_last_song_clears_cursor() {
        let mut pl = playlist_with(&["A"]);
        assert!(pl.remove("A"));
        assert!(pl.current_song().is_none());
        assert!(pl.is_empty());
    }

    #[test]
    fn test_remove_is_case_insensitive_and_reports_miss() {
        let mut pl = playlist_with(&["A", "B"]);
        assert!(pl.remove("a"));
        assert!(!pl.remove("Z"));
        assert_eq!(pl.len(), 1);
    }

    #[test]
    fn test_insert_after_links_in_the_middle_and_at_tail() {
        let mut pl = playlist_with(&["A", "C"]);
        assert!(pl.insert_after("A", song("B")));
        assert_eq!(titles(&pl), vec!["A", "B", "C"]);

        assert!(pl.insert_after("C", song("D")));
        assert_eq!(titles(&pl), vec!["A", "B", "C", "D"]);
        pl.go_to_last_song();
        assert_eq!(pl.current_song().unwrap().title, "D");
    }

    #[test]
    fn test_insert_after_missing_target_changes_nothing() {
        let mut pl = playlist_with(&["A"]);
        assert!(!pl.insert_after("Z", song("B")));
        assert_eq!(pl.len(), 1);
        assert_eq!(titles(&pl), vec!["A"]);
    }

    #[test]
    fn test_search_finds_first_match_or_none() {
        let mut pl = Playlist::new("Test".to_string(), None);
        pl.append(SongRecord::new("Highway Star", "Deep Purple", "mp3", "m/1.mp3", 1));
        pl.append(SongRecord::new("Crazy Train", "Ozzy Osbourne", "mp3", "m/2.mp3", 1));

        assert_eq!(pl.search("train").unwrap().title, "Crazy Train");
        assert_eq!(pl.search("PURPLE").unwrap().title, "Highway Star");
        assert!(pl.search("pantera").is_none());
    }

    #[test]
    fn test_shuffle_preserves_songs_and_current() {
        let mut pl = playlist_with(&["A", "B", "C", "D", "E"]);
        pl.next_song(); // current = B
        let before: HashSet<String> = titles(&pl).into_iter().collect();

        for _ in 0..10 {
            pl.shuffle();
            let after: HashSet<String> = titles(&pl).into_iter().collect();
            assert_eq!(before, after);
            assert_eq!(pl.len(), 5);
            assert_eq!(pl.current_song().unwrap().title, "B");
        }
    }

    #[test]
    fn test_shuffle_on_empty_and_singleton_is_a_no_op() {
        let mut empty = Playlist::new("Empty".to_string(), None);
        empty.shuffle();
        assert!(empty.current_song().is_none());

        let mut one = playlist_with(&["A"]);
        one.shuffle();
        assert_eq!(titles(&one), vec!["A"]);
        assert_eq!(one.current_song().unwrap().title, "A");
    }

    #[test]
    fn test_arena_slot_reuse_keeps_links_sound() {
        let mut pl = playlist_with(&["A", "B", "C"]);
        assert!(pl.remove("B"));
        pl.append(song("D"));
        pl.append(song("E"));
        assert_eq!(titles(&pl), vec!["A", "C", "D", "E"]);
        assert_eq!(pl.len(), 4);
    }
}
