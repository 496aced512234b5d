use regex::Regex;

/// Title and artist recovered from a file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    pub title: String,
    pub artist: String,
}

/// Parses song file names into artist/title pairs.
///
/// The library naming convention is "Artist - Title.ext"; ripped files often
/// carry a leading track number ("07 - Artist - Title.ext"), so that pattern
/// is tried first.
pub struct FilenameParser {
    numbered: Regex,
    artist_title: Regex,
}

impl FilenameParser {
    pub fn new() -> Self {
        Self {
            // "07 - Artist - Title"
            numbered: Regex::new(r"^\d{1,3}[\s.\-]+(.+?)\s+-\s+(.+)$").unwrap(),
            // "Artist - Title"
            artist_title: Regex::new(r"^(.+?)\s+-\s+(.+)$").unwrap(),
        }
    }

    /// Parse a file stem (no extension). Falls back to the whole stem as the
    /// title with an unknown artist when no pattern fits.
    pub fn parse_stem(&self, stem: &str) -> ParsedName {
        let stem = stem.trim();

        if let Some(caps) = self.numbered.captures(stem) {
            return ParsedName {
                artist: caps[1].trim().to_string(),
                title: caps[2].trim().to_string(),
            };
        }

        if let Some(caps) = self.artist_title.captures(stem) {
            return ParsedName {
                artist: caps[1].trim().to_string(),
                title: caps[2].trim().to_string(),
            };
        }

        ParsedName {
            title: stem.to_string(),
            artist: "Unknown Artist".to_string(),
        }
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}
