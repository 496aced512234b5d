use super::filename::FilenameParser;
use super::song::SongRecord;
use super::AudioFormat;
use anyhow::Result;
use id3::TagLike;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

// Skip anything over 1GB - nothing in a song library should be that big
const MAX_FILE_SIZE: u64 = 1_000_000_000;

/// Walks music directories and turns audio files into song records.
/// Title/artist come from embedded tags where available, otherwise from the
/// "Artist - Title.ext" naming convention of the library.
pub struct LibraryScanner {
    parser: FilenameParser,
}

impl LibraryScanner {
    pub fn new() -> Self {
        Self {
            parser: FilenameParser::new(),
        }
    }

    pub fn scan_directory<P: AsRef<Path>>(&self, path: P) -> Result<Vec<SongRecord>> {
        let mut songs = Vec::new();

        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            // Skip hidden files (dotfiles)
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with('.'))
            {
                continue;
            }

            // Skip empty files and absurdly large ones
            let file_size = match fs::metadata(path) {
                Ok(meta) if meta.len() > 0 && meta.len() <= MAX_FILE_SIZE => meta.len(),
                Ok(_) => continue,
                Err(e) => {
                    warn!("Skipping unreadable file {}: {}", path.display(), e);
                    continue;
                }
            };

            if !self.is_supported_file(path) {
                continue;
            }

            match self.song_from_file(path, file_size) {
                Ok(song) => {
                    debug!("Found song: {}", song.display_label());
                    songs.push(song);
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        // Stable snapshot order regardless of filesystem iteration order
        songs.sort_by(|a, b| a.file_path.cmp(&b.file_path));

        info!("Scan found {} songs", songs.len());
        Ok(songs)
    }

    pub fn scan_directories(&self, paths: &[PathBuf]) -> Result<Vec<SongRecord>> {
        let mut all_songs = Vec::new();

        for path in paths {
            if path.exists() {
                let mut songs = self.scan_directory(path)?;
                all_songs.append(&mut songs);
            } else {
                warn!("Music directory does not exist: {}", path.display());
            }
        }

        Ok(all_songs)
    }

    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| AudioFormat::from_extension(ext).is_supported())
            .unwrap_or(false)
    }

    fn song_from_file(&self, path: &Path, file_size: u64) -> Result<SongRecord> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Unknown");
        let parsed = self.parser.parse_stem(stem);

        let (mut title, mut artist) = (parsed.title, parsed.artist);

        // Embedded tags win over the filename, but never with an empty value
        match AudioFormat::from_extension(&extension) {
            AudioFormat::Mp3 => {
                if let Ok(tag) = id3::Tag::read_from_path(path) {
                    if let Some(t) = tag.title().filter(|t| !t.trim().is_empty()) {
                        title = t.to_string();
                    }
                    if let Some(a) = tag.artist().filter(|a| !a.trim().is_empty()) {
                        artist = a.to_string();
                    }
                }
            }
            AudioFormat::Mp4 => {
                if let Ok(tag) = mp4ameta::Tag::read_from_path(path) {
                    if let Some(t) = tag.title().filter(|t| !t.trim().is_empty()) {
                        title = t.to_string();
                    }
                    if let Some(a) = tag.artist().filter(|a| !a.trim().is_empty()) {
                        artist = a.to_string();
                    }
                }
            }
            _ => {}
        }

        Ok(SongRecord::new(
            title,
            artist,
            extension,
            path.to_path_buf(),
            file_size,
        ))
    }
}

impl Default for LibraryScanner {
    fn default() -> Self {
        Self::new()
    }
}
