use std::{fs, path::Path};

use tracing::{info, warn};

use super::track::Track;
use crate::error::JukeResult;

/// Fixed, ordered list of tracks scanned once from a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Loads every regular file in `dir` whose extension is in `extensions` (case-insensitive).
    ///
    /// The folder is not walked recursively. A missing folder yields an empty playlist.
    pub fn load(dir: impl AsRef<Path>, extensions: &[String]) -> JukeResult<Self> {
        let dir = dir.as_ref();

        if !dir.is_dir() {
            warn!("Music folder {} does not exist, starting with an empty playlist", dir.display());
            return Ok(Self::default());
        }

        let mut tracks = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if !path.is_file() {
                continue;
            }

            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
                .unwrap_or(false);

            if matches {
                tracks.push(Track::new(path));
            }
        }

        tracks.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

        info!("Loaded {} tracks from {}", tracks.len(), dir.display());

        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `index`, wrapping to the start. `None` when empty.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            len => Some((index + 1) % len),
        }
    }

    /// Index before `index`, wrapping to the end. `None` when empty.
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        match self.len() {
            0 => None,
            len => Some((index % len + len - 1) % len),
        }
    }
}
