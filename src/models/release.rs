//! Release and track records.
//!
//! A `Release` is immutable for the duration of one pipeline run. Track
//! numbers are not stored on `Track`: they are positional, derived from
//! the release order, and carried by `TrackJob` so the same logical
//! track can be renumbered in independent passes without mutation.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One audio work (album/EP) being packaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub artist: String,
    pub title: String,
    pub year: u16,
    pub genre: String,
    pub label: String,
    #[serde(default)]
    pub notes: String,
    /// Street date of the retail edition.
    pub retail_date: NaiveDate,
    /// Date this release is published.
    pub release_date: NaiveDate,
    /// Cover image copied into the MP3 tree as the `00-` jpg artifact.
    pub cover_path: PathBuf,
    pub tracks: Vec<Track>,
}

impl Release {
    /// Tracks paired with their dense 1-based position numbers.
    ///
    /// Both the job-creation pass and the checksum/report passes derive
    /// numbering through this, so the two passes always agree.
    pub fn numbered_tracks(&self) -> impl Iterator<Item = (u32, &Track)> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(index, track)| (index as u32 + 1, track))
    }
}

/// One audio item within a release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Path to the lossless source audio.
    pub source_path: PathBuf,
    pub artist: String,
    pub title: String,
}

/// A track queued for encoding, with its assigned position number.
#[derive(Debug, Clone)]
pub struct TrackJob {
    pub number: u32,
    pub track: Track,
}
