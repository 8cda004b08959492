//! Core types for the release pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Settings;
use crate::models::{Release, TrackJob};
use crate::naming;

/// Read-only context passed to pipeline steps.
///
/// Holds the release, the settings, and the paths derived from them.
/// Mutable state accumulated across steps goes in [`RunState`].
pub struct Context {
    /// The release being packaged.
    pub release: Release,
    /// Application settings.
    pub settings: Settings,
    /// Scenified base release identifier (seeds all `00-` artifacts).
    pub base_name: String,
    /// Directory receiving MP3 files and release-level artifacts.
    pub mp3_dir: PathBuf,
    /// Directory receiving FLAC files.
    pub flac_dir: PathBuf,
}

impl Context {
    /// Derive base identifier and output directories for a release.
    ///
    /// Pure derivation; nothing is created on disk until the Setup step
    /// runs.
    pub fn new(release: Release, settings: Settings) -> Self {
        let base_name = naming::base_release_name(
            &release.artist,
            &release.title,
            release.year,
            &settings.release.group_initials,
        );
        let mp3_dir = PathBuf::from(&settings.paths.mp3_release_dir).join(&base_name);
        let flac_dir = PathBuf::from(&settings.paths.flac_release_dir).join(
            naming::flac_dir_name(&release.artist, &release.title, release.year),
        );

        Self {
            release,
            settings,
            base_name,
            mp3_dir,
            flac_dir,
        }
    }

    /// Path of a release-level artifact (`00-{base}.{ext}`) in the MP3
    /// directory.
    pub fn zero_artifact_path(&self, extension: &str) -> PathBuf {
        self.mp3_dir
            .join(naming::zero_filename(&self.base_name, extension))
    }

    /// Group initials from settings.
    pub fn group_initials(&self) -> &str {
        &self.settings.release.group_initials
    }
}

/// Mutable state that accumulates results from pipeline steps.
///
/// Steps add new data; nothing is overwritten. The encode step's hash
/// map is only populated after every worker has joined.
#[derive(Debug, Default)]
pub struct RunState {
    /// Encode jobs in release order (created by the CreateJobs step).
    pub jobs: Vec<TrackJob>,
    /// MP3 filename → 8-hex-digit lowercase CRC32, one entry per track
    /// once the encode step completes.
    pub hashes: HashMap<String, String>,
}
