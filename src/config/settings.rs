//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field carries a serde default so a partial config file loads
//! cleanly.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Output and template paths.
    #[serde(default)]
    pub paths: PathSettings,

    /// Encoder command lines and behavior.
    #[serde(default)]
    pub encoders: EncoderSettings,

    /// Release-group identity.
    #[serde(default)]
    pub release: ReleaseSettings,

    /// Worker pool sizing.
    #[serde(default)]
    pub workers: WorkerSettings,
}

/// Base directories for output trees and the report template path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Base directory receiving one scenified subdirectory per release
    /// (MP3 files and all `00-` artifacts).
    #[serde(default = "default_mp3_release_dir")]
    pub mp3_release_dir: String,

    /// Base directory receiving one human-readable subdirectory per
    /// release (FLAC files).
    #[serde(default = "default_flac_release_dir")]
    pub flac_release_dir: String,

    /// Path to the NFO report template.
    #[serde(default = "default_nfo_template")]
    pub nfo_template: String,
}

fn default_mp3_release_dir() -> String {
    "releases/mp3".to_string()
}

fn default_flac_release_dir() -> String {
    "releases/flac".to_string()
}

fn default_nfo_template() -> String {
    "templates/release.nfo".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            mp3_release_dir: default_mp3_release_dir(),
            flac_release_dir: default_flac_release_dir(),
            nfo_template: default_nfo_template(),
        }
    }
}

/// Encoder command templates and failure policy.
///
/// Command templates are shell command lines containing `$name$`
/// placeholders: `$input$`, `$output$`, `$title$`, `$artist$`,
/// `$album$`, `$year$`, `$comment$`, `$trackNumber$`, `$genre$`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderSettings {
    #[serde(default = "default_mp3_command")]
    pub mp3_command: String,

    #[serde(default = "default_flac_command")]
    pub flac_command: String,

    /// Encoder name shown in the report.
    #[serde(default = "default_mp3_encoder_name")]
    pub mp3_encoder_name: String,

    /// Treat a nonzero encoder exit code as a fatal error. When false,
    /// failures are only logged and surface downstream as a missing
    /// checksum for the affected track.
    #[serde(default = "default_true")]
    pub strict_exit_codes: bool,
}

fn default_mp3_command() -> String {
    "lame -b 320 --tt \"$title$\" --ta \"$artist$\" --tl \"$album$\" --ty \"$year$\" \
     --tc \"$comment$\" --tn \"$trackNumber$\" --tg \"$genre$\" \"$input$\" \"$output$\""
        .to_string()
}

fn default_flac_command() -> String {
    "flac --best -T TITLE=\"$title$\" -T ARTIST=\"$artist$\" -T ALBUM=\"$album$\" \
     -T DATE=\"$year$\" -T TRACKNUMBER=\"$trackNumber$\" -T GENRE=\"$genre$\" \
     -o \"$output$\" \"$input$\""
        .to_string()
}

fn default_mp3_encoder_name() -> String {
    "LAME 3.100 CBR 320".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            mp3_command: default_mp3_command(),
            flac_command: default_flac_command(),
            mp3_encoder_name: default_mp3_encoder_name(),
            strict_exit_codes: true,
        }
    }
}

/// Release-group identity baked into filenames and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseSettings {
    /// Group initials appended to MP3 filenames and the base release
    /// identifier, and written into the encoder comment tag.
    #[serde(default = "default_group_initials")]
    pub group_initials: String,
}

fn default_group_initials() -> String {
    "GRP".to_string()
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        Self {
            group_initials: default_group_initials(),
        }
    }
}

/// Worker pool sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSettings {
    /// Number of concurrent encode workers.
    #[serde(default = "default_worker_count")]
    pub count: usize,
}

fn default_worker_count() -> usize {
    4
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            count: default_worker_count(),
        }
    }
}
