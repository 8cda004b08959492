//! audio-releaser - packages finished recording sessions into
//! distributable releases.
//!
//! One run transcodes a release's lossless sources into MP3 and FLAC
//! trees via external encoder commands, verifies MP3 integrity with
//! CRC32, and emits the release-level artifacts: cover copy, playlist,
//! checksum manifest and text report.

pub mod command;
pub mod config;
pub mod encode;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod report;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
