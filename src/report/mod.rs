//! Release report (NFO) generation.
//!
//! The pipeline assembles a structured [`ReportFields`] record (track
//! durations read back from the encoded MP3 files) and hands it to a
//! [`ReportRenderer`]. The bundled renderer, [`NfoTemplate`], fills
//! `$field$` placeholders in a text template; its syntax is its own
//! business and nothing in the pipeline depends on it.

use std::fs;
use std::path::Path;

use lofty::prelude::AudioFile;
use lofty::probe::Probe;

use crate::command::fill_template;
use crate::pipeline::errors::{StepError, StepResult};

/// One row of the report's track table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    /// Zero-padded track number, e.g. `"03"`.
    pub number: String,
    pub title: String,
    /// `MM:SS`.
    pub duration: String,
}

/// Structured field set handed to the report renderer.
#[derive(Debug, Clone)]
pub struct ReportFields {
    pub artist: String,
    pub release: String,
    pub genre: String,
    pub label: String,
    /// `YYYY-MM-DD`.
    pub retail_date: String,
    /// `YYYY-MM-DD`.
    pub release_date: String,
    /// Display name of the MP3 encoder.
    pub encoder: String,
    pub notes: String,
    pub tracks: Vec<TrackRow>,
    /// Sum of all track durations, `MM:SS`.
    pub total_time: String,
}

/// Renders a report to disk from a field set.
pub trait ReportRenderer: Send + Sync {
    fn write_report(&self, output: &Path, fields: &ReportFields) -> StepResult<()>;
}

/// `$field$`-substituting text template loaded from a file.
///
/// Recognized placeholders: `$artist$`, `$release$`, `$genre$`,
/// `$label$`, `$retail_date$`, `$release_date$`, `$encoder$`,
/// `$notes$`, `$total_time$` and `$tracks$` (expands to one line per
/// track). Unrecognized placeholders pass through untouched.
#[derive(Debug)]
pub struct NfoTemplate {
    template: String,
}

impl NfoTemplate {
    /// Load the template file.
    pub fn from_file(path: &Path) -> StepResult<Self> {
        let template = fs::read_to_string(path)
            .map_err(|e| StepError::io_error(format!("reading template {}", path.display()), e))?;
        Ok(Self { template })
    }

    #[cfg(test)]
    fn from_string(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    fn render(&self, fields: &ReportFields) -> String {
        let track_table = fields
            .tracks
            .iter()
            .map(|row| format!("{}. {} [{}]", row.number, row.title, row.duration))
            .collect::<Vec<_>>()
            .join("\r\n");

        fill_template(
            &self.template,
            &[
                ("artist", fields.artist.as_str()),
                ("release", fields.release.as_str()),
                ("genre", fields.genre.as_str()),
                ("label", fields.label.as_str()),
                ("retail_date", fields.retail_date.as_str()),
                ("release_date", fields.release_date.as_str()),
                ("encoder", fields.encoder.as_str()),
                ("notes", fields.notes.as_str()),
                ("total_time", fields.total_time.as_str()),
                ("tracks", track_table.as_str()),
            ],
        )
    }
}

impl ReportRenderer for NfoTemplate {
    fn write_report(&self, output: &Path, fields: &ReportFields) -> StepResult<()> {
        let rendered = self.render(fields);
        fs::write(output, rendered)
            .map_err(|e| StepError::io_error(format!("writing {}", output.display()), e))?;
        Ok(())
    }
}

/// Duration of an encoded MP3 file, in whole seconds (rounded).
pub fn mp3_duration_seconds(path: &Path) -> StepResult<u64> {
    let tagged = Probe::open(path)
        .map_err(|e| StepError::metadata(path.display().to_string(), e.to_string()))?
        .read()
        .map_err(|e| StepError::metadata(path.display().to_string(), e.to_string()))?;

    let duration = tagged.properties().duration();
    Ok((duration.as_millis() as f64 / 1000.0).round() as u64)
}
