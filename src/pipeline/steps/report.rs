//! Report (NFO) generation step.

use std::path::Path;

use crate::naming;
use crate::pipeline::errors::StepResult;
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};
use crate::report::{mp3_duration_seconds, NfoTemplate, ReportFields, ReportRenderer, TrackRow};

/// Assembles the report fields and hands them to the renderer.
///
/// Track data is recomputed from scratch: numbers are re-derived from
/// release order and durations are read back from the MP3 files the
/// encode step produced. By default the renderer is an [`NfoTemplate`]
/// loaded from the configured template path.
pub struct ReportStep {
    renderer: Option<Box<dyn ReportRenderer>>,
}

impl ReportStep {
    pub fn new() -> Self {
        Self { renderer: None }
    }

    /// Use a specific renderer instead of the configured NFO template.
    pub fn with_renderer(renderer: Box<dyn ReportRenderer>) -> Self {
        Self {
            renderer: Some(renderer),
        }
    }
}

impl Default for ReportStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ReportStep {
    fn name(&self) -> &str {
        "Report"
    }

    fn execute(&self, ctx: &Context, _state: &mut RunState) -> StepResult<()> {
        let mut rows = Vec::with_capacity(ctx.release.tracks.len());
        let mut total_seconds = 0u64;

        for (number, track) in ctx.release.numbered_tracks() {
            let filename =
                naming::mp3_filename(number, &track.artist, &track.title, ctx.group_initials());
            let seconds = mp3_duration_seconds(&ctx.mp3_dir.join(&filename))?;
            total_seconds += seconds;

            rows.push(TrackRow {
                number: naming::track_number_str(number),
                title: track.title.clone(),
                duration: naming::duration_str(seconds),
            });
        }

        let fields = ReportFields {
            artist: ctx.release.artist.clone(),
            release: ctx.release.title.clone(),
            genre: ctx.release.genre.clone(),
            label: ctx.release.label.clone(),
            retail_date: naming::date_str(ctx.release.retail_date),
            release_date: naming::date_str(ctx.release.release_date),
            encoder: ctx.settings.encoders.mp3_encoder_name.clone(),
            notes: ctx.release.notes.clone(),
            tracks: rows,
            total_time: naming::duration_str(total_seconds),
        };

        let output = ctx.zero_artifact_path("nfo");
        let template;
        let renderer: &dyn ReportRenderer = match &self.renderer {
            Some(custom) => custom.as_ref(),
            None => {
                template = NfoTemplate::from_file(Path::new(&ctx.settings.paths.nfo_template))?;
                &template
            }
        };
        renderer.write_report(&output, &fields)?;

        tracing::debug!("Wrote report to {}", output.display());
        Ok(())
    }
}
