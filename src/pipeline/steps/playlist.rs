//! Playlist generation step.

use std::fs;

use crate::naming;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};

/// Writes the `00-{base}.m3u` playlist.
///
/// A `;{base}` header comment line followed by one MP3 filename per job,
/// CRLF line endings throughout.
pub struct PlaylistStep;

impl PipelineStep for PlaylistStep {
    fn name(&self) -> &str {
        "Playlist"
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        let mut output = format!(";{}\r\n", ctx.base_name);
        for job in &state.jobs {
            let filename = naming::mp3_filename(
                job.number,
                &job.track.artist,
                &job.track.title,
                ctx.group_initials(),
            );
            output.push_str(&filename);
            output.push_str("\r\n");
        }

        let path = ctx.zero_artifact_path("m3u");
        fs::write(&path, output)
            .map_err(|e| StepError::io_error(format!("writing {}", path.display()), e))?;

        Ok(())
    }
}
