//! Job creation step.

use crate::models::TrackJob;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};

/// Verifies every lossless source exists and numbers the tracks.
///
/// All sources are checked before any job is queued, so a missing file
/// aborts the run with no partial queue and before any encoder has been
/// invoked. Numbers are a dense 1..N sequence in release order.
pub struct CreateJobsStep;

impl PipelineStep for CreateJobsStep {
    fn name(&self) -> &str {
        "CreateJobs"
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        for track in &ctx.release.tracks {
            if !track.source_path.exists() {
                return Err(StepError::file_not_found(
                    track.source_path.display().to_string(),
                ));
            }
        }

        state.jobs = ctx
            .release
            .numbered_tracks()
            .map(|(number, track)| TrackJob {
                number,
                track: track.clone(),
            })
            .collect();

        tracing::info!("Queued {} tracks for encoding", state.jobs.len());
        Ok(())
    }
}
