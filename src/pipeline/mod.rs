//! Release pipeline: sequencing, steps, and error types.
//!
//! A run packages exactly one release. Steps execute in fixed order:
//! Setup → CoverCopy → CreateJobs → Playlist → Encode → Checksums →
//! Report. Only the Encode step is concurrent; it finishes completely
//! (join barrier) before the checksum manifest or report is touched.

pub mod errors;
pub mod runner;
pub mod steps;
pub mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use runner::{Pipeline, PipelineStep, RunReport};
pub use types::{Context, RunState};

use crate::config::Settings;
use crate::models::Release;

/// Build the standard seven-step release pipeline.
pub fn create_release_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(steps::SetupStep)
        .with_step(steps::CoverCopyStep)
        .with_step(steps::CreateJobsStep)
        .with_step(steps::PlaylistStep)
        .with_step(steps::EncodeStep)
        .with_step(steps::ChecksumsStep)
        .with_step(steps::ReportStep::new())
}

/// Package one release: derive paths, run all steps, report timing.
///
/// This is the crate's single entry operation.
pub fn process_release(release: Release, settings: Settings) -> PipelineResult<RunReport> {
    let ctx = Context::new(release, settings);
    let mut state = RunState::default();
    create_release_pipeline().run(&ctx, &mut state)
}
