//! Setup step: create the output directory trees.

use std::fs;

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};

/// Creates the MP3 and FLAC output directories if absent.
pub struct SetupStep;

impl PipelineStep for SetupStep {
    fn name(&self) -> &str {
        "Setup"
    }

    fn execute(&self, ctx: &Context, _state: &mut RunState) -> StepResult<()> {
        for dir in [&ctx.mp3_dir, &ctx.flac_dir] {
            if !dir.exists() {
                tracing::info!("Creating {}", dir.display());
            }
            fs::create_dir_all(dir)
                .map_err(|e| StepError::io_error(format!("creating {}", dir.display()), e))?;
        }
        Ok(())
    }
}
