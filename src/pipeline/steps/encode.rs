//! Parallel encode step.

use crate::encode::encode_release;
use crate::pipeline::errors::StepResult;
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};

/// Runs the worker pool over the queued jobs.
///
/// Does not return until every worker has joined, so later steps can
/// rely on the hash store being complete.
pub struct EncodeStep;

impl PipelineStep for EncodeStep {
    fn name(&self) -> &str {
        "Encode"
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        state.hashes = encode_release(ctx, &state.jobs)?;
        tracing::info!("Encoded and hashed {} tracks", state.hashes.len());
        Ok(())
    }
}
