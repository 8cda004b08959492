//! Cover copy step.

use std::fs;

use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};

/// Copies the release cover into the MP3 directory as the `00-` jpg.
///
/// A missing cover image is fatal.
pub struct CoverCopyStep;

impl PipelineStep for CoverCopyStep {
    fn name(&self) -> &str {
        "CoverCopy"
    }

    fn execute(&self, ctx: &Context, _state: &mut RunState) -> StepResult<()> {
        let source = &ctx.release.cover_path;
        if !source.exists() {
            return Err(StepError::file_not_found(source.display().to_string()));
        }

        let destination = ctx.zero_artifact_path("jpg");
        fs::copy(source, &destination).map_err(|e| {
            StepError::io_error(
                format!("copying cover to {}", destination.display()),
                e,
            )
        })?;

        tracing::debug!("Copied cover to {}", destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::steps::SetupStep;
    use crate::pipeline::test_support::context_in_temp_dir;

    #[test]
    fn copies_cover_into_mp3_dir() {
        let (_dir, ctx) = context_in_temp_dir(1);
        let mut state = RunState::default();
        SetupStep.execute(&ctx, &mut state).unwrap();

        CoverCopyStep.execute(&ctx, &mut state).unwrap();

        let copied = ctx.zero_artifact_path("jpg");
        assert!(copied.exists());
        assert_eq!(fs::read(copied).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn missing_cover_is_fatal() {
        let (_dir, mut ctx) = context_in_temp_dir(1);
        let mut state = RunState::default();
        SetupStep.execute(&ctx, &mut state).unwrap();
        ctx.release.cover_path = ctx.release.cover_path.with_file_name("gone.jpg");

        let err = CoverCopyStep.execute(&ctx, &mut state).unwrap_err();
        assert!(matches!(err, StepError::FileNotFound { .. }));
    }
}
