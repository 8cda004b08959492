//! Checksum manifest (SFV) step.

use std::fs;

use crate::naming;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::runner::PipelineStep;
use crate::pipeline::types::{Context, RunState};

/// Writes the `00-{base}.sfv` checksum manifest.
///
/// Iterates the release tracks in original order with freshly derived
/// numbers (the job queue was consumed by the encode step) and pairs
/// each MP3 filename with its recorded CRC32. A track without a hash
/// means its encode never completed; that is fatal here.
pub struct ChecksumsStep;

impl PipelineStep for ChecksumsStep {
    fn name(&self) -> &str {
        "Checksums"
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        let mut output = format!(";{}\r\n", ctx.base_name);
        for (number, track) in ctx.release.numbered_tracks() {
            let filename =
                naming::mp3_filename(number, &track.artist, &track.title, ctx.group_initials());
            let hash = state
                .hashes
                .get(&filename)
                .ok_or_else(|| StepError::missing_hash(&filename))?;
            output.push_str(&format!("{} {}\r\n", filename, hash));
        }

        let path = ctx.zero_artifact_path("sfv");
        fs::write(&path, output)
            .map_err(|e| StepError::io_error(format!("writing {}", path.display()), e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::steps::{CreateJobsStep, EncodeStep, SetupStep};
    use crate::pipeline::test_support::context_in_temp_dir;

    fn run_through_encode(track_count: usize) -> (tempfile::TempDir, Context, RunState) {
        let (dir, ctx) = context_in_temp_dir(track_count);
        let mut state = RunState::default();
        SetupStep.execute(&ctx, &mut state).unwrap();
        CreateJobsStep.execute(&ctx, &mut state).unwrap();
        EncodeStep.execute(&ctx, &mut state).unwrap();
        (dir, ctx, state)
    }

    #[test]
    fn manifest_has_header_plus_one_line_per_track() {
        let (_dir, ctx, mut state) = run_through_encode(3);

        ChecksumsStep.execute(&ctx, &mut state).unwrap();

        let content = fs::read_to_string(ctx.zero_artifact_path("sfv")).unwrap();
        let lines: Vec<&str> = content.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!(";{}", ctx.base_name));

        for line in &lines[1..] {
            let (filename, hash) = line.rsplit_once(' ').unwrap();
            assert!(filename.ends_with(".mp3"));
            assert_eq!(hash.len(), 8);
            assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn manifest_is_reproducible() {
        let (_dir, ctx, mut state) = run_through_encode(2);

        ChecksumsStep.execute(&ctx, &mut state).unwrap();
        let first = fs::read_to_string(ctx.zero_artifact_path("sfv")).unwrap();

        // Rehash the unchanged outputs and rewrite the manifest.
        EncodeStep.execute(&ctx, &mut state).unwrap();
        ChecksumsStep.execute(&ctx, &mut state).unwrap();
        let second = fs::read_to_string(ctx.zero_artifact_path("sfv")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_hash_is_fatal() {
        let (_dir, ctx, mut state) = run_through_encode(2);
        let some_key = state.hashes.keys().next().unwrap().clone();
        state.hashes.remove(&some_key);

        let err = ChecksumsStep.execute(&ctx, &mut state).unwrap_err();
        assert!(matches!(err, StepError::MissingHash { .. }));
    }
}
