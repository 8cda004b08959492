//! Sequential pipeline runner.
//!
//! Steps run in fixed order; the first failure aborts the run with the
//! release and step name attached. There is no retry, rollback, or
//! partial-success handling: whatever a failed run wrote stays on disk.

use std::time::{Duration, Instant};

use super::errors::{PipelineError, PipelineResult, StepResult};
use super::types::{Context, RunState};

/// One phase of the release pipeline.
pub trait PipelineStep: Send + Sync {
    /// Step name, used in logs and error context.
    fn name(&self) -> &str;

    /// Perform the step's work, recording results in `state`.
    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()>;
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Total wall-clock time for the whole run.
    pub elapsed: Duration,
    /// Names of the steps that ran, in order.
    pub steps_completed: Vec<String>,
}

/// Pipeline that runs a sequence of steps against one release.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Run every step in order against the given context and state.
    ///
    /// Total elapsed wall-clock time is measured across all steps and
    /// reported on completion.
    pub fn run(&self, ctx: &Context, state: &mut RunState) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let mut steps_completed = Vec::with_capacity(self.steps.len());

        for (i, step) in self.steps.iter().enumerate() {
            let step_name = step.name();
            tracing::info!("[{}/{}] {}", i + 1, self.steps.len(), step_name);

            step.execute(ctx, state).map_err(|e| {
                tracing::error!("{} failed: {}", step_name, e);
                PipelineError::step_failed(&ctx.base_name, step_name, e)
            })?;

            steps_completed.push(step_name.to_string());
        }

        let elapsed = started.elapsed();
        tracing::info!("Release packaged in {:.2} s", elapsed.as_secs_f64());

        Ok(RunReport {
            elapsed,
            steps_completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Release, Track};
    use crate::pipeline::errors::StepError;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct RecordingStep {
        name: &'static str,
        order: Arc<AtomicUsize>,
        seen_at: Arc<AtomicUsize>,
        fail: bool,
    }

    impl PipelineStep for RecordingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn execute(&self, _ctx: &Context, _state: &mut RunState) -> StepResult<()> {
            self.seen_at
                .store(self.order.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
            if self.fail {
                return Err(StepError::file_not_found("missing.wav"));
            }
            Ok(())
        }
    }

    fn empty_context() -> Context {
        let release = Release {
            artist: "a".into(),
            title: "b".into(),
            year: 2024,
            genre: "g".into(),
            label: "l".into(),
            notes: String::new(),
            retail_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            cover_path: PathBuf::from("c.jpg"),
            tracks: vec![Track {
                source_path: PathBuf::from("t.wav"),
                artist: "a".into(),
                title: "t".into(),
            }],
        };
        Context::new(release, Settings::default())
    }

    #[test]
    fn steps_run_in_order() {
        let order = Arc::new(AtomicUsize::new(0));
        let first_at = Arc::new(AtomicUsize::new(99));
        let second_at = Arc::new(AtomicUsize::new(99));

        let pipeline = Pipeline::new()
            .with_step(RecordingStep {
                name: "First",
                order: Arc::clone(&order),
                seen_at: Arc::clone(&first_at),
                fail: false,
            })
            .with_step(RecordingStep {
                name: "Second",
                order: Arc::clone(&order),
                seen_at: Arc::clone(&second_at),
                fail: false,
            });

        let ctx = empty_context();
        let mut state = RunState::default();
        let report = pipeline.run(&ctx, &mut state).unwrap();

        assert_eq!(report.steps_completed, vec!["First", "Second"]);
        assert!(first_at.load(Ordering::SeqCst) < second_at.load(Ordering::SeqCst));
    }

    #[test]
    fn failure_aborts_remaining_steps() {
        let order = Arc::new(AtomicUsize::new(0));
        let late_at = Arc::new(AtomicUsize::new(usize::MAX));

        let pipeline = Pipeline::new()
            .with_step(RecordingStep {
                name: "Failing",
                order: Arc::clone(&order),
                seen_at: Arc::new(AtomicUsize::new(0)),
                fail: true,
            })
            .with_step(RecordingStep {
                name: "Never",
                order: Arc::clone(&order),
                seen_at: Arc::clone(&late_at),
                fail: false,
            });

        let ctx = empty_context();
        let mut state = RunState::default();
        let err = pipeline.run(&ctx, &mut state).unwrap_err();

        assert!(err.to_string().contains("Failing"));
        assert_eq!(late_at.load(Ordering::SeqCst), usize::MAX);
    }
}
