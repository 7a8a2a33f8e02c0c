//! Pipeline runner that executes steps in sequence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, StepOutcome};

/// Pipeline that runs a sequence of steps.
///
/// The pipeline executes steps in order, running validation before
/// and after each step. It handles cancellation and tracks which
/// steps were executed.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
    /// Cancellation flag.
    cancelled: Arc<AtomicBool>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the pipeline
    /// at the next step boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Check if the pipeline has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run the pipeline with the given context and state.
    ///
    /// Executes each step in order:
    /// 1. Check for cancellation
    /// 2. Run `validate_input`
    /// 3. Run `execute`
    /// 4. Run `validate_output` (if execute returned Success)
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult {
            steps_completed: Vec::new(),
            steps_skipped: Vec::new(),
        };

        let total_steps = self.steps.len();

        for (i, step) in self.steps.iter().enumerate() {
            if self.is_cancelled() {
                tracing::warn!("pipeline cancelled before step '{}'", step.name());
                return Err(PipelineError::cancelled(&ctx.job_name));
            }

            let step_name = step.name();
            let percent = ((i as f64 / total_steps as f64) * 100.0) as u32;
            ctx.report_progress(step_name, percent, &format!("Starting {}", step_name));
            tracing::info!(job = %ctx.job_name, step = step_name, "running step");

            if let Err(e) = step.validate_input(ctx, state) {
                tracing::error!("input validation failed: {}", e);
                return Err(PipelineError::step_failed(&ctx.job_name, step_name, e));
            }

            let outcome = step.execute(ctx, state).map_err(|e| {
                tracing::error!("execution failed: {}", e);
                PipelineError::step_failed(&ctx.job_name, step_name, e)
            })?;

            match outcome {
                StepOutcome::Success => {
                    if let Err(e) = step.validate_output(ctx, state) {
                        tracing::error!("output validation failed: {}", e);
                        return Err(PipelineError::step_failed(&ctx.job_name, step_name, e));
                    }
                    tracing::info!("{} completed", step_name);
                    result.steps_completed.push(step_name.to_string());
                }
                StepOutcome::Skipped(reason) => {
                    tracing::info!("{} skipped: {}", step_name, reason);
                    result.steps_skipped.push(step_name.to_string());
                }
            }
        }

        ctx.report_progress("Complete", 100, "Pipeline finished");
        tracing::info!(job = %ctx.job_name, "pipeline completed");

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for cancelling a running pipeline.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the pipeline at the next step boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
    /// Steps that were skipped.
    pub steps_skipped: Vec<String>,
}

impl PipelineRunResult {
    /// Check if all steps completed (none skipped).
    pub fn all_completed(&self) -> bool {
        self.steps_skipped.is_empty()
    }

    /// Total number of steps that ran.
    pub fn total_steps(&self) -> usize {
        self.steps_completed.len() + self.steps_skipped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::pipeline::errors::{StepError, StepResult};
    use crate::pipeline::paths::LessonPaths;
    use std::sync::atomic::AtomicUsize;

    fn test_context(dir: &std::path::Path) -> Context {
        let lesson = LessonPaths::discover(dir, "output").unwrap();
        Context::new(lesson, Settings::default())
    }

    struct CountingStep {
        name: &'static str,
        execute_count: Arc<AtomicUsize>,
    }

    impl PipelineStep for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            self.execute_count.fetch_add(1, Ordering::SeqCst);
            Ok(StepOutcome::Success)
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    struct FailingStep;

    impl PipelineStep for FailingStep {
        fn name(&self) -> &str {
            "Failing"
        }

        fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            Err(StepError::invalid_input("boom"))
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    #[test]
    fn pipeline_builds_correctly() {
        let pipeline = Pipeline::new()
            .with_step(CountingStep {
                name: "Step1",
                execute_count: Arc::new(AtomicUsize::new(0)),
            })
            .with_step(CountingStep {
                name: "Step2",
                execute_count: Arc::new(AtomicUsize::new(0)),
            });

        assert_eq!(pipeline.step_count(), 2);
        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn steps_run_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(CountingStep {
                name: "Step1",
                execute_count: Arc::clone(&count),
            })
            .with_step(CountingStep {
                name: "Step2",
                execute_count: Arc::clone(&count),
            });

        let ctx = test_context(tmp.path());
        let mut state = JobState::new();
        let result = pipeline.run(&ctx, &mut state).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(result.steps_completed, vec!["Step1", "Step2"]);
        assert!(result.all_completed());
    }

    #[test]
    fn failing_step_stops_the_pipeline() {
        let tmp = tempfile::tempdir().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().with_step(FailingStep).with_step(CountingStep {
            name: "Never",
            execute_count: Arc::clone(&count),
        });

        let ctx = test_context(tmp.path());
        let mut state = JobState::new();
        let err = pipeline.run(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, PipelineError::StepFailed { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_handle_works() {
        let pipeline = Pipeline::new();
        let handle = pipeline.cancel_handle();

        assert!(!pipeline.is_cancelled());
        handle.cancel();
        assert!(pipeline.is_cancelled());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn cancelled_pipeline_refuses_to_run_steps() {
        let tmp = tempfile::tempdir().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().with_step(CountingStep {
            name: "Step1",
            execute_count: Arc::clone(&count),
        });
        pipeline.cancel_handle().cancel();

        let ctx = test_context(tmp.path());
        let mut state = JobState::new();
        let err = pipeline.run(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, PipelineError::Cancelled { .. }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
