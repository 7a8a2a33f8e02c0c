//! Pipeline step trait definition.
//!
//! All pipeline steps implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::StepResult;
use super::types::{Context, JobState, StepOutcome};

/// Trait for pipeline steps.
///
/// The pipeline runner calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced valid output
pub trait PipelineStep: Send + Sync {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    ///
    /// Should check that all required preconditions are met (files exist,
    /// previous steps completed, etc.).
    fn validate_input(&self, ctx: &Context, state: &JobState) -> StepResult<()>;

    /// Execute the step's main work.
    ///
    /// Records results in `state`. Returns `StepOutcome::Success` on
    /// completion, or `StepOutcome::Skipped` if the step determined it
    /// should be skipped (not an error).
    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<StepOutcome>;

    /// Validate outputs after execution.
    ///
    /// Called after `execute` returns `Success`.
    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStep {
        name: &'static str,
        should_skip: bool,
    }

    impl PipelineStep for MockStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut JobState) -> StepResult<StepOutcome> {
            if self.should_skip {
                Ok(StepOutcome::Skipped("Test skip".to_string()))
            } else {
                Ok(StepOutcome::Success)
            }
        }

        fn validate_output(&self, _ctx: &Context, _state: &JobState) -> StepResult<()> {
            Ok(())
        }
    }

    #[test]
    fn step_trait_object_works() {
        let step: Box<dyn PipelineStep> = Box::new(MockStep {
            name: "TestStep",
            should_skip: false,
        });

        assert_eq!(step.name(), "TestStep");
    }
}
