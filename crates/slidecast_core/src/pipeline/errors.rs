//! Error types for the lesson pipeline.
//!
//! Errors carry context that chains through layers:
//! Job -> Step -> Operation -> Detail

use std::io;

use thiserror::Error;

use crate::render::RenderError;
use crate::timeline::{AssemblyError, DiscoveryError};

/// Top-level pipeline error with job context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Job '{job_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Pipeline was cancelled.
    #[error("Job '{job_name}' was cancelled")]
    Cancelled { job_name: String },

    /// Failed to set up job (create directories, etc.).
    #[error("Job '{job_name}' setup failed: {message}")]
    SetupFailed { job_name: String, message: String },
}

impl PipelineError {
    pub fn step_failed(
        job_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_name: job_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    pub fn cancelled(job_name: impl Into<String>) -> Self {
        Self::Cancelled {
            job_name: job_name.into(),
        }
    }

    pub fn setup_failed(job_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_name: job_name.into(),
            message: message.into(),
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// Asset discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Timeline assembly failed.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// A required file was not found.
    #[error("Required file not found: {path}")]
    FileNotFound { path: String },
}

impl StepError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlideId;

    #[test]
    fn pipeline_error_chains_context() {
        let step_err = StepError::from(AssemblyError::MissingAsset {
            slide: SlideId::new(3),
        });
        let pipeline_err = PipelineError::step_failed("lesson_07", "Assemble", step_err);

        let msg = pipeline_err.to_string();
        assert!(msg.contains("lesson_07"));
        assert!(msg.contains("Assemble"));
        assert!(msg.contains("03"));
    }

    #[test]
    fn file_not_found_displays_path() {
        let err = StepError::file_not_found("/lessons/07/frames");
        assert!(err.to_string().contains("/lessons/07/frames"));
    }
}
