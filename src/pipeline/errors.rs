//! Error types for the release pipeline.
//!
//! Errors carry context that chains through layers:
//! Release → Step → Operation → Detail

use std::io;

use thiserror::Error;

/// Top-level pipeline error with release context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Release '{release}' failed at step '{step}': {source}")]
    StepFailed {
        release: String,
        step: String,
        #[source]
        source: StepError,
    },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        release: impl Into<String>,
        step: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            release: release.into(),
            step: step.into(),
            source,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// A required input file was not found (lossless source, cover).
    #[error("Required file not found: {path}")]
    FileNotFound { path: String },

    /// An external encoder exited with a failure status.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// No checksum was recorded for a track's MP3 output. This is the
    /// downstream symptom of an encode that never completed.
    #[error("No CRC32 hash recorded for {filename}")]
    MissingHash { filename: String },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Reading audio properties back from an encoded file failed.
    #[error("Failed to read audio metadata from {path}: {message}")]
    Metadata { path: String, message: String },
}

impl StepError {
    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a missing hash error.
    pub fn missing_hash(filename: impl Into<String>) -> Self {
        Self::MissingHash {
            filename: filename.into(),
        }
    }

    /// Create an I/O error with operation context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a metadata read error.
    pub fn metadata(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
