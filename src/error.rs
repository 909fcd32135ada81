//! Error types for the reaction time pipeline
//!
//! Data gaps (no trials for a pair) are not errors: they surface as `None`
//! averages. Only file-level and output-level faults are modelled here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a participant trial file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read trial file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Trial file has no header row")]
    MissingHeader,

    #[error("Trial file is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Unterminated quoted field on line {line}")]
    UnterminatedQuote { line: usize },
}

/// Errors raised while persisting bootstrap detail or cohort results
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize cohort results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level pipeline error
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
