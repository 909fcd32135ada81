//! rt-bootstrap - Bootstrap-resampled reaction time averages
//!
//! Turns per-participant trial logs into congruent/incongruent reaction time
//! averages per stimulus distance, resamples them with a bootstrap, and
//! summarizes each participant into one cohort row.
//!
//! Pipeline: [`trial_input`] → [`aggregate`] → [`bootstrap`] → [`summary`],
//! orchestrated over a directory by [`cohort`].

pub mod aggregate;
pub mod bootstrap;
pub mod cli;
pub mod cohort;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod pairs;
pub mod stats;
pub mod summary;
pub mod trial_input;

pub use error::{PipelineError, Result};
