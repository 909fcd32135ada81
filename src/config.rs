//! Configuration for a cohort run

use crate::bootstrap::{Condition, DEFAULT_ITERATIONS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default root for all written results, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "analysis_result";

/// Configuration for processing one directory of participant files
///
/// # Example
/// ```
/// use rt_bootstrap::config::RunConfig;
///
/// let config = RunConfig::new("participant_data/large", "large_results");
/// assert_eq!(config.iterations, 5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory holding one trial CSV per participant
    pub input_dir: PathBuf,

    /// Base name of the cohort JSON and CSV files
    pub output_name: String,

    /// Bootstrap iterations per participant
    pub iterations: usize,

    /// Root directory for detail and cohort output
    pub output_root: PathBuf,

    /// Seed for reproducible runs; each participant file gets its own stream.
    /// `None` seeds every file from the operating system.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_name: "results".to_string(),
            iterations: DEFAULT_ITERATIONS,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_name: output_name.into(),
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.output_name.trim().is_empty() {
            return Err("output_name must not be empty".to_string());
        }

        if self.output_name.contains(|c: char| c == '/' || c == '\\') {
            return Err(format!(
                "output_name must be a bare file name, got '{}'",
                self.output_name
            ));
        }

        Ok(())
    }

    /// Directory holding the per-participant detail files for one condition
    pub fn detail_dir(&self, condition: Condition) -> PathBuf {
        self.output_root
            .join("bootstrap_detail")
            .join(condition.label())
    }

    /// Directory holding the cohort JSON and CSV files
    pub fn cohort_dir(&self) -> PathBuf {
        self.output_root.join("compatibility")
    }

    pub fn cohort_json_path(&self) -> PathBuf {
        self.cohort_dir().join(format!("{}.json", self.output_name))
    }

    pub fn cohort_csv_path(&self) -> PathBuf {
        self.cohort_dir().join(format!("{}.csv", self.output_name))
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }
}
