//! CLI argument parsing for rt-bootstrap

use crate::bootstrap::DEFAULT_ITERATIONS;
use crate::config::RunConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rt-bootstrap")]
#[command(version)]
#[command(
    about = "Bootstrap-resampled congruent/incongruent reaction time averages per participant",
    long_about = None
)]
pub struct Cli {
    /// Directory holding one trial CSV per participant (columns `pairs` and `RT`)
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Base name of the cohort result files (<NAME>.json and <NAME>.csv)
    #[arg(value_name = "OUTPUT_NAME")]
    pub output_name: String,

    /// Number of bootstrap iterations per participant
    #[arg(
        short = 'n',
        long = "iterations",
        value_name = "N",
        default_value_t = DEFAULT_ITERATIONS
    )]
    pub iterations: usize,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        RunConfig::new(&self.input_dir, &self.output_name).with_iterations(self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_positionals() {
        let cli = Cli::parse_from(["rt-bootstrap", "participant_data/large/", "large_results"]);
        assert_eq!(cli.input_dir, PathBuf::from("participant_data/large/"));
        assert_eq!(cli.output_name, "large_results");
        assert_eq!(cli.iterations, 5000);
    }

    #[test]
    fn test_cli_iterations_flag() {
        let cli = Cli::parse_from(["rt-bootstrap", "data", "out", "--iterations", "250"]);
        assert_eq!(cli.iterations, 250);

        let cli = Cli::parse_from(["rt-bootstrap", "-n", "7", "data", "out"]);
        assert_eq!(cli.iterations, 7);
    }

    #[test]
    fn test_cli_rejects_negative_iterations() {
        let result = Cli::try_parse_from(["rt-bootstrap", "data", "out", "-n", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_output_name() {
        assert!(Cli::try_parse_from(["rt-bootstrap", "data"]).is_err());
    }

    #[test]
    fn test_to_config() {
        let cli = Cli::parse_from(["rt-bootstrap", "data", "out", "-n", "12"]);
        let config = cli.to_config();
        assert_eq!(config.input_dir, PathBuf::from("data"));
        assert_eq!(config.output_name, "out");
        assert_eq!(config.iterations, 12);
        assert_eq!(config.output_root, PathBuf::from("analysis_result"));
        assert!(config.seed.is_none());
    }
}
