//! Cohort orchestration over a directory of participant files
//!
//! Each participant file runs through load → aggregate → bootstrap →
//! summarize independently with its own random source. A file that faults is
//! logged, reported and left out; the rest of the batch carries on.

use crate::aggregate::aggregate;
use crate::bootstrap::{BootstrapEngine, BootstrapIteration, Condition};
use crate::config::RunConfig;
use crate::csv_output::{DetailCsvOutput, SummaryCsvOutput};
use crate::error::{OutputError, PipelineError, Result};
use crate::json_output::cohort_to_json;
use crate::summary::{summarize, ParticipantSummary};
use crate::trial_input::load_trials;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// A participant file that could not be processed
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: String,
}

/// Outcome of a cohort run
#[derive(Debug, Clone)]
pub struct CohortReport {
    /// Summaries of every successfully processed file, in file name order
    pub summaries: Vec<ParticipantSummary>,
    pub failures: Vec<FileFailure>,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

impl CohortReport {
    pub fn processed(&self) -> usize {
        self.summaries.len()
    }
}

/// Derive the seed of one file's random stream from a base seed (SplitMix64)
pub fn file_seed(base_seed: u64, counter: u64) -> u64 {
    let mut z = base_seed.wrapping_add(counter.wrapping_mul(0x9e3779b97f4a7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Participant identifier: the file name without a trailing `.csv`
pub fn participant_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.strip_suffix(".csv") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

/// List regular files in `dir`, sorted by name.
///
/// A missing or unreadable directory is logged and yields no files.
pub fn list_participant_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Failed to read input directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| {
            let is_file = path.is_file();
            if !is_file {
                tracing::debug!("Skipping non-file entry {}", path.display());
            }
            is_file
        })
        .collect();
    files.sort();
    files
}

fn create_dir(path: &Path) -> std::result::Result<(), OutputError> {
    std::fs::create_dir_all(path).map_err(|source| OutputError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> std::result::Result<(), OutputError> {
    std::fs::write(path, content).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs the reaction time pipeline over every participant file of a directory
#[derive(Debug, Clone)]
pub struct CohortRunner {
    config: RunConfig,
    engine: BootstrapEngine,
}

impl CohortRunner {
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate().map_err(PipelineError::Config)?;
        let engine = BootstrapEngine::new(config.iterations);
        Ok(Self { config, engine })
    }

    /// Process the whole directory and persist the cohort tables.
    ///
    /// Per-file faults never surface here; only failure to write the cohort
    /// output (or to create output directories) is returned as an error.
    pub fn run(&self) -> Result<CohortReport> {
        let files = list_participant_files(self.config.input_dir());
        tracing::info!(
            iterations = self.engine.iterations(),
            "Processing {} files from: {}",
            files.len(),
            self.config.input_dir().display()
        );

        for condition in Condition::ALL {
            create_dir(&self.config.detail_dir(condition))?;
        }
        create_dir(&self.config.cohort_dir())?;

        let mut summaries = Vec::new();
        let mut failures = Vec::new();
        for (index, file) in files.iter().enumerate() {
            let mut rng = self.rng_for(index as u64);
            match self.process_file(file, &mut rng) {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    tracing::error!("Error processing file {}: {}", file.display(), e);
                    failures.push(FileFailure {
                        file: file.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let json_path = self.config.cohort_json_path();
        let csv_path = self.config.cohort_csv_path();
        write_file(&json_path, &cohort_to_json(&summaries).map_err(OutputError::from)?)?;
        write_file(&csv_path, &summaries.iter().collect::<SummaryCsvOutput>().to_csv())?;

        tracing::info!(
            processed = summaries.len(),
            failed = failures.len(),
            "Process completed: results saved to {} and {}",
            json_path.display(),
            csv_path.display()
        );

        Ok(CohortReport {
            summaries,
            failures,
            json_path,
            csv_path,
        })
    }

    /// Run the pipeline on one participant file and write its bootstrap detail
    pub fn process_file(&self, path: &Path, rng: &mut StdRng) -> Result<ParticipantSummary> {
        let id = participant_id(path);
        tracing::info!("Processing file: {}", path.display());

        let rows = load_trials(path)?;
        let records = aggregate(&rows);
        let iterations = self.engine.run(&records, rng);

        self.save_detail(&id, &iterations)?;
        Ok(summarize(id, &iterations))
    }

    fn save_detail(&self, id: &str, iterations: &[BootstrapIteration<'_>]) -> Result<()> {
        for condition in Condition::ALL {
            let path = self
                .config
                .detail_dir(condition)
                .join(format!("{}_{}_detail.csv", id, condition.label()));
            let csv = DetailCsvOutput::new(condition, iterations).to_csv();
            write_file(&path, &csv)?;
            tracing::info!("CSV saved: {}", path.display());
        }
        Ok(())
    }

    fn rng_for(&self, index: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(file_seed(seed, index)),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_participant_id() {
        assert_eq!(participant_id(Path::new("data/P07.csv")), "P07");
        assert_eq!(participant_id(Path::new("data/P07.txt")), "P07.txt");
        assert_eq!(participant_id(Path::new("data/P07.csv.csv")), "P07.csv");
    }

    #[test]
    fn test_file_seed_distinct_streams() {
        assert_ne!(file_seed(1, 0), file_seed(1, 1));
        assert_eq!(file_seed(5, 3), file_seed(5, 3));
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        assert!(list_participant_files(Path::new("/nonexistent/participants")).is_empty());
    }

    #[test]
    fn test_list_skips_directories_and_sorts() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.csv", "pairs,RT\n");
        write(dir.path(), "a.csv", "pairs,RT\n");
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = list_participant_files(dir.path());
        let names: Vec<String> = files.iter().map(|p| participant_id(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = CohortRunner::new(RunConfig::new("data", "")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_run_tolerates_bad_file() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write(input.path(), "P01.csv", "pairs,RT\n1_2,500\n2_1,600\n");
        write(input.path(), "P02.csv", "pairs,time\n1_2,500\n");

        let config = RunConfig::new(input.path(), "cohort")
            .with_iterations(3)
            .with_output_root(output.path())
            .with_seed(1);
        let report = CohortRunner::new(config).unwrap().run().unwrap();

        assert_eq!(report.processed(), 1);
        assert_eq!(report.summaries[0].participant_id, "P01");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].file.ends_with("P02.csv"));
        assert!(report.failures[0].error.contains("RT"));

        assert!(report.json_path.exists());
        assert!(report.csv_path.exists());
        let detail = output
            .path()
            .join("bootstrap_detail/congruent/P01_congruent_detail.csv");
        assert_eq!(fs::read_to_string(detail).unwrap().lines().count(), 1 + 3 * 8);
        assert!(!output
            .path()
            .join("bootstrap_detail/congruent/P02_congruent_detail.csv")
            .exists());
    }

    #[test]
    fn test_run_missing_directory_writes_empty_cohort() {
        let output = TempDir::new().unwrap();
        let config = RunConfig::new(output.path().join("absent"), "empty")
            .with_iterations(1)
            .with_output_root(output.path());
        let report = CohortRunner::new(config).unwrap().run().unwrap();

        assert_eq!(report.processed(), 0);
        assert!(report.failures.is_empty());
        assert_eq!(fs::read_to_string(&report.json_path).unwrap(), "[]");
    }

    #[test]
    fn test_seeded_runs_match() {
        let input = TempDir::new().unwrap();
        write(
            input.path(),
            "P01.csv",
            "pairs,RT\n1_2,500\n2_1,600\n2_3,450\n3_2,470\n1_3,520\n",
        );

        let run = |out: &Path| {
            let config = RunConfig::new(input.path(), "cohort")
                .with_iterations(20)
                .with_output_root(out)
                .with_seed(99);
            CohortRunner::new(config).unwrap().run().unwrap()
        };
        let first_out = TempDir::new().unwrap();
        let second_out = TempDir::new().unwrap();
        let first = run(first_out.path());
        let second = run(second_out.path());

        assert_eq!(first.summaries, second.summaries);
        let detail = "bootstrap_detail/incongruent/P01_incongruent_detail.csv";
        assert_eq!(
            fs::read_to_string(first_out.path().join(detail)).unwrap(),
            fs::read_to_string(second_out.path().join(detail)).unwrap()
        );
    }
}
