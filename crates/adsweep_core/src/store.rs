//! Append-only CSV result store.
//!
//! The store is created with its header before the sweep starts and each
//! record is flushed as soon as it is appended, so a crash loses at most the
//! in-flight combination. Rows are never rewritten or reordered.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SweepError;
use crate::sweep::{RunStatus, SweepRecord};

/// Fitness column marker for FAILED rows, kept distinct from the numeric
/// sentinel an extraction miss records.
pub const CRASH_MARKER: &str = "CRASH";

/// Column names: run index, one column per parameter-vector field in knob
/// order, then fitness and trial count.
pub const RESULT_HEADER: [&str; 7] = [
    "Run_ID",
    "Pacing_Rate",
    "Base_Lift",
    "Steepness",
    "Peak_Multiplier",
    "Fitness",
    "Trial_Count",
];

pub struct ResultLog {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl ResultLog {
    /// Create a fresh store under `dir`, named with the sweep-start
    /// timestamp so runs never collide, and write the header row.
    pub fn create(dir: &Path) -> Result<Self, SweepError> {
        fs::create_dir_all(dir)?;
        let stamp = jiff::Zoned::now().strftime("%Y-%m-%d_%H-%M-%S").to_string();
        let path = dir.join(format!("results_{stamp}.csv"));

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(RESULT_HEADER)?;
        writer.flush()?;

        info!(path = %path.display(), "result store created");
        Ok(Self { writer, path })
    }

    /// Append one record and flush it before returning.
    pub fn append(&mut self, record: &SweepRecord) -> Result<(), SweepError> {
        let fitness = match record.status {
            RunStatus::Succeeded => record.fitness.to_string(),
            RunStatus::Failed => CRASH_MARKER.to_string(),
        };
        self.writer.write_record([
            record.run_id.to_string(),
            record.params.pacing_rate.to_string(),
            record.params.base_lift.to_string(),
            record.params.steepness.to_string(),
            record.params.peak_multiplier.to_string(),
            fitness,
            record.trials.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SENTINEL_FITNESS;
    use crate::strategy::PacingParams;

    fn params() -> PacingParams {
        PacingParams {
            pacing_rate: 0.85,
            base_lift: 0.15,
            steepness: 10.0,
            peak_multiplier: 3.0,
        }
    }

    #[test]
    fn header_then_one_row_per_append() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = ResultLog::create(dir.path()).unwrap();

        log.append(&SweepRecord {
            run_id: 1,
            params: params(),
            fitness: 123.5,
            trials: 50,
            status: RunStatus::Succeeded,
        })
        .unwrap();
        log.append(&SweepRecord {
            run_id: 2,
            params: params(),
            fitness: SENTINEL_FITNESS,
            trials: 50,
            status: RunStatus::Failed,
        })
        .unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Run_ID,Pacing_Rate,Base_Lift,Steepness,Peak_Multiplier,Fitness,Trial_Count"
        );
        assert_eq!(lines[1], "1,0.85,0.15,10,3,123.5,50");
        assert_eq!(lines[2], "2,0.85,0.15,10,3,CRASH,50");
    }

    #[test]
    fn store_file_carries_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultLog::create(dir.path()).unwrap();
        let name = log.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("results_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn create_fails_cleanly_on_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file_in_the_way = dir.path().join("blocked");
        std::fs::write(&file_in_the_way, b"x").unwrap();
        // Using a plain file as the store directory must surface an error.
        assert!(ResultLog::create(&file_in_the_way).is_err());
    }
}
