//! Sweep controller: drive the evaluator over every grid point, isolate
//! per-combination failures, track the best vector, and append one durable
//! record per combination.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SweepError;
use crate::evaluate::{Evaluator, Simulator};
use crate::grid::GridSpec;
use crate::report::SENTINEL_FITNESS;
use crate::store::ResultLog;
use crate::strategy::PacingParams;

/// Terminal state of one combination.
///
/// A combination moves PENDING -> RUNNING -> SUCCEEDED or FAILED; FAILED
/// covers simulator errors and panics alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Succeeded,
    Failed,
}

/// One durable row of the sweep: never edited or removed once written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    /// 1-based index in grid-enumeration order.
    pub run_id: usize,
    pub params: PacingParams,
    /// Extracted fitness; [`SENTINEL_FITNESS`] on extraction miss or fault.
    pub fitness: f64,
    pub trials: u32,
    pub status: RunStatus,
}

/// Final summary of a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Best viable vector and its fitness; `None` when nothing viable was
    /// found, which the caller must report as such rather than showing the
    /// sentinel as a score.
    pub best: Option<(PacingParams, f64)>,
    pub combinations: usize,
    pub failed: usize,
    /// Where the result store was written.
    pub store: PathBuf,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SweepSummary {
    pub fn succeeded(&self) -> usize {
        self.combinations - self.failed
    }
}

/// Run the full grid sweep, writing the result store under `log_dir`.
///
/// The grid expands before the store is created, so an invalid grid aborts
/// with no store on disk. After that, every grid point yields exactly one
/// appended record, in enumeration order, whatever the evaluator does:
/// simulator errors and panics are absorbed at single-combination
/// granularity and recorded as FAILED. Only a storage fault aborts mid-sweep;
/// a silently lost record would be worse than a dead sweep.
pub fn run_sweep<S: Simulator>(
    grid: &GridSpec,
    evaluator: &mut Evaluator<S>,
    log_dir: &Path,
) -> Result<SweepSummary, SweepError> {
    let combinations = grid.expand()?;
    let mut log = ResultLog::create(log_dir)?;
    let total = combinations.len();
    let trials = evaluator.trials();
    info!(total, trials, store = %log.path().display(), "sweep started");

    let started = Instant::now();
    let mut best: Option<(PacingParams, f64)> = None;
    let mut failed = 0usize;

    for (i, params) in combinations.into_iter().enumerate() {
        let run_id = i + 1;

        // Advisory only: running mean of completed combinations projected
        // over the unprocessed remainder.
        if i > 0 {
            let mean = started.elapsed().as_secs_f64() / i as f64;
            let remaining_min = (total - i) as f64 * mean / 60.0;
            info!("[{run_id}/{total}] {params} | est. remaining {remaining_min:.1}m");
        } else {
            info!("[{run_id}/{total}] {params}");
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(params)));
        let record = match outcome {
            Ok(Ok(result)) => {
                info!("[{run_id}/{total}] fitness {:.2}", result.fitness);
                SweepRecord {
                    run_id,
                    params,
                    fitness: result.fitness,
                    trials: result.trials,
                    status: RunStatus::Succeeded,
                }
            }
            Ok(Err(err)) => {
                warn!("[{run_id}/{total}] simulator fault: {err}");
                failed_record(run_id, params, trials)
            }
            Err(_) => {
                warn!("[{run_id}/{total}] simulator panicked");
                failed_record(run_id, params, trials)
            }
        };

        log.append(&record)?;

        if record.status == RunStatus::Failed {
            failed += 1;
        } else if record.fitness > SENTINEL_FITNESS {
            // Strict comparison: ties keep the earlier-found vector.
            let improved = best.is_none_or(|(_, score)| record.fitness > score);
            if improved {
                best = Some((params, record.fitness));
            }
        }
    }

    let summary = SweepSummary {
        best,
        combinations: total,
        failed,
        store: log.path().to_path_buf(),
        elapsed: started.elapsed(),
    };
    match &summary.best {
        Some((params, score)) => info!("sweep finished, best {score:.2} at {params}"),
        None => warn!("sweep finished with no viable configuration"),
    }
    Ok(summary)
}

fn failed_record(run_id: usize, params: PacingParams, trials: u32) -> SweepRecord {
    SweepRecord {
        run_id,
        params,
        fitness: SENTINEL_FITNESS,
        trials,
        status: RunStatus::Failed,
    }
}
