//! Evaluation of one parameter vector: build the roster, run the simulator
//! once, pull the tuned agent's score out of the captured report.

use tracing::debug;

use crate::agent::{Agent, BaselineAgent, TUNED_AGENT_NAME, TunableAgent};
use crate::error::SimulatorError;
use crate::report::{SENTINEL_FITNESS, parse_fitness};
use crate::strategy::PacingParams;

/// External collaborator running independent stochastic trials.
///
/// The simulator communicates its outcome only through the report sink: one
/// line per agent of the form `### <name> # <number>`. Each invocation gets
/// its own sink, so reports are never interleaved between evaluations.
pub trait Simulator {
    fn run_simulation(
        &mut self,
        agents: &[Box<dyn Agent>],
        trials: u32,
        report: &mut String,
    ) -> Result<(), SimulatorError>;
}

/// One simulator invocation's outcome for a parameter vector.
///
/// `fitness` is [`SENTINEL_FITNESS`] when the report held no line for the
/// tuned agent; that is a recorded measurement failure, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    pub fitness: f64,
    pub trials: u32,
}

/// Adapter that binds a parameter vector to a fresh roster and scores it.
pub struct Evaluator<S> {
    simulator: S,
    trials: u32,
    opponents: usize,
}

impl<S: Simulator> Evaluator<S> {
    pub fn new(simulator: S, trials: u32, opponents: usize) -> Self {
        Self {
            simulator,
            trials,
            opponents,
        }
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Evaluate one parameter vector.
    ///
    /// Simulator faults propagate to the caller; the sweep controller turns
    /// them into a FAILED record for this combination only.
    pub fn evaluate(&mut self, params: PacingParams) -> Result<TrialResult, SimulatorError> {
        let mut agents: Vec<Box<dyn Agent>> =
            vec![Box::new(TunableAgent::new(TUNED_AGENT_NAME, params))];
        for j in 0..self.opponents {
            agents.push(Box::new(BaselineAgent::new(format!("Opponent {}", j + 1))));
        }

        let mut report = String::new();
        self.simulator
            .run_simulation(&agents, self.trials, &mut report)?;

        let fitness = match parse_fitness(&report, TUNED_AGENT_NAME) {
            Some(score) => score,
            None => {
                debug!(
                    report_len = report.len(),
                    "report held no line for {TUNED_AGENT_NAME}, recording sentinel"
                );
                SENTINEL_FITNESS
            }
        };

        Ok(TrialResult {
            fitness,
            trials: self.trials,
        })
    }
}
