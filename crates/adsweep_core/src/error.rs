use std::fmt;
use std::io;

/// Errors raised while expanding a parameter grid.
///
/// These are fatal at sweep start: an invalid grid means no result store is
/// created and nothing is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    NonPositiveStep { knob: &'static str, step: f64 },
    EmptyRange { knob: &'static str, start: f64, stop: f64 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NonPositiveStep { knob, step } => {
                write!(f, "knob {knob}: step must be positive, got {step}")
            }
            GridError::EmptyRange { knob, start, stop } => {
                write!(f, "knob {knob}: empty range {start}..={stop}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors raised by a simulator during one invocation.
///
/// The sweep controller absorbs these at single-combination granularity;
/// they never abort the sweep.
#[derive(Debug)]
pub enum SimulatorError {
    /// The agent roster was empty.
    NoAgents,
    /// The trial count was zero.
    NoTrials,
    /// Any other runtime fault inside the simulator.
    Fault(String),
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::NoAgents => write!(f, "no agents to simulate"),
            SimulatorError::NoTrials => write!(f, "trial count must be positive"),
            SimulatorError::Fault(msg) => write!(f, "simulator fault: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}

/// Errors that abort a sweep.
///
/// Per-combination simulator faults are not represented here; only setup
/// failures and result-store failures stop a sweep, since a lost record must
/// never go unnoticed.
#[derive(Debug)]
pub enum SweepError {
    Grid(GridError),
    Store(csv::Error),
    Io(io::Error),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Grid(e) => write!(f, "{e}"),
            SweepError::Store(e) => write!(f, "result store error: {e}"),
            SweepError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Grid(e) => Some(e),
            SweepError::Store(e) => Some(e),
            SweepError::Io(e) => Some(e),
        }
    }
}

impl From<GridError> for SweepError {
    fn from(e: GridError) -> Self {
        SweepError::Grid(e)
    }
}

impl From<csv::Error> for SweepError {
    fn from(e: csv::Error) -> Self {
        SweepError::Store(e)
    }
}

impl From<io::Error> for SweepError {
    fn from(e: io::Error) -> Self {
        SweepError::Io(e)
    }
}
