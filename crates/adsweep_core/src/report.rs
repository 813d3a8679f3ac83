//! Fitness extraction from simulator report text.
//!
//! The simulator's only observable output is free text containing one line
//! per agent of the form `### <agent name> # <signed decimal>`. The report
//! format is an external contract; keeping the parse isolated here means the
//! sweep controller never sees it.

use regex::Regex;

/// Reserved out-of-range fitness meaning "no valid measurement".
///
/// Distinct from any legitimately poor score the simulator can report.
pub const SENTINEL_FITNESS: f64 = -99_999.0;

/// Find `agent_name`'s mean outcome in a report.
///
/// The agent name is matched literally (regex metacharacters in the name are
/// escaped) and the first match in document order wins. Returns `None` when
/// the report holds no line for the agent.
pub fn parse_fitness(report: &str, agent_name: &str) -> Option<f64> {
    let pattern = format!(
        r"###\s+{}\s+#\s+(-?\d+(?:\.\d+)?)",
        regex::escape(agent_name)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(report)?.get(1)?.as_str().parse().ok()
}
