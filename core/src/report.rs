//! Run summary over the two outcome collections.
//!
//! Built once after every worker has completed; sorting here imposes the
//! deterministic final ordering that the concurrent phase does not.

use std::fmt::Write as _;
use std::net::Ipv4Addr;
use std::path::Path;

use anyhow::Context;
use chrono::Local;

use crate::sweep::SweepOutcomes;

/// Read-only summary of a finished sweep, with both address lists sorted in
/// ascending numeric order.
#[derive(Debug)]
pub struct SweepReport {
    reachable: Vec<Ipv4Addr>,
    unreachable: Vec<Ipv4Addr>,
}

impl SweepReport {
    pub fn from_outcomes(outcomes: SweepOutcomes) -> Self {
        let SweepOutcomes {
            mut reachable,
            mut unreachable,
        } = outcomes;
        reachable.sort();
        unreachable.sort();

        Self {
            reachable,
            unreachable,
        }
    }

    pub fn total(&self) -> usize {
        self.reachable.len() + self.unreachable.len()
    }

    pub fn reachable(&self) -> &[Ipv4Addr] {
        &self.reachable
    }

    pub fn unreachable(&self) -> &[Ipv4Addr] {
        &self.unreachable
    }

    /// Renders the human-readable summary. The same text goes to stdout and,
    /// when requested, to the result file.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "sweep summary:");
        let _ = writeln!(out, "total addresses probed: {}", self.total());
        let _ = writeln!(out, "reachable: {}", self.reachable.len());
        let _ = writeln!(out, "unreachable: {}", self.unreachable.len());

        if !self.reachable.is_empty() {
            let _ = writeln!(out, "\nreachable addresses:");
            for addr in &self.reachable {
                let _ = writeln!(out, "{addr}");
            }
        }

        if !self.unreachable.is_empty() {
            let _ = writeln!(out, "\nunreachable addresses:");
            for addr in &self.unreachable {
                let _ = writeln!(out, "{addr}");
            }
        }

        out
    }

    /// Writes the rendered summary to `path`, overwriting any existing file.
    ///
    /// Write failures are fatal to the run and propagate untouched.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("failed to write results to {}", path.display()))
    }
}

/// Default result-file name, stamped with the local wall clock.
pub fn default_output_name() -> String {
    format!("ping_results_{}.txt", Local::now().format("%Y%m%d_%H%M"))
}
