#![cfg(test)]
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sweepr_common::error::SweepError;
use sweepr_common::network::target::Target;
use sweepr_core::probe::{ProbeExecutor, ProbeOutcome, ProbeStatus};
use sweepr_core::report::SweepReport;
use sweepr_core::sweep::run_sweep;

/// Deterministic stand-in for the system ping: an address is reachable iff
/// it appears in the allow set. Records every probed address so tests can
/// assert exactly what was dispatched.
struct ScriptedPing {
    alive: HashSet<Ipv4Addr>,
    probed: Mutex<Vec<Ipv4Addr>>,
    delay: Duration,
}

impl ScriptedPing {
    fn new(alive: impl IntoIterator<Item = Ipv4Addr>) -> Self {
        Self {
            alive: alive.into_iter().collect(),
            probed: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn probed(&self) -> Vec<Ipv4Addr> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProbeExecutor for ScriptedPing {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.probed.lock().unwrap().push(addr);

        let status = if self.alive.contains(&addr) {
            ProbeStatus::Reachable
        } else {
            ProbeStatus::Unreachable
        };
        ProbeOutcome::new(status, addr)
    }
}

fn addr(d: u8) -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 1, d)
}

/// Drops its path on the way out so temp files never accumulate.
struct TempFile(PathBuf);

impl TempFile {
    fn with_contents(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("sweepr-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("failed to write temp address file");
        Self(path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[tokio::test]
async fn range_with_no_responders_reports_every_address_unreachable() {
    let target = Target::from_str("192.168.1.1-192.168.1.3").unwrap();
    let addrs = target.expand().unwrap();
    let executor = Arc::new(ScriptedPing::new([]));

    let outcomes = run_sweep(addrs, executor, 10, None).await;
    let report = SweepReport::from_outcomes(outcomes);

    assert_eq!(report.total(), 3);
    assert!(report.reachable().is_empty());
    assert_eq!(report.unreachable(), &[addr(1), addr(2), addr(3)]);
}

#[tokio::test]
async fn subnet_30_probes_exactly_its_two_usable_hosts() {
    let target = Target::from_str("10.0.0.0/30").unwrap();
    let addrs = target.expand().unwrap();

    let executor = Arc::new(ScriptedPing::new([Ipv4Addr::new(10, 0, 0, 1)]));
    let outcomes = run_sweep(addrs, executor.clone(), 10, None).await;

    let mut probed = executor.probed();
    probed.sort();
    assert_eq!(
        probed,
        vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]
    );

    let report = SweepReport::from_outcomes(outcomes);
    assert_eq!(report.reachable(), &[Ipv4Addr::new(10, 0, 0, 1)]);
    assert_eq!(report.unreachable(), &[Ipv4Addr::new(10, 0, 0, 2)]);
}

#[tokio::test]
async fn outcome_count_is_exact_for_any_worker_limit() {
    let addrs: Vec<Ipv4Addr> = (1..=60).map(addr).collect();
    let alive: Vec<Ipv4Addr> = addrs.iter().copied().filter(|a| a.octets()[3] % 2 == 0).collect();

    for workers in [1, 7, 10, 100] {
        let executor =
            Arc::new(ScriptedPing::new(alive.clone()).with_delay(Duration::from_millis(1)));
        let outcomes = run_sweep(addrs.clone(), executor, workers, None).await;

        assert_eq!(
            outcomes.reachable.len() + outcomes.unreachable.len(),
            60,
            "workers={workers}"
        );
        assert_eq!(outcomes.reachable.len(), 30);
    }
}

#[tokio::test]
async fn report_lists_are_sorted_despite_unordered_completion() {
    // Descending dispatch plus per-probe delay makes completion order
    // effectively arbitrary.
    let addrs: Vec<Ipv4Addr> = (1..=40).rev().map(addr).collect();
    let executor = Arc::new(ScriptedPing::new(addrs.clone()).with_delay(Duration::from_millis(1)));

    let outcomes = run_sweep(addrs, executor, 8, None).await;
    let report = SweepReport::from_outcomes(outcomes);

    let expected: Vec<Ipv4Addr> = (1..=40).map(addr).collect();
    assert_eq!(report.reachable(), expected.as_slice());
}

#[tokio::test]
async fn file_target_trims_lines_and_skips_blanks() {
    let file = TempFile::with_contents("list", "10.0.0.1\n\n   10.0.0.2  \n\n");
    let target = Target::File {
        path: file.0.clone(),
    };

    let addrs = target.expand().unwrap();
    assert_eq!(
        addrs,
        vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]
    );
}

#[test]
fn empty_address_file_aborts_before_probing() {
    let file = TempFile::with_contents("empty", "\n  \n\n");
    let target = Target::File {
        path: file.0.clone(),
    };

    assert!(matches!(target.expand(), Err(SweepError::EmptyInput(_))));
}

#[test]
fn missing_address_file_aborts_before_probing() {
    let target = Target::File {
        path: PathBuf::from("/no/such/dir/ip.txt"),
    };

    assert!(matches!(target.expand(), Err(SweepError::FileNotFound(_))));
}
