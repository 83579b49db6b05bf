//! The central **abstraction** for reachability probing.
//!
//! A probe is one reachability check of a single address, delegated to the
//! system ping utility. Nothing here speaks ICMP: the external process owns
//! packet construction and timeout enforcement, and the outcome is read from
//! its exit status alone.
//!
//! High-level modules depend on the [`ProbeExecutor`] trait rather than the
//! concrete [`SystemPing`] implementation, so the sweep coordinator can be
//! exercised with deterministic fake executors in tests.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::config::SweepConfig;
use tokio::process::Command;
use tracing::{info, warn};

/// Binary outcome of a probe, based solely on the external process exit
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Reachable,
    Unreachable,
}

/// One recorded probe result. Exactly one is produced per address per run.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOutcome {
    pub addr: Ipv4Addr,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    pub fn new(status: ProbeStatus, addr: Ipv4Addr) -> Self {
        Self { addr, status }
    }
}

/// Performs one reachability check per call.
///
/// A probe may block for up to roughly `timeout x packet_count`; the
/// implementation owns its own timeout enforcement and must always resolve
/// to an outcome, never an error. Invocation failures are classified as
/// [`ProbeStatus::Unreachable`].
#[async_trait]
pub trait ProbeExecutor: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeOutcome;
}

/// Probes by spawning the platform ping utility.
pub struct SystemPing {
    timeout: Duration,
    packet_count: u32,
}

impl SystemPing {
    pub fn new(timeout: Duration, packet_count: u32) -> Self {
        Self {
            timeout,
            packet_count,
        }
    }

    pub fn from_config(cfg: &SweepConfig) -> Self {
        Self::new(cfg.timeout(), cfg.packet_count)
    }

    async fn run_ping(&self, addr: Ipv4Addr) -> std::io::Result<bool> {
        let mut cmd = Command::new("ping");
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .arg("-c")
            .arg(self.packet_count.to_string());

        // Per-reply timeout: macOS takes milliseconds, the rest seconds.
        #[cfg(target_os = "macos")]
        {
            let ms = self.timeout.as_millis().clamp(1, 60_000);
            cmd.arg("-W").arg(ms.to_string());
        }
        #[cfg(not(target_os = "macos"))]
        {
            let secs = self.timeout.as_secs().max(1);
            cmd.arg("-W").arg(secs.to_string());
        }

        // Output is captured but never parsed; the exit status is the
        // whole contract.
        let output = cmd.arg(addr.to_string()).output().await?;
        Ok(output.status.success())
    }
}

#[async_trait]
impl ProbeExecutor for SystemPing {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeOutcome {
        let status = match self.run_ping(addr).await {
            Ok(true) => ProbeStatus::Reachable,
            Ok(false) => ProbeStatus::Unreachable,
            Err(err) => {
                warn!("{:<15} probe failed to run: {err}", addr.to_string());
                ProbeStatus::Unreachable
            }
        };

        match status {
            ProbeStatus::Reachable => info!(
                "{:<15} reachable ({} packets sent)",
                addr.to_string(),
                self.packet_count
            ),
            ProbeStatus::Unreachable => info!(
                "{:<15} unreachable ({} packets sent)",
                addr.to_string(),
                self.packet_count
            ),
        }

        ProbeOutcome::new(status, addr)
    }
}
