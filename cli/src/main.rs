mod prompt;
mod terminal;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use sweepr_common::config::SweepConfig;
use sweepr_common::network::target::Target;
use sweepr_core::probe::SystemPing;
use sweepr_core::report::{self, SweepReport};
use sweepr_core::sweep;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Concurrent IPv4 reachability sweeper built on the system ping.")]
pub struct CommandLine {
    /// Address, start-end range, or CIDR subnet. Omit to pick a mode
    /// interactively.
    pub target: Option<Target>,

    /// Echo requests sent per probe
    #[arg(short = 'c', long, default_value_t = 2)]
    pub count: u32,

    /// Per-packet reply timeout in seconds
    #[arg(short = 't', long, default_value_t = 2)]
    pub timeout: u64,

    /// Maximum probes in flight
    #[arg(short = 'w', long, default_value_t = 10)]
    pub workers: usize,

    /// Result file path (defaults to ping_results_<YYYYMMDD_HHMM>.txt)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Skip writing the result file
    #[arg(long, conflicts_with = "output")]
    pub no_output: bool,

    /// Address file used by the file mode
    #[arg(short = 'f', long, default_value = "ip.txt")]
    pub file: PathBuf,

    /// Suppress per-probe lines, keeping progress and the summary
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse();
    terminal::logging::init(args.quiet);

    let target = match args.target.clone() {
        Some(target) => target,
        None => prompt::select_target(&mut io::stdin().lock(), &args.file)?,
    };

    let addrs = target.expand()?;
    if addrs.is_empty() {
        warn!("target expands to zero addresses, nothing to probe");
    }

    let cfg = SweepConfig {
        packet_count: args.count,
        timeout_secs: args.timeout,
        max_workers: args.workers,
    };

    let executor = Arc::new(SystemPing::from_config(&cfg));
    let outcomes = sweep::run_sweep(addrs, executor, cfg.max_workers, None).await;

    let sweep_report = SweepReport::from_outcomes(outcomes);
    println!("\n{}", sweep_report.render());

    if !args.no_output {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(report::default_output_name()));
        sweep_report.write_to(&path)?;
        info!("results saved to {}", path.display());
    }

    Ok(())
}
