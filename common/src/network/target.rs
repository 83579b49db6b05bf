//! # Sweep Target Model
//!
//! Defines the possible inputs for a reachability sweep.
//!
//! This module handles parsing and representing targets, which can be:
//! * A single IPv4 address (host).
//! * An inclusive IPv4 range (e.g., `192.168.1.1-192.168.1.50`).
//! * A CIDR block (e.g., `192.168.1.0/24`), expanded to its usable hosts.
//! * A newline-delimited address file.

use std::fs;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::str::FromStr;

use ipnet::Ipv4Net;

use crate::error::SweepError;
use crate::network::range::Ipv4Range;

/// Represents a distinct target to be swept.
#[derive(Clone, Debug)]
pub enum Target {
    /// Probe a single specific host.
    Host { addr: Ipv4Addr },
    /// Probe an inclusive range of IPv4 addresses.
    Range { range: Ipv4Range },
    /// Probe the usable hosts of a subnet.
    Subnet { net: Ipv4Net },
    /// Probe every address listed in a file, one per line.
    File { path: PathBuf },
}

impl FromStr for Target {
    type Err = SweepError;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **Host**: a single IPv4 address (e.g., "192.168.1.5").
    /// * **Range**: "start-end" (e.g., "192.168.1.1-192.168.1.50").
    /// * **CIDR**: "network/prefix" (e.g., "192.168.1.0/24").
    ///
    /// File targets are never parsed from a string; they are constructed
    /// explicitly with a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(addr) = s.parse::<Ipv4Addr>() {
            return Ok(Target::Host { addr });
        }

        if s.contains('-') {
            return parse_ip_range(s);
        }

        if s.contains('/') {
            return parse_cidr(s);
        }

        Err(SweepError::InvalidAddress(s.to_string()))
    }
}

impl Target {
    /// Expands this target into the finite, ordered address list to probe.
    ///
    /// Expansion is eager; the whole list exists before the first probe is
    /// dispatched. Duplicates (possible with file input) are kept and probed
    /// independently.
    pub fn expand(&self) -> Result<Vec<Ipv4Addr>, SweepError> {
        match self {
            Target::Host { addr } => Ok(vec![*addr]),
            Target::Range { range } => Ok(range.iter().collect()),
            Target::Subnet { net } => Ok(net.hosts().collect()),
            Target::File { path } => expand_file(path),
        }
    }
}

/// Parses a range string like "192.168.1.1-192.168.1.50".
pub fn parse_ip_range(s: &str) -> Result<Target, SweepError> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Err(SweepError::InvalidRange(s.to_string()));
    };

    let start_addr = start_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| SweepError::InvalidRange(s.to_string()))?;
    let end_addr = end_str
        .trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| SweepError::InvalidRange(s.to_string()))?;

    Ok(Target::Range {
        range: Ipv4Range::new(start_addr, end_addr),
    })
}

/// Parses CIDR notation like "192.168.1.0/24".
///
/// Host bits in the given address are ignored rather than rejected, so
/// "192.168.1.7/24" sweeps the same hosts as "192.168.1.0/24".
pub fn parse_cidr(s: &str) -> Result<Target, SweepError> {
    let net = s
        .trim()
        .parse::<Ipv4Net>()
        .map_err(|_| SweepError::InvalidSubnet(s.to_string()))?;

    Ok(Target::Subnet { net: net.trunc() })
}

/// Reads a newline-delimited address file, trimming whitespace and skipping
/// blank lines.
fn expand_file(path: &PathBuf) -> Result<Vec<Ipv4Addr>, SweepError> {
    let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => SweepError::FileNotFound(path.clone()),
        _ => SweepError::FileRead {
            path: path.clone(),
            source: err,
        },
    })?;

    let mut addrs = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let addr = line
            .parse::<Ipv4Addr>()
            .map_err(|_| SweepError::InvalidAddress(line.to_string()))?;
        addrs.push(addr);
    }

    if addrs.is_empty() {
        return Err(SweepError::EmptyInput(path.clone()));
    }

    Ok(addrs)
}
