//! Interactive mode selection.
//!
//! One linear pass with no loop-back: the operator picks a mode, supplies
//! the mode-specific input, and gets a [`Target`] (or a fatal error) back.
//! Malformed input at any step aborts the run; there is no re-prompt.
//!
//! Input comes from an injectable `BufRead` so the dispatch logic can be
//! exercised headlessly in tests.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use sweepr_common::error::SweepError;
use sweepr_common::network::target::{self, Target};

/// The four sweep modes offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Range,
    Subnet,
    File,
}

impl Mode {
    fn from_choice(choice: &str) -> Result<Mode, SweepError> {
        match choice {
            "1" => Ok(Mode::Single),
            "2" => Ok(Mode::Range),
            "3" => Ok(Mode::Subnet),
            "4" => Ok(Mode::File),
            other => Err(SweepError::InvalidMode(other.to_string())),
        }
    }
}

/// Runs the mode menu against `input` and returns the selected target.
///
/// `file_path` is the address file consumed by the file mode; it is not
/// read here, only recorded in the target for expansion later.
pub fn select_target(input: &mut impl BufRead, file_path: &Path) -> anyhow::Result<Target> {
    print_menu();

    let choice = read_trimmed(input, "select a mode (1-4): ")?;
    let mode = Mode::from_choice(&choice)?;

    let target = match mode {
        Mode::Single => {
            let line = read_trimmed(input, "address to probe: ")?;
            let addr = line
                .parse()
                .map_err(|_| SweepError::InvalidAddress(line))?;
            Target::Host { addr }
        }
        Mode::Range => {
            let line = read_trimmed(input, "address range (start-end): ")?;
            target::parse_ip_range(&line)?
        }
        Mode::Subnet => {
            let line = read_trimmed(input, "subnet (x.x.x.x/n): ")?;
            target::parse_cidr(&line)?
        }
        Mode::File => {
            println!(
                "reading addresses from {}, one per line",
                file_path.display()
            );
            Target::File {
                path: file_path.to_path_buf(),
            }
        }
    };

    Ok(target)
}

fn print_menu() {
    println!();
    println!("{}", "select a sweep mode:".bold());
    println!("1. single address");
    println!("2. address range (start-end)");
    println!("3. subnet (CIDR)");
    println!("4. addresses from file");
}

fn read_trimmed(input: &mut impl BufRead, prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
