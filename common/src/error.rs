use std::path::PathBuf;

use thiserror::Error;

/// Input-validation failures. All of these are fatal: the run aborts with a
/// descriptive message before any probing starts.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid address range '{0}': expected 'start-end' with two IPv4 addresses")]
    InvalidRange(String),

    #[error("invalid subnet '{0}': expected CIDR notation like 192.168.1.0/24")]
    InvalidSubnet(String),

    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),

    #[error("invalid mode selection '{0}': expected a number from 1 to 4")]
    InvalidMode(String),

    #[error("address file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read address file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("address file {} contains no addresses", .0.display())]
    EmptyInput(PathBuf),
}
