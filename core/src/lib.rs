pub mod probe;
pub mod report;
pub mod sweep;
