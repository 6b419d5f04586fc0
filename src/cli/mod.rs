//! CLI subcommand implementations for the slotpulse binary.

pub mod aggregate_cmd;
pub mod harvest_cmd;
