//! CLI subcommands.

pub mod replay;
pub mod seed;
