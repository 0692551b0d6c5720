//! # recmeta-cli — Command Handlers
//!
//! One module per subcommand, each exposing a clap `Args` struct and a
//! `run` function. The binary in `main.rs` only assembles and dispatches.

pub mod channel_map;
pub mod export;
pub mod input;
pub mod report;
pub mod validate;
