//! Birthday sync command line application
//!
//! Argument parsing and the wiring of configuration, adapters and the
//! sync service. The binary in `main.rs` only sets up logging.

pub mod cli;
pub mod sync;

pub use cli::Cli;
pub use sync::{build_service, resolve_config, run};
