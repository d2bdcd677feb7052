//! Command Line Interface (CLI) layer.
//!
//! Defines argument parsing (`args`) and the orchestration logic (`runner`)
//! that wires the command line to `ctl2envi::api`. When embedding the
//! converter in another application, use the library API directly.
pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
