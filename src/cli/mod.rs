pub mod commands;
pub mod core;
pub mod format;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod shell;
pub mod table;

pub use core::{CliError, CliMode, CommandError, CommandResult, LoopControl, ShellContext};
pub use shell::run_cli;
