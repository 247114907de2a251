mod args;
mod commands;
mod handlers;
pub mod logging;
mod output;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand, CriteriaArgs, PresetCommand};
pub use commands::run;
