use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;
use shelfmark_runtime::{EngineConfig, resolve_data_dir};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config_path = data_dir.join("config.toml");
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        Commands::List(args) => {
            let config = EngineConfig::load_from(&config_path)?;
            handlers::list::handle(&data_dir, config, args, cli.format)
        }

        Commands::Window(args) => {
            let config = EngineConfig::load_from(&config_path)?;
            handlers::window::handle(&config, args, cli.format)
        }

        Commands::Preset { command } => handlers::preset::handle(&data_dir, command, cli.format),

        Commands::Config { command } => handlers::config::handle(&config_path, command, cli.format),
    }
}
