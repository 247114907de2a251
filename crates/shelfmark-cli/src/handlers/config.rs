use crate::args::ConfigCommand;
use crate::types::OutputFormat;
use anyhow::Result;
use shelfmark_runtime::EngineConfig;
use std::path::Path;

pub fn handle(config_path: &Path, command: ConfigCommand, format: OutputFormat) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let config = EngineConfig::load_from(config_path)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                OutputFormat::Plain => print!("{}", toml::to_string_pretty(&config)?),
            }
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            EngineConfig::default().save_to(config_path)?;
            if format == OutputFormat::Plain {
                println!("Wrote {}", config_path.display());
            }
            Ok(())
        }
    }
}
