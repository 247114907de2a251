use crate::args::PresetCommand;
use crate::output::Palette;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use shelfmark_sdk::{FilterPreset, OwnerContext, PRESETS_FILE, load_presets, save_presets};
use shelfmark_types::PresetStore;
use std::path::Path;

pub fn handle(data_dir: &Path, command: PresetCommand, format: OutputFormat) -> Result<()> {
    let path = data_dir.join(PRESETS_FILE);
    let mut store = PresetStore::from_presets(OwnerContext::local(), load_presets(&path)?)?;

    match command {
        PresetCommand::List => print_list(store.list(), format),

        PresetCommand::Save { name, criteria } => {
            let criteria = criteria.to_criteria(Utc::now())?;
            let saved = store.save(&name, criteria, Utc::now())?.clone();
            save_presets(&path, store.list())?;
            tracing::info!(preset = %saved.name, "saved preset");
            print_one(&saved, format)
        }

        PresetCommand::Show { name } => {
            let preset = find(&store, &name)?;
            print_one(preset, format)
        }

        PresetCommand::Delete { name } => {
            let id = find(&store, &name)?.id;
            let removed = store.delete(id)?;
            save_presets(&path, store.list())?;
            if format == OutputFormat::Plain {
                println!("Deleted preset '{}'", removed.name);
            }
            Ok(())
        }
    }
}

fn find<'a>(store: &'a PresetStore, name: &str) -> Result<&'a FilterPreset> {
    store
        .find_by_name(name)
        .with_context(|| format!("No preset named '{}'", name))
}

fn print_list(presets: &[FilterPreset], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = Value::Array(presets.iter().map(FilterPreset::to_json).collect());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Plain => {
            if presets.is_empty() {
                println!("No presets saved");
            }
            let palette = Palette::detect();
            for preset in presets {
                println!(
                    "{} {}",
                    palette.bold(&preset.name),
                    palette.dim(&format!(
                        "({} filters)",
                        preset.criteria.active_filter_count()
                    ))
                );
            }
        }
    }
    Ok(())
}

fn print_one(preset: &FilterPreset, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preset.to_json())?),
        OutputFormat::Plain => {
            println!("{}", preset.name);
            println!(
                "{}",
                serde_json::to_string_pretty(&preset.criteria.to_json())?
            );
        }
    }
    Ok(())
}
