use crate::args::WindowArgs;
use crate::types::OutputFormat;
use anyhow::Result;
use shelfmark_engine::{WindowLayout, compute_window};
use shelfmark_runtime::EngineConfig;

pub fn handle(config: &EngineConfig, args: WindowArgs, format: OutputFormat) -> Result<()> {
    let layout = WindowLayout::new(
        args.container_height.unwrap_or(config.container_height),
        args.item_height.unwrap_or(config.item_height),
        args.overscan.unwrap_or(config.overscan),
    );
    let window = compute_window(args.count, layout, args.offset);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&window)?),
        OutputFormat::Plain => {
            println!("start_index:   {}", window.start_index);
            println!("end_index:     {}", window.end_index);
            println!("total_height:  {}", window.total_height);
            println!("render_offset: {}", window.render_offset);
        }
    }

    Ok(())
}
