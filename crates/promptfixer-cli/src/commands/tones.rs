//! The `promptfixer tones` command.

use anyhow::Result;
use comfy_table::Table;

use promptfixer_core::model::ToneMode;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Tone", "Style"]);
    for tone in ToneMode::ALL {
        table.add_row(vec![tone.to_string(), tone.description().to_string()]);
    }
    println!("{table}");
    Ok(())
}
