//! Config command implementation

use crate::context::AppContext;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ConfigOutput};
use anyhow::Result;
use std::collections::BTreeMap;

pub fn execute(context: &AppContext, output: &OutputWriter) -> Result<()> {
    let values: BTreeMap<String, ConfigEntry> = context
        .config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| {
            let entry = ConfigEntry::new(&key, value, source);
            (key, entry)
        })
        .collect();

    let config_file = context.config_path.as_ref().map(|path| path.display().to_string());
    let state_file = context.state_path().display().to_string();

    if output.is_json() {
        output.result(ConfigOutput { config_file, state_file, values })?;
    } else {
        output.section("Configuration");
        output.kv("Config File", config_file.as_deref().unwrap_or("(none)"));
        output.kv("State File", &state_file);
        output.table(values.into_values().collect())?;
    }

    Ok(())
}
