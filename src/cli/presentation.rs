//! CLI presentation: catalog formatters and the inline progress printer.

use crate::catalog::Catalog;
use crate::error::{ConfigError, GenerateError};
use crate::runner::{RunObserver, TaskOutcome, TaskResult};
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_catalog_text(catalog: &Catalog) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Zone", "Scene", "Background", "Wildlife", "Reference"]);
    for zone in &catalog.zones {
        let wildlife = if zone.wildlife.is_empty() {
            "-".to_string()
        } else {
            zone.wildlife
                .iter()
                .map(|c| c.id.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        };
        let reference = zone
            .reference
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            zone.slug.clone(),
            zone.scene.output_name.clone(),
            zone.background.output_name.clone(),
            wildlife,
            reference,
        ]);
    }
    table.to_string()
}

pub fn format_catalog_json(catalog: &Catalog) -> Result<String, GenerateError> {
    serde_json::to_string_pretty(catalog).map_err(|e| {
        GenerateError::Config(ConfigError::InvalidValue(format!(
            "Failed to serialize catalog: {}",
            e
        )))
    })
}

/// Prints one marker line per finished task while the run is still going,
/// the way the summary will list them at the end.
pub struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn task_finished(&self, result: &TaskResult) {
        match &result.outcome {
            TaskOutcome::Success { output_path } => {
                println!(
                    "[{}] {} {}",
                    result.zone.to_uppercase(),
                    "✓".green(),
                    output_path.display()
                );
            }
            TaskOutcome::Failure { error } => {
                println!(
                    "[{}] {} {}: {}",
                    result.zone.to_uppercase(),
                    "✗".red(),
                    result.item_id,
                    error
                );
            }
        }
    }
}
