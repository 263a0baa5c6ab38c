//! CLI route: single route table and run context. Builds task sets from the
//! catalog, wires provider + invoker + runner, and hands results to the
//! summary. Pre-flight checks (credential, requested zones) happen here,
//! before anything is scheduled.

use crate::catalog::{Catalog, ZoneEntry};
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_catalog_json, format_catalog_text, ConsoleObserver};
use crate::config::{ConfigLoader, EaselConfig};
use crate::error::{ConfigError, GenerateError};
use crate::invoker::AssetInvoker;
use crate::provider::{AspectRatio, GeminiImageClient, ImageProvider, ImagenClient};
use crate::runner::{TaskRunner, TaskSpec};
use crate::summary::RunSummary;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Rendered command output plus whether the process should exit zero.
/// A generation run only fails as a whole when every task failed.
#[derive(Debug)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

enum ProviderChoice {
    Imagen(String),
    Gemini(Vec<String>),
}

/// Runtime context for CLI execution: merged config and the active catalog.
pub struct RunContext {
    config: EaselConfig,
    catalog: Catalog,
}

impl RunContext {
    /// Create run context from an optional explicit config path. The catalog
    /// comes from `catalog_file` when configured, otherwise the built-in one.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(Path::new("."))?,
        };
        let catalog = match &config.catalog_file {
            Some(path) => Catalog::from_toml_file(path)?,
            None => Catalog::builtin(),
        };
        Ok(Self { config, catalog })
    }

    /// Assemble a context from already-loaded parts.
    pub fn with_parts(config: EaselConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &EaselConfig {
        &self.config
    }

    /// Apply CLI flag overrides on top of the loaded config.
    pub fn apply_overrides(
        &mut self,
        assets_root: Option<PathBuf>,
        concurrency: Option<usize>,
    ) -> Result<(), ConfigError> {
        if let Some(root) = assets_root {
            self.config.assets_root = root;
        }
        if let Some(n) = concurrency {
            if n == 0 {
                return Err(ConfigError::InvalidValue(
                    "--concurrency must be at least 1".to_string(),
                ));
            }
            self.config.generation.concurrency = n;
        }
        Ok(())
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute(&self, command: &Commands) -> Result<CommandOutput, GenerateError> {
        match command {
            Commands::List { format } => {
                if format == "json" {
                    Ok(CommandOutput::ok(format_catalog_json(&self.catalog)?))
                } else {
                    Ok(CommandOutput::ok(format_catalog_text(&self.catalog)))
                }
            }
            Commands::Scenes { zones, model } => {
                let zones = self.select_zones(zones)?;
                let model = model
                    .clone()
                    .unwrap_or_else(|| self.config.generation.models.scene.clone());
                let tasks = self.scene_tasks(&zones);
                self.run_generation(ProviderChoice::Imagen(model), tasks)
                    .await
            }
            Commands::Backgrounds {
                zones,
                style_transfer,
                model,
            } => {
                let zones = self.select_zones(zones)?;
                let tasks = self.background_tasks(&zones, *style_transfer);
                let choice = if *style_transfer {
                    let models = match model {
                        Some(m) => vec![m.clone()],
                        None => self.config.generation.models.style_transfer.clone(),
                    };
                    ProviderChoice::Gemini(models)
                } else {
                    ProviderChoice::Imagen(
                        model
                            .clone()
                            .unwrap_or_else(|| self.config.generation.models.background.clone()),
                    )
                };
                self.run_generation(choice, tasks).await
            }
            Commands::Sprites {
                zones,
                creature,
                model,
            } => {
                let explicit = !zones.is_empty();
                let zones = self.select_zones(zones)?;
                let model = model
                    .clone()
                    .unwrap_or_else(|| self.config.generation.models.sprite.clone());
                let tasks = self.sprite_tasks(&zones, creature.as_deref(), explicit);
                self.run_generation(ProviderChoice::Imagen(model), tasks)
                    .await
            }
        }
    }

    /// Resolve the requested zone slugs against the catalog. No arguments
    /// means every known zone; a slug the catalog does not know is a fatal
    /// configuration error. Repeated slugs collapse to one so the runner
    /// never sees duplicate (zone, item) keys.
    fn select_zones(&self, requested: &[String]) -> Result<Vec<&ZoneEntry>, ConfigError> {
        if requested.is_empty() {
            return Ok(self.catalog.zones.iter().collect());
        }
        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for slug in requested {
            if !seen.insert(slug.as_str()) {
                continue;
            }
            let zone = self
                .catalog
                .zone(slug)
                .ok_or_else(|| ConfigError::UnknownZone(slug.clone()))?;
            selected.push(zone);
        }
        Ok(selected)
    }

    fn zone_destination(&self, zone: &ZoneEntry) -> PathBuf {
        self.config.assets_root.join(&zone.slug)
    }

    fn scene_tasks(&self, zones: &[&ZoneEntry]) -> Vec<TaskSpec> {
        zones
            .iter()
            .map(|zone| TaskSpec {
                zone: zone.slug.clone(),
                item_id: zone.scene.output_name.clone(),
                prompt: zone.scene.prompt.clone(),
                aspect: AspectRatio::Wide16x9,
                reference: None,
                destination: self.zone_destination(zone),
            })
            .collect()
    }

    fn background_tasks(&self, zones: &[&ZoneEntry], style_transfer: bool) -> Vec<TaskSpec> {
        zones
            .iter()
            .map(|zone| {
                let reference = if style_transfer {
                    match &zone.reference {
                        Some(rel) => Some(self.config.assets_root.join(rel)),
                        None => {
                            tracing::warn!(
                                zone = %zone.slug,
                                "no reference image in catalog, generating from prompt only"
                            );
                            None
                        }
                    }
                } else {
                    None
                };
                TaskSpec {
                    zone: zone.slug.clone(),
                    item_id: zone.background.output_name.clone(),
                    prompt: zone.background.prompt.clone(),
                    aspect: AspectRatio::Wide16x9,
                    reference,
                    destination: self.zone_destination(zone),
                }
            })
            .collect()
    }

    fn sprite_tasks(
        &self,
        zones: &[&ZoneEntry],
        creature: Option<&str>,
        explicit: bool,
    ) -> Vec<TaskSpec> {
        let mut tasks = Vec::new();
        for zone in zones {
            if zone.wildlife.is_empty() {
                if explicit {
                    tracing::warn!(zone = %zone.slug, "zone has no wildlife, skipping");
                }
                continue;
            }
            let creatures: Vec<_> = match creature {
                Some(id) => zone.wildlife.iter().filter(|c| c.id == id).collect(),
                None => zone.wildlife.iter().collect(),
            };
            if creatures.is_empty() {
                tracing::warn!(
                    zone = %zone.slug,
                    creature = %creature.unwrap_or_default(),
                    "creature not found in zone, skipping"
                );
                continue;
            }
            for spec in creatures {
                tasks.push(TaskSpec {
                    zone: zone.slug.clone(),
                    item_id: spec.id.clone(),
                    prompt: spec.prompt.clone(),
                    aspect: AspectRatio::Square1x1,
                    reference: None,
                    destination: self.zone_destination(zone),
                });
            }
        }
        tasks
    }

    async fn run_generation(
        &self,
        choice: ProviderChoice,
        tasks: Vec<TaskSpec>,
    ) -> Result<CommandOutput, GenerateError> {
        // credential is a pre-flight check: nothing runs without it
        let api_key = self.config.resolve_api_key()?;
        let endpoint = self.config.generation.endpoint.clone();
        let provider: Arc<dyn ImageProvider> = match choice {
            ProviderChoice::Imagen(model) => {
                Arc::new(ImagenClient::new(model, api_key, endpoint)?)
            }
            ProviderChoice::Gemini(models) => {
                Arc::new(GeminiImageClient::new(models, api_key, endpoint)?)
            }
        };

        tracing::info!(
            total = tasks.len(),
            concurrency = self.config.generation.concurrency,
            provider = provider.provider_name(),
            model = provider.model_name(),
            "starting generation run"
        );

        let invoker = Arc::new(AssetInvoker::new(provider));
        let runner = TaskRunner::with_observer(
            self.config.generation.concurrency,
            Arc::new(ConsoleObserver),
        );
        let results = runner.run(invoker, tasks).await;

        let summary = RunSummary::from_results(&results);
        Ok(CommandOutput {
            text: summary.render(),
            success: !summary.all_failed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> RunContext {
        RunContext::with_parts(EaselConfig::default(), Catalog::builtin())
    }

    #[test]
    fn test_select_zones_defaults_to_all() {
        let ctx = context();
        let zones = ctx.select_zones(&[]).unwrap();
        assert_eq!(zones.len(), 5);
    }

    #[test]
    fn test_select_zones_unknown_is_fatal() {
        let ctx = context();
        let err = ctx.select_zones(&["datacenter".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownZone(_)));
    }

    #[test]
    fn test_select_zones_collapses_duplicates() {
        let ctx = context();
        let zones = ctx
            .select_zones(&["sky".to_string(), "sky".to_string()])
            .unwrap();
        assert_eq!(zones.len(), 1);
    }

    #[test]
    fn test_scene_tasks_one_per_zone() {
        let ctx = context();
        let zones = ctx.select_zones(&[]).unwrap();
        let tasks = ctx.scene_tasks(&zones);
        assert_eq!(tasks.len(), 5);
        assert!(tasks
            .iter()
            .all(|t| t.aspect == AspectRatio::Wide16x9 && t.reference.is_none()));
        assert_eq!(tasks[0].item_id, "sky-scene-pixar");
        assert_eq!(tasks[0].destination, PathBuf::from("public/assets/sky"));
    }

    #[test]
    fn test_background_tasks_resolve_reference_under_assets_root() {
        let ctx = context();
        let zones = ctx.select_zones(&["rocky".to_string()]).unwrap();
        let tasks = ctx.background_tasks(&zones, true);
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].reference.as_deref(),
            Some(Path::new("public/assets/rocky/rocky-climb-v2.png"))
        );

        let plain = ctx.background_tasks(&zones, false);
        assert!(plain[0].reference.is_none());
    }

    #[test]
    fn test_sprite_tasks_default_skips_zones_without_wildlife() {
        let ctx = context();
        let zones = ctx.select_zones(&[]).unwrap();
        let tasks = ctx.sprite_tasks(&zones, None, false);
        assert_eq!(tasks.len(), 10);
        assert!(tasks.iter().all(|t| t.zone != "burrows"));
        assert!(tasks.iter().all(|t| t.aspect == AspectRatio::Square1x1));
    }

    #[test]
    fn test_sprite_tasks_creature_filter() {
        let ctx = context();
        let zones = ctx.select_zones(&[]).unwrap();
        let tasks = ctx.sprite_tasks(&zones, Some("sea-otter"), false);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].zone, "coastal");

        // filter that matches nothing anywhere: warn-and-skip, not an error
        let none = ctx.sprite_tasks(&zones, Some("jackalope"), false);
        assert!(none.is_empty());
    }

    #[test]
    fn test_apply_overrides_rejects_zero_concurrency() {
        let mut ctx = context();
        assert!(ctx.apply_overrides(None, Some(0)).is_err());
        assert!(ctx.apply_overrides(Some(PathBuf::from("/tmp/x")), Some(2)).is_ok());
        assert_eq!(ctx.config().generation.concurrency, 2);
        assert_eq!(ctx.config().assets_root, PathBuf::from("/tmp/x"));
    }

    #[tokio::test]
    async fn test_list_command_renders_catalog() {
        let ctx = context();
        let out = ctx
            .execute(&Commands::List {
                format: "text".to_string(),
            })
            .await
            .unwrap();
        assert!(out.success);
        assert!(out.text.contains("coastal"));
    }

    #[tokio::test]
    async fn test_missing_credential_aborts_before_any_task() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = EaselConfig::default();
        config.assets_root = temp.path().join("assets");
        config.generation.api_key_env = "EASEL_TEST_NO_SUCH_KEY".to_string();
        let ctx = RunContext::with_parts(config, Catalog::builtin());

        let err = ctx
            .execute(&Commands::Scenes {
                zones: vec![],
                model: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Config(ConfigError::MissingApiKey(_))
        ));
        // nothing was scheduled, nothing was written
        assert!(!temp.path().join("assets").exists());
    }
}
