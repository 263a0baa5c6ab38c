//! Integration tests for configuration and catalog loading.

use easel::catalog::Catalog;
use easel::cli::RunContext;
use easel::config::{ConfigLoader, EaselConfig};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_and_catalog_files_compose() {
    let temp = TempDir::new().unwrap();
    let catalog_path = temp.path().join("catalog.toml");
    std::fs::write(
        &catalog_path,
        r#"
[[zones]]
slug = "meadow"

[zones.scene]
output_name = "meadow-scene"
prompt = "A wildflower meadow scene"

[zones.background]
output_name = "meadow-background"
prompt = "A wildflower meadow backdrop"

[[zones.wildlife]]
id = "pocket-gopher"
name = "Pocket Gopher"
prompt = "A pocket gopher"
"#,
    )
    .unwrap();

    let config_path = temp.path().join("easel.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
assets_root = "{}"
catalog_file = "{}"

[generation]
concurrency = 3

[generation.models]
background = "imagen-test-model"
"#,
            temp.path().join("assets").display(),
            catalog_path.display()
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_path).unwrap();
    assert_eq!(config.generation.concurrency, 3);
    assert_eq!(config.generation.models.background, "imagen-test-model");

    let catalog = Catalog::from_toml_file(config.catalog_file.as_ref().unwrap()).unwrap();
    assert_eq!(catalog.slugs(), vec!["meadow"]);

    let ctx = RunContext::with_parts(config, catalog);
    assert_eq!(ctx.config().generation.concurrency, 3);
}

#[test]
fn test_discovery_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.assets_root, PathBuf::from("public/assets"));
    assert!(config.catalog_file.is_none());
}

#[test]
fn test_discovery_picks_up_easel_toml() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("easel.toml"),
        "assets_root = \"art\"\n",
    )
    .unwrap();
    let config = ConfigLoader::load(temp.path()).unwrap();
    assert_eq!(config.assets_root, PathBuf::from("art"));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("easel.toml");
    std::fs::write(&path, "[generation]\nconcurrency = 0\n").unwrap();
    assert!(ConfigLoader::load_from_file(&path).is_err());
}

#[test]
fn test_default_config_validates() {
    assert!(EaselConfig::default().validate().is_ok());
}
