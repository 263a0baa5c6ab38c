//! CLI surface tests: flag and subcommand parsing.

use clap::Parser;
use easel::cli::{Cli, Commands};

#[test]
fn test_scenes_with_zone_args() {
    let cli = Cli::try_parse_from(["easel", "scenes", "sky", "forest"]).unwrap();
    match cli.command {
        Commands::Scenes { zones, model } => {
            assert_eq!(zones, vec!["sky", "forest"]);
            assert!(model.is_none());
        }
        _ => panic!("expected scenes"),
    }
}

#[test]
fn test_scenes_defaults_to_no_zones() {
    let cli = Cli::try_parse_from(["easel", "scenes"]).unwrap();
    match cli.command {
        Commands::Scenes { zones, .. } => assert!(zones.is_empty()),
        _ => panic!("expected scenes"),
    }
}

#[test]
fn test_sprites_creature_filter() {
    let cli =
        Cli::try_parse_from(["easel", "sprites", "coastal", "--creature", "sea-otter"]).unwrap();
    match cli.command {
        Commands::Sprites {
            zones, creature, ..
        } => {
            assert_eq!(zones, vec!["coastal"]);
            assert_eq!(creature.as_deref(), Some("sea-otter"));
        }
        _ => panic!("expected sprites"),
    }
}

#[test]
fn test_backgrounds_style_transfer_flag() {
    let cli = Cli::try_parse_from(["easel", "backgrounds", "--style-transfer"]).unwrap();
    match cli.command {
        Commands::Backgrounds { style_transfer, .. } => assert!(style_transfer),
        _ => panic!("expected backgrounds"),
    }
}

#[test]
fn test_global_overrides() {
    let cli = Cli::try_parse_from([
        "easel",
        "--assets-root",
        "art",
        "--concurrency",
        "8",
        "--verbose",
        "scenes",
        "sky",
    ])
    .unwrap();
    assert_eq!(cli.assets_root.as_deref(), Some(std::path::Path::new("art")));
    assert_eq!(cli.concurrency, Some(8));
    assert!(cli.verbose);
}

#[test]
fn test_list_format_defaults_to_text() {
    let cli = Cli::try_parse_from(["easel", "list"]).unwrap();
    match cli.command {
        Commands::List { format } => assert_eq!(format, "text"),
        _ => panic!("expected list"),
    }
}
