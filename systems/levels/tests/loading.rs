use std::{fs, path::Path};

use maze_chase_core::HunterBehaviour;
use maze_chase_levels::{scaled_params, LevelCatalog, LevelConfigError};

#[test]
fn loads_toml_tables_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("levels.toml");
    fs::write(
        &path,
        r#"
        [[levels]]
        maze_size = [11, 11]
        wall_density = 0.0
        ghost_speed = 0.25
        ghost_behaviour = "simple_chase"
        number_of_ghosts = 1
        "#,
    )
    .expect("write config");

    let catalog = LevelCatalog::load(&path).expect("catalog loads");

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.params(1).maze_size, [11, 11]);
    assert_eq!(catalog.params(1).hunter_count, 1);
    assert_eq!(catalog.params(2), scaled_params(2));
}

#[test]
fn json_extension_selects_json_parser() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("level_config.JSON");
    fs::write(
        &path,
        r#"{"levels": [{"ghost_behaviour": "coordinated_attack"}]}"#,
    )
    .expect("write config");

    let catalog = LevelCatalog::load(&path).expect("catalog loads");

    assert_eq!(
        catalog.params(1).hunter_behaviour,
        HunterBehaviour::CoordinatedAttack
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let error = LevelCatalog::load(&path).expect_err("file is missing");

    assert!(matches!(error, LevelConfigError::Io { .. }));
    assert!(LevelCatalog::load_or_default(&path).is_empty());
}

#[test]
fn malformed_files_degrade_to_scaling() {
    let dir = tempfile::tempdir().expect("temp dir");
    let toml_path = dir.path().join("broken.toml");
    let json_path = dir.path().join("broken.json");
    fs::write(&toml_path, "[[levels]]\nmaze_size = \"big\"\n").expect("write config");
    fs::write(&json_path, "{\"levels\": [").expect("write config");

    assert!(matches!(
        LevelCatalog::load(&toml_path),
        Err(LevelConfigError::Toml { .. })
    ));
    assert!(matches!(
        LevelCatalog::load(&json_path),
        Err(LevelConfigError::Json { .. })
    ));

    let fallback = LevelCatalog::load_or_default(&toml_path);
    assert_eq!(fallback.params(3), scaled_params(3));
}

#[test]
fn bundled_table_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../levels/levels.toml");

    let catalog = LevelCatalog::load(&path).expect("bundled table loads");

    assert!(!catalog.is_empty());
    assert!(catalog
        .levels()
        .iter()
        .all(|level| level.maze_size.iter().all(|extent| *extent >= 3)));
}
