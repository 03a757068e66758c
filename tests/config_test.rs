/// Tests for config layering: CLI args beat config.toml, which beats defaults.
use std::fs;
use task_cli::config::AppConfig;
use tempfile::TempDir;

#[test]
fn defaults_apply_without_config_file() {
    let dir = TempDir::new().unwrap();
    let cfg = AppConfig::new(Some(dir.path().to_path_buf()), None, None);

    assert_eq!(cfg.data_dir, dir.path());
    assert_eq!(cfg.tasks_file, dir.path().join("tasks.json"));
    assert_eq!(cfg.log, "info");
}

#[test]
fn toml_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "tasks_file = \"/tmp/elsewhere/tasks.json\"\nlog = \"debug\"\n",
    )
    .unwrap();

    let cfg = AppConfig::new(Some(dir.path().to_path_buf()), None, None);
    assert_eq!(
        cfg.tasks_file,
        std::path::PathBuf::from("/tmp/elsewhere/tasks.json")
    );
    assert_eq!(cfg.log, "debug");
}

#[test]
fn cli_args_beat_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "tasks_file = \"/tmp/elsewhere/tasks.json\"\nlog = \"debug\"\n",
    )
    .unwrap();

    let cli_file = dir.path().join("cli-override.json");
    let cfg = AppConfig::new(
        Some(dir.path().to_path_buf()),
        Some(cli_file.clone()),
        Some("warn".to_string()),
    );
    assert_eq!(cfg.tasks_file, cli_file);
    assert_eq!(cfg.log, "warn");
}

#[test]
fn invalid_toml_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "not = [valid").unwrap();

    let cfg = AppConfig::new(Some(dir.path().to_path_buf()), None, None);
    assert_eq!(cfg.tasks_file, dir.path().join("tasks.json"));
    assert_eq!(cfg.log, "info");
}
