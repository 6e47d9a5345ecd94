use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_custom_config_relocates_history() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    let history_dir = temp_path.join("state");

    let config_path = temp_path.join("custom.toml");
    let config_content = format!(
        r#"
version = 1
[history]
log_file = '{}'
store_file = '{}'
"#,
        history_dir.join("log.eas").display(),
        history_dir.join("table.json").display()
    );
    std::fs::write(&config_path, config_content).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_easier"))
        .args(["--config", config_path.to_str().unwrap(), "-v"])
        .current_dir(temp_path)
        .env("HOME", temp_path)
        .output()
        .expect("Failed to run easier");

    assert!(output.status.success());
    let log = std::fs::read_to_string(history_dir.join("log.eas")).unwrap();
    assert!(log.ends_with(" - -v\n"));
    assert!(history_dir.join("table.json").exists());
    assert!(!temp_path.join("command_history.eas").exists());
}

#[test]
fn test_history_disabled_by_environment() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();

    let output = Command::new(env!("CARGO_BIN_EXE_easier"))
        .arg("--version")
        .current_dir(temp_path)
        .env("HOME", temp_path)
        .env("EASIER_HISTORY__ENABLED", "false")
        .output()
        .expect("Failed to run easier");

    assert!(output.status.success());
    assert!(!temp_path.join("command_history.eas").exists());
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let temp_path = temp_dir.path();
    let config_dir = temp_path.join(".easier");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("settings.toml"), "[history\nenabled = ").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_easier"))
        .arg("-v")
        .current_dir(temp_path)
        .env("HOME", temp_path)
        .env_remove("EASIER_CONFIG")
        .output()
        .expect("Failed to run easier");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"));
    assert_eq!(
        std::fs::read_to_string(temp_path.join("command_history.eas"))
            .unwrap()
            .lines()
            .count(),
        1
    );
}
