// Tests for configuration loading

use anyhow::Result;
use healthvitals_overlay::Config;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("missing");

    let cfg = Config::load(path.to_str().unwrap())?;
    assert_eq!(cfg.service.name, "healthvitals-overlay");
    assert_eq!(cfg.service.http.port, 5001);
    assert_eq!(cfg.overlay.dashboard_path, "/main-dashboard");
    assert_eq!(cfg.overlay.emergency_ack_ms, 2000);
    assert_eq!(cfg.overlay.tick_ms, 1000);

    Ok(())
}

#[test]
fn test_file_overrides_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("overlay.toml");
    fs::write(
        &path,
        r#"
[service.http]
port = 8080

[overlay]
dashboard_path = "/home-dashboard"
emergency_ack_ms = 3000
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;
    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.overlay.dashboard_path, "/home-dashboard");

    let overlay = cfg.overlay.to_overlay_config();
    assert_eq!(overlay.emergency_ack_window, Duration::from_millis(3000));
    assert_eq!(overlay.tick_period, Duration::from_secs(1));
    assert!(overlay.session_id.starts_with("conversation-"));

    Ok(())
}

#[test]
fn test_zero_tick_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("overlay.toml");
    fs::write(&path, "[overlay]\ntick_ms = 0\n")?;

    assert!(Config::load(path.to_str().unwrap()).is_err());

    Ok(())
}
