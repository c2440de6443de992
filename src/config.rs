use crate::session::{OverlayConfig, DEFAULT_DASHBOARD_PATH};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub overlay: OverlaySettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct OverlaySettings {
    pub dashboard_path: String,
    pub emergency_ack_ms: u64,
    pub tick_ms: u64,
}

impl OverlaySettings {
    /// Template for overlays mounted by the server; each mount gets a new id
    pub fn to_overlay_config(&self) -> OverlayConfig {
        OverlayConfig {
            dashboard_path: self.dashboard_path.clone(),
            emergency_ack_window: Duration::from_millis(self.emergency_ack_ms),
            tick_period: Duration::from_millis(self.tick_ms),
            ..OverlayConfig::default()
        }
    }
}

impl Config {
    /// Load defaults, then `path` (if present), then `HEALTHVITALS__*` env vars
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "healthvitals-overlay")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 5001)?
            .set_default("overlay.dashboard_path", DEFAULT_DASHBOARD_PATH)?
            .set_default("overlay.emergency_ack_ms", 2000)?
            .set_default("overlay.tick_ms", 1000)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("HEALTHVITALS").separator("__"))
            .build()
            .with_context(|| format!("Failed to read config from {}", path))?;

        let cfg: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        if cfg.overlay.tick_ms == 0 {
            anyhow::bail!("overlay.tick_ms must be greater than zero");
        }

        Ok(cfg)
    }
}
