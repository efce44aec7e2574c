// src/config/validate.rs

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile, RendererConfig, ServerSection};
use crate::errors::{GatewayError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::GatewayError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let bind = validate_bind(&raw.server.bind)?;
        validate_renderer(&raw)?;

        Ok(ConfigFile::new_unchecked(
            ServerSection { bind },
            RendererConfig {
                executable: PathBuf::from(raw.renderer.executable),
                wait_timeout: Duration::from_millis(raw.renderer.wait_timeout_ms),
            },
        ))
    }
}

fn validate_bind(bind: &str) -> Result<SocketAddr> {
    bind.trim().parse::<SocketAddr>().map_err(|e| {
        GatewayError::ConfigError(format!(
            "[server].bind must be a socket address like \"0.0.0.0:8080\" (got {bind:?}: {e})"
        ))
    })
}

fn validate_renderer(cfg: &RawConfigFile) -> Result<()> {
    if cfg.renderer.executable.trim().is_empty() {
        return Err(GatewayError::ConfigError(
            "[renderer].executable must not be empty".to_string(),
        ));
    }

    if cfg.renderer.wait_timeout_ms == 0 {
        return Err(GatewayError::ConfigError(
            "[renderer].wait_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
