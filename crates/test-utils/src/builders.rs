#![allow(dead_code)]

use std::path::Path;

use pdfgate::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn bind(mut self, addr: &str) -> Self {
        self.config.server.bind = addr.to_string();
        self
    }

    pub fn renderer(mut self, path: impl AsRef<Path>) -> Self {
        self.config.renderer.executable = path.as_ref().display().to_string();
        self
    }

    pub fn wait_timeout_ms(mut self, ms: u64) -> Self {
        self.config.renderer.wait_timeout_ms = ms;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
