use std::{collections::HashMap, fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

use crate::error::ChannelError;

pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";
pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub origin: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.into(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn origin_url(&self) -> Result<Url, ChannelError> {
        Ok(Url::parse(self.origin.trim())?)
    }
}

/// Defaults, then `client.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE))?;
    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

/// A missing file leaves `settings` untouched.
pub fn apply_file(settings: &mut Settings, path: &Path) -> anyhow::Result<()> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };
    let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;

    if let Some(v) = file_cfg.get("origin") {
        settings.origin = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    Ok(())
}

pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CHESS_ORIGIN") {
        settings.origin = v;
    }
    if let Some(v) = lookup("APP__ORIGIN") {
        settings.origin = v;
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}
