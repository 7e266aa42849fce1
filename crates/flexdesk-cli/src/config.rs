// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use flexdesk_app::PageKind;
use flexdesk_app::validation::PAGE_SIZE_CHOICES;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "flexdesk";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_DASHBOARD_PAGE_SIZE: usize = 5;
const DEFAULT_MARKETPLACE_PAGE_SIZE: usize = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub listings_path: Option<String>,
    pub assets_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_page: Option<String>,
    pub dashboard_page_size: Option<usize>,
    pub marketplace_page_size: Option<usize>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_page: Some(PageKind::Dashboard.as_str().to_owned()),
            dashboard_page_size: Some(DEFAULT_DASHBOARD_PAGE_SIZE),
            marketplace_page_size: Some(DEFAULT_MARKETPLACE_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FLEXDESK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FLEXDESK_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [data], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(start) = &self.ui.start_page
            && PageKind::parse(start).is_none()
        {
            bail!(
                "ui.start_page in {} must be one of {}, got {start:?}",
                path.display(),
                page_names()
            );
        }

        for (key, size) in [
            ("dashboard_page_size", self.ui.dashboard_page_size),
            ("marketplace_page_size", self.ui.marketplace_page_size),
        ] {
            if let Some(size) = size
                && !PAGE_SIZE_CHOICES.contains(&size)
            {
                bail!(
                    "ui.{key} in {} must be one of {:?}, got {size}",
                    path.display(),
                    PAGE_SIZE_CHOICES
                );
            }
        }

        for (key, value) in [
            ("data.listings_path", &self.data.listings_path),
            ("data.assets_path", &self.data.assets_path),
            ("log.file", &self.log.file),
        ] {
            if value.as_deref().is_some_and(|value| value.trim().is_empty()) {
                bail!(
                    "{key} in {} is empty; remove the key to use the default",
                    path.display()
                );
            }
        }

        Ok(())
    }

    pub fn start_page(&self) -> PageKind {
        self.ui
            .start_page
            .as_deref()
            .and_then(PageKind::parse)
            .unwrap_or(PageKind::Dashboard)
    }

    pub fn dashboard_page_size(&self) -> usize {
        self.ui
            .dashboard_page_size
            .unwrap_or(DEFAULT_DASHBOARD_PAGE_SIZE)
    }

    pub fn marketplace_page_size(&self) -> usize {
        self.ui
            .marketplace_page_size
            .unwrap_or(DEFAULT_MARKETPLACE_PAGE_SIZE)
    }

    pub fn listings_path(&self) -> Option<PathBuf> {
        self.data.listings_path.as_deref().map(PathBuf::from)
    }

    pub fn assets_path(&self) -> Option<PathBuf> {
        self.data.assets_path.as_deref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(path) => Ok(PathBuf::from(path)),
            None => {
                let data_root = dirs::data_dir().ok_or_else(|| {
                    anyhow!("cannot resolve data directory; set [log].file in the config")
                })?;
                Ok(data_root.join(APP_NAME).join("flexdesk.log"))
            }
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# flexdesk config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Tables without a path use the built-in sample rows.\n# listings_path = \"/path/to/listings.json\"\n# assets_path = \"/path/to/assets.json\"\n\n[ui]\n# One of: {}\nstart_page = \"dashboard\"\ndashboard_page_size = {}\nmarketplace_page_size = {}\n\n[log]\nlevel = \"{}\"\n# file = \"/path/to/flexdesk.log\"\n",
            path.display(),
            page_names(),
            DEFAULT_DASHBOARD_PAGE_SIZE,
            DEFAULT_MARKETPLACE_PAGE_SIZE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn page_names() -> String {
    PageKind::ALL
        .iter()
        .map(|page| page.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use flexdesk_app::PageKind;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_page(), PageKind::Dashboard);
        assert_eq!(config.dashboard_page_size(), 5);
        assert_eq!(config.marketplace_page_size(), 10);
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.listings_path(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nstart_page = \"marketplace\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[data], [ui], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[data]\nlistings_path = \"/data/listings.json\"\n[ui]\nstart_page = \"marketplace\"\nmarketplace_page_size = 20\n[log]\nlevel = \"debug\"\nfile = \"/tmp/flexdesk-test.log\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_page(), PageKind::Marketplace);
        assert_eq!(config.marketplace_page_size(), 20);
        assert_eq!(config.dashboard_page_size(), 5);
        assert_eq!(
            config.listings_path(),
            Some(PathBuf::from("/data/listings.json"))
        );
        assert_eq!(config.assets_path(), None);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_file()?, PathBuf::from("/tmp/flexdesk-test.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn page_size_outside_choices_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ndashboard_page_size = 7\n")?;
        let error = Config::load(&path).expect_err("page size 7 should fail");
        let message = error.to_string();
        assert!(message.contains("ui.dashboard_page_size"), "{message}");
        assert!(message.contains("[5, 10, 20, 50, 100]"), "{message}");
        Ok(())
    }

    #[test]
    fn unknown_start_page_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_page = \"disputes\"\n")?;
        let error = Config::load(&path).expect_err("unknown page should fail");
        let message = error.to_string();
        assert!(message.contains("ui.start_page"), "{message}");
        assert!(message.contains("delivery-details"), "{message}");
        Ok(())
    }

    #[test]
    fn empty_paths_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[data]\nassets_path = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank path should fail");
        assert!(error.to_string().contains("data.assets_path"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("FLEXDESK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("FLEXDESK_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("FLEXDESK_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("flexdesk/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips() -> Result<()> {
        let (_temp, path) = write_config("")?;
        let example = Config::example_config(&path);
        assert!(example.contains("[data]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_page(), PageKind::Dashboard);
        assert_eq!(config.dashboard_page_size(), 5);
        Ok(())
    }
}
