// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FLEXDESK_LOG";

/// `FLEXDESK_LOG` wins over the configured level when set.
pub fn filter_directive(configured: &str, env_override: Option<&str>) -> String {
    match env_override.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => configured.trim().to_owned(),
    }
}

pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|error| anyhow!("invalid log filter {directive:?}: {error}"))
}

/// Log lines go to a file because the terminal is in raw mode.
pub fn init(level: &str, file: &Path) -> Result<()> {
    let env_override = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(level, env_override.as_deref());
    let filter = build_filter(&directive)?;

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("open log file {}", file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}
