// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod catalog;
pub mod sample;

use anyhow::{Context, Result, bail};
use flexdesk_app::{Asset, Listing, RecordSet};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

pub use catalog::*;
pub use sample::{SampleSource, sample_assets, sample_listings};

/// Where the two tables get their rows.
pub trait RecordSource {
    fn name(&self) -> String;
    fn listings(&self) -> Result<Vec<Listing>>;
    fn assets(&self) -> Result<Vec<Asset>>;
}

/// JSON arrays on disk; a table without a path falls back to sample rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFileSource {
    pub listings_path: Option<PathBuf>,
    pub assets_path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(listings_path: Option<PathBuf>, assets_path: Option<PathBuf>) -> Self {
        Self {
            listings_path,
            assets_path,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listings_path.is_none() && self.assets_path.is_none()
    }
}

impl RecordSource for JsonFileSource {
    fn name(&self) -> String {
        let describe = |path: &Option<PathBuf>| {
            path.as_deref()
                .map_or_else(|| "sample".to_owned(), |path| path.display().to_string())
        };
        format!(
            "listings: {}, assets: {}",
            describe(&self.listings_path),
            describe(&self.assets_path)
        )
    }

    fn listings(&self) -> Result<Vec<Listing>> {
        match &self.listings_path {
            Some(path) => read_json_rows(path),
            None => SampleSource.listings(),
        }
    }

    fn assets(&self) -> Result<Vec<Asset>> {
        match &self.assets_path {
            Some(path) => read_json_rows(path),
            None => SampleSource.assets(),
        }
    }
}

pub fn read_json_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let body =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("parse {} as a JSON array of rows", path.display()))
}

/// Both tables, validated and ready for views.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub listings: RecordSet,
    pub assets: RecordSet,
}

impl Dataset {
    pub fn load(source: &dyn RecordSource) -> Result<Self> {
        let listings = source.listings().context("load listings")?;
        ensure_unique_ids("listing", listings.iter().map(|listing| listing.id.get()))?;
        let assets = source.assets().context("load assets")?;
        ensure_unique_ids("asset", assets.iter().map(|asset| asset.id.get()))?;

        info!(
            source = %source.name(),
            listings = listings.len(),
            assets = assets.len(),
            "records loaded"
        );
        Ok(Self {
            listings: RecordSet::from_rows(&listings),
            assets: RecordSet::from_rows(&assets),
        })
    }
}

fn ensure_unique_ids(kind: &str, ids: impl Iterator<Item = i64>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            bail!("duplicate {kind} id {id}; each row needs its own id");
        }
    }
    Ok(())
}
