// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use flexdesk_app::TableView;
use flexdesk_data::{Dataset, RecordSource};
use flexdesk_tui::{PageContent, PageTables};

/// Feeds the terminal UI from a record source.
pub struct DataRuntime<S> {
    source: S,
    dashboard_page_size: usize,
    marketplace_page_size: usize,
}

impl<S: RecordSource> DataRuntime<S> {
    pub fn new(source: S, dashboard_page_size: usize, marketplace_page_size: usize) -> Self {
        Self {
            source,
            dashboard_page_size,
            marketplace_page_size,
        }
    }
}

impl<S: RecordSource> flexdesk_tui::AppRuntime for DataRuntime<S> {
    fn load_tables(&mut self) -> Result<PageTables> {
        let dataset = Dataset::load(&self.source)
            .with_context(|| format!("load records from {}", self.source.name()))?;
        Ok(PageTables {
            dashboard: TableView::new("dashboard", dataset.assets, self.dashboard_page_size)?,
            marketplace: TableView::new(
                "marketplace",
                dataset.listings,
                self.marketplace_page_size,
            )?,
        })
    }

    fn load_content(&mut self) -> Result<PageContent> {
        Ok(PageContent {
            stats: flexdesk_data::dashboard_stats(),
            overview: flexdesk_data::marketplace_overview(),
            detail: flexdesk_data::delivery_detail(),
            notifications: flexdesk_data::notifications(),
            admin: flexdesk_data::admin_profile(),
        })
    }
}
