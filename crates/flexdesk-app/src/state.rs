// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::PageKind;
use crate::nav::{QUICK_ACTIONS, Sidebar, SidebarRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Sidebar,
    Search,
    Filter,
    Columns,
    QuickActions,
    Notifications,
    Help,
}

impl AppMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nav => "NAV",
            Self::Sidebar => "MENU",
            Self::Search => "SEARCH",
            Self::Filter => "FILTER",
            Self::Columns => "COLUMNS",
            Self::QuickActions => "ACTIONS",
            Self::Notifications => "ALERTS",
            Self::Help => "HELP",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_page: PageKind,
    pub sidebar: Sidebar,
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(start: PageKind) -> Self {
        Self {
            mode: AppMode::Nav,
            active_page: start,
            sidebar: Sidebar::for_path(start.href()),
            status_line: None,
        }
    }

    /// Path used for sidebar highlighting.
    pub fn current_path(&self) -> &'static str {
        self.active_page.href()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PageKind::Dashboard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextPage,
    PrevPage,
    /// Follow a sidebar href; unknown routes only report status.
    Follow(&'static str),
    OpenDetail,
    EnterMode(AppMode),
    MoveSidebar(isize),
    ActivateSidebar,
    ToggleGroup(&'static str),
    RunQuickAction(usize),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    PageChanged(PageKind),
    GroupToggled {
        group: &'static str,
        expanded: bool,
    },
    SidebarMoved(usize),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        debug!(?command, "app command");
        match command {
            AppCommand::NextPage => self.rotate_page(1),
            AppCommand::PrevPage => self.rotate_page(-1),
            AppCommand::Follow(href) => match PageKind::from_href(href) {
                Some(page) => self.open_page(page),
                None => vec![self.set_status(&format!("page not available: {href}"))],
            },
            AppCommand::OpenDetail => self.open_page(PageKind::DeliveryDetails),
            AppCommand::EnterMode(mode) => {
                self.mode = mode;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::MoveSidebar(delta) => {
                vec![AppEvent::SidebarMoved(self.sidebar.move_cursor(delta))]
            }
            AppCommand::ActivateSidebar => match self.sidebar.current() {
                Some(SidebarRow::Group { label, .. }) => self.toggle_group(label),
                Some(SidebarRow::Link { link, .. }) => self.dispatch(AppCommand::Follow(link.href)),
                None => Vec::new(),
            },
            AppCommand::ToggleGroup(group) => self.toggle_group(group),
            AppCommand::RunQuickAction(index) => {
                let Some(action) = QUICK_ACTIONS.get(index) else {
                    return Vec::new();
                };
                self.mode = AppMode::Nav;
                vec![
                    AppEvent::ModeChanged(self.mode),
                    self.set_status(&format!("{action}: not connected")),
                ]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn open_page(&mut self, page: PageKind) -> Vec<AppEvent> {
        self.mode = AppMode::Nav;
        if self.active_page == page {
            return Vec::new();
        }
        self.active_page = page;
        vec![AppEvent::PageChanged(page)]
    }

    fn rotate_page(&mut self, delta: isize) -> Vec<AppEvent> {
        let pages = PageKind::ALL;
        let current = pages
            .iter()
            .position(|page| *page == self.active_page)
            .unwrap_or(0) as isize;
        let len = pages.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_page = pages[next];
        vec![AppEvent::PageChanged(self.active_page)]
    }

    fn toggle_group(&mut self, group: &'static str) -> Vec<AppEvent> {
        let expanded = self.sidebar.toggle(group);
        vec![AppEvent::GroupToggled { group, expanded }]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
