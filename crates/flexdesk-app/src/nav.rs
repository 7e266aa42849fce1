// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

pub const BRAND: &str = "FLEX Delivery";
pub const SEARCH_PLACEHOLDER: &str = "Search for anything";
pub const QUICK_ACTIONS: [&str; 4] = [
    "Send Email",
    "Schedule Meeting",
    "Generate Report",
    "System Settings",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub badge: Option<u32>,
}

impl NavLink {
    pub const fn new(label: &'static str, href: &'static str) -> Self {
        Self {
            label,
            href,
            badge: None,
        }
    }

    pub const fn with_badge(mut self, badge: u32) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Prefix match, so nested paths keep their parent highlighted.
    pub fn is_active(&self, path: &str) -> bool {
        path.starts_with(self.href)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Link(NavLink),
    Group {
        label: &'static str,
        links: &'static [NavLink],
    },
}

impl NavEntry {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Link(link) => link.label,
            Self::Group { label, .. } => *label,
        }
    }

    pub fn is_active(&self, path: &str) -> bool {
        match self {
            Self::Link(link) => link.is_active(path),
            Self::Group { links, .. } => links.iter().any(|link| link.is_active(path)),
        }
    }
}

pub const SIDEBAR: &[NavEntry] = &[
    NavEntry::Link(NavLink::new("Dashboard", "/dashboard")),
    NavEntry::Group {
        label: "Users",
        links: &[
            NavLink::new("All Users", "/users/all"),
            NavLink::new("Roles & Permissions", "/users/roles"),
        ],
    },
    NavEntry::Group {
        label: "All Listings",
        links: &[
            NavLink::new("Delivery Jobs", "/listings/delivery-jobs").with_badge(5),
            NavLink::new("Delivery Offers", "/listings/delivery-offers"),
            NavLink::new("Marketplace", "/listings/marketplace").with_badge(5),
            NavLink::new("Delivery Details", "/delivery-details"),
        ],
    },
    NavEntry::Link(NavLink::new("Flex Reward", "/flex-reward")),
    NavEntry::Link(NavLink::new("Disputes", "/disputes")),
    NavEntry::Group {
        label: "Transactions",
        links: &[NavLink::new("All Transactions", "/transactions/all")],
    },
    NavEntry::Link(NavLink::new("User Support Ticket", "/user-support-ticket-1")),
    NavEntry::Group {
        label: "Settings",
        links: &[NavLink::new("Main Settings", "/settings/main")],
    },
    NavEntry::Link(NavLink::new("User Support Ticket", "/user-support-ticket-2")),
    NavEntry::Link(NavLink::new("Blog & Broadcast", "/blog-broadcast")),
    NavEntry::Link(NavLink::new("Templates", "/templates")),
    NavEntry::Link(NavLink::new("Audit Logs", "/audit-logs")),
];

/// One line of the rendered sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarRow {
    Group {
        label: &'static str,
        expanded: bool,
    },
    Link {
        link: NavLink,
        nested: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sidebar {
    expanded: BTreeSet<&'static str>,
    cursor: usize,
}

impl Sidebar {
    /// Groups start collapsed except the one holding `path`.
    pub fn for_path(path: &str) -> Self {
        let expanded = SIDEBAR
            .iter()
            .filter(|entry| matches!(entry, NavEntry::Group { .. }) && entry.is_active(path))
            .map(NavEntry::label)
            .collect();
        Self {
            expanded,
            cursor: 0,
        }
    }

    pub fn is_expanded(&self, group: &str) -> bool {
        self.expanded.contains(group)
    }

    /// Returns the new expansion state.
    pub fn toggle(&mut self, group: &'static str) -> bool {
        if self.expanded.remove(group) {
            false
        } else {
            self.expanded.insert(group);
            true
        }
    }

    pub fn rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for entry in SIDEBAR {
            match entry {
                NavEntry::Link(link) => rows.push(SidebarRow::Link {
                    link: *link,
                    nested: false,
                }),
                NavEntry::Group { label, links } => {
                    let expanded = self.is_expanded(label);
                    rows.push(SidebarRow::Group {
                        label: *label,
                        expanded,
                    });
                    if expanded {
                        rows.extend(links.iter().map(|link| SidebarRow::Link {
                            link: *link,
                            nested: true,
                        }));
                    }
                }
            }
        }
        rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<SidebarRow> {
        self.rows().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) -> usize {
        let last = self.rows().len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.cursor
    }
}
