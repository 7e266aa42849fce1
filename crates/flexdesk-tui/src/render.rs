// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use flexdesk_app::validation::{format_date, format_naira};
use flexdesk_app::{
    AppMode, AppState, BRAND, DeliveryDetail, FieldSpec, FieldValue, PageKind, PartyCard,
    QUICK_ACTIONS, SEARCH_PLACEHOLDER, SidebarRow, SortDirection,
};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::form::{has_advanced_filters, render_filter_form_text};
use crate::{TableUi, ViewData};

const SIDEBAR_WIDTH: u16 = 30;

pub(crate) fn render(frame: &mut Frame<'_>, state: &AppState, view_data: &ViewData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new(top_bar_text(state, view_data)), rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    let sidebar_border = if state.mode == AppMode::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(sidebar_lines(state)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(sidebar_border)
                .title(BRAND),
        ),
        body[0],
    );

    match state.active_page {
        PageKind::Dashboard => render_dashboard(frame, body[1], view_data),
        PageKind::Marketplace => render_marketplace(frame, body[1], view_data),
        PageKind::DeliveryDetails => frame.render_widget(
            Paragraph::new(delivery_detail_text(&view_data.content.detail))
                .block(Block::default().borders(Borders::ALL).title("Delivery Details"))
                .wrap(Wrap { trim: false }),
            body[1],
        ),
    }

    frame.render_widget(
        Paragraph::new(status_text(state, view_data))
            .style(Style::default().fg(Color::Black).bg(Color::Gray)),
        rows[2],
    );

    render_overlay(frame, state, view_data);
}

fn render_dashboard(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(area);

    let card_count = view_data.content.stats.len().max(1) as u32;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, card_count); card_count as usize])
        .split(sections[0]);
    for (card, slot) in view_data.content.stats.iter().zip(cards.iter()) {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    card.value.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(card.change.clone()),
            ])
            .block(Block::default().borders(Borders::ALL).title(card.title.clone())),
            *slot,
        );
    }

    frame.render_widget(
        Paragraph::new("Chart data not available")
            .block(Block::default().borders(Borders::ALL).title("Overview")),
        sections[1],
    );
    render_table(frame, sections[2], &view_data.dashboard, "Assets");
}

fn render_marketplace(frame: &mut Frame<'_>, area: Rect, view_data: &ViewData) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    frame.render_widget(
        Paragraph::new(overview_text(view_data))
            .block(Block::default().borders(Borders::ALL).title("Overview")),
        sections[0],
    );
    render_table(frame, sections[1], &view_data.marketplace, "Marketplace");
}

fn render_table(frame: &mut Frame<'_>, area: Rect, table: &TableUi, title: &str) {
    let view = &table.view;
    let fields = view.visible_fields();
    let sort = view.state().sort;

    let header = Row::new(fields.iter().enumerate().map(|(col, (_, field))| {
        let mut label = field.label.to_owned();
        if let Some(sort) = sort
            && sort.field == field.key
        {
            label.push_str(match sort.direction {
                SortDirection::Asc => " ^",
                SortDirection::Desc => " v",
            });
        }
        let style = if col == table.selected_col {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(label).style(style)
    }));

    let records = view.page_records();
    let rows = if records.is_empty() {
        vec![Row::new(vec![Cell::from(table.empty_message)])]
    } else {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let cells = fields
                    .iter()
                    .zip(view.project(record))
                    .map(|((_, field), value)| Cell::from(cell_text(field, value)))
                    .collect::<Vec<_>>();
                let style = if index == table.selected_row {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect()
    };

    let widths = vec![Constraint::Fill(1); fields.len().max(1)];
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    frame.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title.to_owned())),
        sections[0],
    );
    frame.render_widget(Paragraph::new(table_footer_text(table)), sections[1]);
}

pub(crate) fn cell_text(field: &FieldSpec, value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(amount) if field.currency => format_naira(*amount as f64),
        FieldValue::Number(amount) if field.currency => format_naira(*amount),
        FieldValue::Date(date) => format_date(*date),
        other => other.display(),
    }
}

pub(crate) fn table_footer_text(table: &TableUi) -> String {
    let view = &table.view;
    let page = view.page();
    let state = view.state();
    let mut parts = vec![
        page.range_label(),
        format!("page {}/{}", page.page, page.total_pages.max(1)),
        format!("{} per page", page.page_size),
    ];
    if !state.criteria.search.is_empty() {
        parts.push(format!("search \"{}\"", state.criteria.search));
    }
    if has_advanced_filters(&state.criteria) {
        parts.push(format!("{} filters", state.criteria.active_count()));
    }
    let hidden = state.columns.hidden_count();
    if hidden > 0 {
        parts.push(format!("{hidden} hidden"));
    }
    parts.join(" | ")
}

pub(crate) fn top_bar_text(state: &AppState, view_data: &ViewData) -> String {
    let search = view_data
        .table(state.active_page)
        .map(|table| table.view.state().criteria.search.clone())
        .filter(|term| !term.is_empty())
        .unwrap_or_else(|| SEARCH_PLACEHOLDER.to_owned());
    let admin = &view_data.content.admin;
    format!(
        " {BRAND} | {} | [{search}] | {} alerts | {} ({})",
        state.active_page.label(),
        view_data.content.notifications.len(),
        admin.name,
        admin.role,
    )
}

pub(crate) fn sidebar_lines(state: &AppState) -> Vec<Line<'static>> {
    let path = state.current_path();
    let focused = state.mode == AppMode::Sidebar;
    state
        .sidebar
        .rows()
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (text, active) = match row {
                SidebarRow::Group { label, expanded } => {
                    let arrow = if expanded { "v" } else { ">" };
                    (format!("{arrow} {label}"), false)
                }
                SidebarRow::Link { link, nested } => {
                    let indent = if nested { "    " } else { "  " };
                    let badge = link
                        .badge
                        .map(|count| format!(" ({count})"))
                        .unwrap_or_default();
                    (
                        format!("{indent}{}{badge}", link.label),
                        link.is_active(path),
                    )
                }
            };
            let mut style = Style::default();
            if active {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if focused && index == state.sidebar.cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(text, style))
        })
        .collect()
}

fn overview_text(view_data: &ViewData) -> String {
    view_data
        .content
        .overview
        .iter()
        .map(|stat| format!("{}: {}", stat.title, stat.value))
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn party_lines(card: &PartyCard, lines: &mut Vec<String>) {
    let stars = card.filled_stars();
    lines.push(format!(
        "{} [{}] {}  {}{} {}",
        card.role,
        card.initials(),
        card.name,
        "*".repeat(stars),
        ".".repeat(5 - stars),
        card.rating
    ));
    for item in &card.details {
        lines.push(format!("  {}: {}", item.label, item.value));
    }
}

pub(crate) fn delivery_detail_text(detail: &DeliveryDetail) -> String {
    let mut lines = vec![
        format!(
            "Sell Ad ID: {}   Ad Status: {}   Views: {}",
            detail.sell_ad_id,
            detail.ad_status.as_str(),
            detail.views
        ),
        String::new(),
    ];
    party_lines(&detail.seller, &mut lines);
    lines.push(String::new());
    party_lines(&detail.buyer, &mut lines);
    lines.push(String::new());
    lines.push("Dispatch".to_owned());
    for item in &detail.dispatch {
        lines.push(format!("  {}: {}", item.label, item.value));
    }
    lines.push(String::new());
    lines.push("Pickup Contact".to_owned());
    lines.push(format!("  {}", detail.pickup_contact.name));
    lines.push(format!("  {}", detail.pickup_contact.address));
    lines.push(format!("  {}", detail.pickup_contact.phone));
    lines.push(String::new());
    lines.push("Package".to_owned());
    for item in &detail.package {
        lines.push(format!("  {}: {}", item.label, item.value));
    }
    lines.join("\n")
}

pub(crate) fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let hint = match state.mode {
        AppMode::Nav if state.active_page.has_table() => {
            "tab page | / search | f filter | c columns | s sort | n/p page | ? help"
        }
        AppMode::Nav => "tab page | m menu | a actions | b alerts | ? help | q quit",
        AppMode::Sidebar => "j/k move | enter open | esc back",
        AppMode::Search => "type to search | enter/esc done",
        AppMode::Filter => "enter apply | esc cancel",
        AppMode::Columns => "space toggle | a show all | esc back",
        AppMode::QuickActions => "j/k move | enter run | esc back",
        AppMode::Notifications | AppMode::Help => "any key closes",
    };
    let mut text = format!(" {} | {hint}", state.mode.label());
    if state.mode == AppMode::Search
        && let Some(table) = view_data.table(state.active_page)
    {
        text = format!(
            " {} | /{}_ | {hint}",
            state.mode.label(),
            table.view.state().criteria.search
        );
    }
    if let Some(status) = &state.status_line {
        text.push_str(" | ");
        text.push_str(status);
    }
    text
}

pub(crate) fn help_overlay_text() -> String {
    [
        "tab/shift+tab  switch page",
        "m              focus sidebar",
        "j/k h/l        move row / column",
        "enter          open delivery details",
        "/              search",
        "f              advanced filters",
        "c              show or hide columns",
        "s / S          sort by column / clear sort",
        "r              reset filters and sort",
        "n/p g/G        next/prev first/last page",
        "+/-            page size",
        "a              quick actions",
        "b              notifications",
        "q              quit",
    ]
    .join("\n")
}

pub(crate) fn column_picker_text(table: &TableUi, cursor: usize) -> String {
    let columns = &table.view.state().columns;
    table
        .view
        .schema()
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let marker = if index == cursor { ">" } else { " " };
            let check = if columns.is_visible(field.key) { "x" } else { " " };
            format!("{marker} [{check}] {}", field.label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn menu_text(cursor: usize) -> String {
    QUICK_ACTIONS
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let marker = if index == cursor { ">" } else { " " };
            format!("{marker} {action}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn notifications_text(view_data: &ViewData) -> String {
    if view_data.content.notifications.is_empty() {
        return "No notifications".to_owned();
    }
    view_data
        .content
        .notifications
        .iter()
        .map(|note| format!("{}  ({})", note.text, note.time))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_overlay(frame: &mut Frame<'_>, state: &AppState, view_data: &ViewData) {
    let table = view_data.table(state.active_page);
    let (title, text, width, height) = match state.mode {
        AppMode::Help => ("Keys", help_overlay_text(), 60, 70),
        AppMode::QuickActions => ("Quick Actions", menu_text(view_data.menu_cursor), 40, 40),
        AppMode::Notifications => ("Notifications", notifications_text(view_data), 50, 40),
        AppMode::Columns => match table {
            Some(table) => (
                "Columns",
                column_picker_text(table, view_data.column_cursor),
                40,
                60,
            ),
            None => return,
        },
        AppMode::Filter => match (&view_data.filter_form, table) {
            (Some(form), Some(table)) => (
                "Filters",
                render_filter_form_text(form, table.view.schema()),
                80,
                80,
            ),
            _ => return,
        },
        AppMode::Nav | AppMode::Sidebar | AppMode::Search => return,
    };
    let area = centered_rect(width, height, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        cell_text, centered_rect, column_picker_text, delivery_detail_text, sidebar_lines,
        status_text, table_footer_text, top_bar_text,
    };
    use crate::tests::view_data_for_test;
    use flexdesk_app::{
        AppCommand, AppMode, AppState, FieldSpec, FieldValue, PageKind, ViewCommand,
    };
    use ratatui::layout::Rect;
    use time::{Date, Month};

    #[test]
    fn currency_and_date_cells_are_formatted() {
        let price = FieldSpec::integer("price", "Price").currency();
        assert_eq!(cell_text(&price, &FieldValue::Integer(850_000)), "₦850,000");
        let id = FieldSpec::integer("id", "Ad ID");
        assert_eq!(cell_text(&id, &FieldValue::Integer(556)), "556");
        let date = FieldSpec::date("creation_date", "Creation Date");
        let value = FieldValue::Date(
            Date::from_calendar_date(2025, Month::October, 11).expect("valid date"),
        );
        assert_eq!(cell_text(&date, &value), "2025-10-11");
    }

    #[test]
    fn footer_summarizes_view_state() {
        let mut view_data = view_data_for_test();
        assert_eq!(
            table_footer_text(&view_data.marketplace),
            "1-10 of 12 | page 1/2 | 10 per page"
        );

        view_data
            .marketplace
            .dispatch(ViewCommand::SetSearch("item 1".to_owned()));
        view_data
            .marketplace
            .dispatch(ViewCommand::SetColumnVisibility {
                field: "status",
                visible: false,
            });
        assert_eq!(
            table_footer_text(&view_data.marketplace),
            "1-4 of 4 | page 1/1 | 10 per page | search \"item 1\" | 1 hidden"
        );
    }

    #[test]
    fn empty_result_footer() {
        let mut view_data = view_data_for_test();
        view_data
            .dashboard
            .dispatch(ViewCommand::SetSearch("nothing".to_owned()));
        assert_eq!(
            table_footer_text(&view_data.dashboard),
            "0-0 of 0 | page 1/1 | 5 per page | search \"nothing\""
        );
    }

    #[test]
    fn top_bar_shows_page_search_and_admin() {
        let mut view_data = view_data_for_test();
        let state = AppState::new(PageKind::Marketplace);
        assert_eq!(
            top_bar_text(&state, &view_data),
            " FLEX Delivery | Marketplace | [Search for anything] | 0 alerts | Admin (ADMIN)"
        );
        view_data
            .marketplace
            .dispatch(ViewCommand::SetSearch("seller".to_owned()));
        assert!(top_bar_text(&state, &view_data).contains("[seller]"));
    }

    #[test]
    fn sidebar_marks_groups_and_badges() {
        let state = AppState::new(PageKind::Marketplace);
        let text = sidebar_lines(&state)
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>();
        assert!(text.contains(&"v All Listings".to_owned()));
        assert!(text.contains(&"> Users".to_owned()));
        assert!(text.contains(&"    Marketplace (5)".to_owned()));
    }

    #[test]
    fn status_shows_mode_and_message() {
        let view_data = view_data_for_test();
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("filters reset".to_owned()));
        let text = status_text(&state, &view_data);
        assert!(text.starts_with(" NAV | "));
        assert!(text.ends_with(" | filters reset"));

        state.dispatch(AppCommand::EnterMode(AppMode::Search));
        assert!(status_text(&state, &view_data).contains("/_"));
    }

    #[test]
    fn detail_and_column_picker_text() {
        let view_data = view_data_for_test();
        let detail = delivery_detail_text(&view_data.content.detail);
        assert!(detail.starts_with("Sell Ad ID: AD-1   Ad Status: Active   Views: 1"));
        assert!(detail.contains("Pickup Contact"));

        let picker = column_picker_text(&view_data.dashboard, 1);
        let lines = picker.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "  [x] Title");
        assert_eq!(lines[1], "> [x] Location");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 40, area);
        assert!(rect.x >= area.x && rect.right() <= area.right());
        assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
        assert_eq!(rect.width, 60);
    }
}
