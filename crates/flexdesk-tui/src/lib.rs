// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod form;
mod render;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use flexdesk_app::validation::step_page_size;
use flexdesk_app::{
    AdminProfile, AppCommand, AppMode, AppState, DeliveryDetail, Notification, OverviewStat,
    PageKind, QUICK_ACTIONS, StatCard, TableView, ViewCommand, ViewEvent,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use form::FilterForm;

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

/// Static content for the non-table parts of each page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub stats: Vec<StatCard>,
    pub overview: Vec<OverviewStat>,
    pub detail: DeliveryDetail,
    pub notifications: Vec<Notification>,
    pub admin: AdminProfile,
}

#[derive(Debug, Clone)]
pub struct PageTables {
    pub dashboard: TableView,
    pub marketplace: TableView,
}

pub trait AppRuntime {
    fn load_tables(&mut self) -> Result<PageTables>;
    fn load_content(&mut self) -> Result<PageContent>;
}

pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone)]
struct TableUi {
    view: TableView,
    selected_row: usize,
    selected_col: usize,
    empty_message: &'static str,
    /// Whether the filter form edits the view-wide date window.
    date_window: bool,
}

impl TableUi {
    fn new(view: TableView, empty_message: &'static str) -> Self {
        Self {
            view,
            selected_row: 0,
            selected_col: 0,
            empty_message,
            date_window: false,
        }
    }

    fn with_date_window(mut self) -> Self {
        self.date_window = true;
        self
    }

    fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        let events = self.view.dispatch(command);
        if events.iter().any(|event| {
            matches!(
                event,
                ViewEvent::PageChanged(_)
                    | ViewEvent::FiltersChanged { .. }
                    | ViewEvent::SortChanged(_)
                    | ViewEvent::Reset
            )
        }) {
            self.selected_row = 0;
        }
        self.clamp_cursor();
        events
    }

    fn clamp_cursor(&mut self) {
        let rows = self.view.page().items.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
        let columns = self.view.visible_fields().len();
        self.selected_col = self.selected_col.min(columns.saturating_sub(1));
    }

    fn move_row(&mut self, delta: isize) {
        self.selected_row = self.selected_row.saturating_add_signed(delta);
        self.clamp_cursor();
    }

    fn move_col(&mut self, delta: isize) {
        self.selected_col = self.selected_col.saturating_add_signed(delta);
        self.clamp_cursor();
    }

    fn selected_field(&self) -> Option<&'static str> {
        self.view
            .visible_fields()
            .get(self.selected_col)
            .map(|(_, field)| field.key)
    }
}

#[derive(Debug, Clone)]
struct ViewData {
    content: PageContent,
    dashboard: TableUi,
    marketplace: TableUi,
    filter_form: Option<FilterForm>,
    column_cursor: usize,
    menu_cursor: usize,
    status_token: u64,
}

impl ViewData {
    fn new(tables: PageTables, content: PageContent) -> Self {
        Self {
            content,
            dashboard: TableUi::new(tables.dashboard, "No assets found").with_date_window(),
            marketplace: TableUi::new(
                tables.marketplace,
                "No assets found matching your criteria.",
            ),
            filter_form: None,
            column_cursor: 0,
            menu_cursor: 0,
            status_token: 0,
        }
    }

    fn table(&self, page: PageKind) -> Option<&TableUi> {
        match page {
            PageKind::Dashboard => Some(&self.dashboard),
            PageKind::Marketplace => Some(&self.marketplace),
            PageKind::DeliveryDetails => None,
        }
    }

    fn table_mut(&mut self, page: PageKind) -> Option<&mut TableUi> {
        match page {
            PageKind::Dashboard => Some(&mut self.dashboard),
            PageKind::Marketplace => Some(&mut self.marketplace),
            PageKind::DeliveryDetails => None,
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    let tables = runtime.load_tables().context("load tables")?;
    let content = runtime.load_content().context("load page content")?;
    let mut view_data = ViewData::new(tables, content);

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let (internal_tx, internal_rx) = mpsc::channel();
    info!(page = state.active_page.as_str(), "terminal session started");

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render::render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("terminal session ended");
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Rejections win over routine messages so bad input is never hidden.
fn status_for_events(events: &[ViewEvent], table: &TableUi) -> Option<String> {
    let schema = table.view.schema();
    let rejected = events
        .iter()
        .filter(|event| matches!(event, ViewEvent::InputRejected(_)))
        .map(|event| event.message(schema))
        .collect::<Vec<_>>();
    if !rejected.is_empty() {
        return Some(rejected.join("; "));
    }
    events.first().map(|event| event.message(schema))
}

fn apply_view_commands(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    commands: Vec<ViewCommand>,
) {
    let Some(table) = view_data.table_mut(state.active_page) else {
        return;
    };
    let mut events = Vec::new();
    for command in commands {
        events.extend(table.dispatch(command));
    }
    if let Some(message) = status_for_events(&events, table) {
        emit_status(state, view_data, internal_tx, message);
    }
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    debug!(code = ?key.code, mode = state.mode.label(), "key");

    match state.mode {
        AppMode::Nav => return handle_nav_key(state, view_data, internal_tx, key),
        AppMode::Sidebar => handle_sidebar_key(state, view_data, internal_tx, key),
        AppMode::Search => handle_search_key(state, view_data, internal_tx, key),
        AppMode::Filter => handle_filter_key(state, view_data, internal_tx, key),
        AppMode::Columns => handle_columns_key(state, view_data, internal_tx, key),
        AppMode::QuickActions => handle_quick_actions_key(state, view_data, internal_tx, key),
        AppMode::Notifications | AppMode::Help => {
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        }
    }
    false
}

fn handle_nav_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            state.dispatch(AppCommand::NextPage);
        }
        KeyCode::BackTab => {
            state.dispatch(AppCommand::PrevPage);
        }
        KeyCode::Char('m') => {
            state.dispatch(AppCommand::EnterMode(AppMode::Sidebar));
        }
        KeyCode::Char('a') => {
            view_data.menu_cursor = 0;
            state.dispatch(AppCommand::EnterMode(AppMode::QuickActions));
        }
        KeyCode::Char('b') => {
            state.dispatch(AppCommand::EnterMode(AppMode::Notifications));
        }
        KeyCode::Char('?') => {
            state.dispatch(AppCommand::EnterMode(AppMode::Help));
        }
        _ => handle_table_key(state, view_data, internal_tx, key),
    }
    false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKeyAction {
    MoveRow(isize),
    MoveColumn(isize),
    Search,
    Filter,
    Columns,
    Sort,
    ClearSort,
    Reset,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    PageSize(isize),
    Open,
}

fn table_action_for_key(key: KeyEvent) -> Option<TableKeyAction> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(TableKeyAction::MoveRow(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(TableKeyAction::MoveRow(-1)),
        KeyCode::Char('h') | KeyCode::Left => Some(TableKeyAction::MoveColumn(-1)),
        KeyCode::Char('l') | KeyCode::Right => Some(TableKeyAction::MoveColumn(1)),
        KeyCode::Char('/') => Some(TableKeyAction::Search),
        KeyCode::Char('f') => Some(TableKeyAction::Filter),
        KeyCode::Char('c') => Some(TableKeyAction::Columns),
        KeyCode::Char('s') => Some(TableKeyAction::Sort),
        KeyCode::Char('S') => Some(TableKeyAction::ClearSort),
        KeyCode::Char('r') => Some(TableKeyAction::Reset),
        KeyCode::Char('n') | KeyCode::PageDown => Some(TableKeyAction::NextPage),
        KeyCode::Char('p') | KeyCode::PageUp => Some(TableKeyAction::PrevPage),
        KeyCode::Char('g') | KeyCode::Home => Some(TableKeyAction::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(TableKeyAction::LastPage),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(TableKeyAction::PageSize(1)),
        KeyCode::Char('-') => Some(TableKeyAction::PageSize(-1)),
        KeyCode::Enter => Some(TableKeyAction::Open),
        _ => None,
    }
}

fn handle_table_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(action) = table_action_for_key(key) else {
        return;
    };
    let page = state.active_page;
    let Some(table) = view_data.table_mut(page) else {
        return;
    };

    let command = match action {
        TableKeyAction::MoveRow(delta) => {
            table.move_row(delta);
            return;
        }
        TableKeyAction::MoveColumn(delta) => {
            table.move_col(delta);
            return;
        }
        TableKeyAction::Search => {
            state.dispatch(AppCommand::EnterMode(AppMode::Search));
            return;
        }
        TableKeyAction::Filter => {
            let form = FilterForm::for_view(&table.view, table.date_window);
            view_data.filter_form = Some(form);
            state.dispatch(AppCommand::EnterMode(AppMode::Filter));
            return;
        }
        TableKeyAction::Columns => {
            view_data.column_cursor = 0;
            state.dispatch(AppCommand::EnterMode(AppMode::Columns));
            return;
        }
        TableKeyAction::Open => {
            if table.view.page().is_empty() {
                return;
            }
            state.dispatch(AppCommand::OpenDetail);
            return;
        }
        TableKeyAction::Sort => match table.selected_field() {
            Some(field) => ViewCommand::SortBy(field),
            None => return,
        },
        TableKeyAction::ClearSort => ViewCommand::ClearSort,
        TableKeyAction::Reset => ViewCommand::Reset,
        TableKeyAction::NextPage => ViewCommand::NextPage,
        TableKeyAction::PrevPage => ViewCommand::PrevPage,
        TableKeyAction::FirstPage => ViewCommand::FirstPage,
        TableKeyAction::LastPage => ViewCommand::LastPage,
        TableKeyAction::PageSize(delta) => {
            ViewCommand::SetPageSize(step_page_size(table.view.state().page.page_size, delta))
        }
    };
    apply_view_commands(state, view_data, internal_tx, vec![command]);
}

fn handle_sidebar_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => {
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.dispatch(AppCommand::MoveSidebar(1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.dispatch(AppCommand::MoveSidebar(-1));
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let before = state.status_line.clone();
            state.dispatch(AppCommand::ActivateSidebar);
            if state.status_line != before
                && let Some(message) = state.status_line.clone()
            {
                emit_status(state, view_data, internal_tx, message);
            }
        }
        _ => {}
    }
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(table) = view_data.table(state.active_page) else {
        state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        return;
    };
    let mut term = table.view.state().criteria.search.clone();
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
            return;
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => term.clear(),
        KeyCode::Backspace => {
            term.pop();
        }
        KeyCode::Char(ch) => term.push(ch),
        _ => return,
    }
    apply_view_commands(
        state,
        view_data,
        internal_tx,
        vec![ViewCommand::SetSearch(term)],
    );
}

fn handle_filter_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(form) = view_data.filter_form.as_mut() else {
        state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        return;
    };
    let on_choice = form
        .current()
        .is_some_and(|input| matches!(input.kind, form::InputKind::Choice(_)));

    match key.code {
        KeyCode::Esc => {
            view_data.filter_form = None;
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        }
        KeyCode::Enter => {
            let commands = form.commands();
            view_data.filter_form = None;
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
            apply_view_commands(state, view_data, internal_tx, commands);
        }
        KeyCode::Tab | KeyCode::Down => form.move_cursor(1),
        KeyCode::BackTab | KeyCode::Up => form.move_cursor(-1),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_current();
        }
        KeyCode::Char('j') if on_choice => form.move_cursor(1),
        KeyCode::Char('k') if on_choice => form.move_cursor(-1),
        KeyCode::Char('h') | KeyCode::Left if on_choice => form.cycle_choice(-1),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(' ') if on_choice => {
            form.cycle_choice(1);
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(ch) => form.push_char(ch),
        _ => {}
    }
}

fn handle_columns_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let page = state.active_page;
    let cursor = view_data.column_cursor;
    let Some(table) = view_data.table_mut(page) else {
        state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        return;
    };
    let fields = table.view.schema().fields().to_vec();

    match key.code {
        KeyCode::Esc | KeyCode::Char('c') => {
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.column_cursor = (cursor + 1).min(fields.len().saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.column_cursor = cursor.saturating_sub(1);
        }
        KeyCode::Char('a') => {
            apply_view_commands(
                state,
                view_data,
                internal_tx,
                vec![ViewCommand::ShowAllColumns],
            );
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let Some(field) = fields.get(cursor) else {
                return;
            };
            let visible = table.view.state().columns.is_visible(field.key);
            if visible && table.view.visible_fields().len() == 1 {
                emit_status(state, view_data, internal_tx, "keep one column visible");
                return;
            }
            apply_view_commands(
                state,
                view_data,
                internal_tx,
                vec![ViewCommand::SetColumnVisibility {
                    field: field.key,
                    visible: !visible,
                }],
            );
        }
        _ => {}
    }
}

fn handle_quick_actions_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('a') => {
            state.dispatch(AppCommand::EnterMode(AppMode::Nav));
        }
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.menu_cursor = (view_data.menu_cursor + 1).min(QUICK_ACTIONS.len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.menu_cursor = view_data.menu_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            state.dispatch(AppCommand::RunQuickAction(view_data.menu_cursor));
            if let Some(message) = state.status_line.clone() {
                emit_status(state, view_data, internal_tx, message);
            }
        }
        _ => {}
    }
}
