// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use tracing::{debug, trace, warn};

use crate::model::SortDirection;
use crate::record::{FieldKind, FieldSpec, FieldValue, Record, RecordSet, Schema};
use crate::validation::{
    ValidationError, parse_optional_date, parse_optional_number, validate_page_size,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Inclusive date range. Only active when both ends are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub const fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    pub const fn between(from: Date, to: Date) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub const fn is_active(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn contains(&self, date: Date) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => date >= from && date <= to,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Case-insensitive substring.
    Contains(String),
    /// Exact string equality.
    Equals(String),
    /// Inclusive numeric bounds; a missing bound is open.
    Range { min: Option<f64>, max: Option<f64> },
    DateRange(DateRange),
}

impl Constraint {
    pub fn is_active(&self) -> bool {
        match self {
            Self::Contains(needle) => !needle.is_empty(),
            Self::Equals(value) => !value.is_empty(),
            Self::Range { min, max } => min.is_some() || max.is_some(),
            Self::DateRange(range) => range.is_active(),
        }
    }

    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Self::Contains(_) | Self::Equals(_) => kind.is_textual(),
            Self::Range { .. } => kind.is_numeric(),
            Self::DateRange(_) => kind == FieldKind::Date,
        }
    }

    pub fn matches(&self, value: &FieldValue) -> bool {
        match self {
            Self::Contains(needle) => contains_ignore_case(&value.display(), needle),
            Self::Equals(expected) => value.as_text() == Some(expected.as_str()),
            Self::Range { min, max } => value.as_number().is_some_and(|number| {
                min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
            }),
            Self::DateRange(range) => value.as_date().is_some_and(|date| range.contains(date)),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Matched against every searchable field.
    pub search: String,
    /// Date window over the schema's primary date field.
    pub window: DateRange,
    pub fields: BTreeMap<&'static str, Constraint>,
}

impl FilterCriteria {
    pub fn active_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.window.is_active())
            + self
                .fields
                .values()
                .filter(|constraint| constraint.is_active())
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// A new field starts ascending; the same field flips direction.
    pub fn next(current: Option<Self>, field: &'static str) -> Self {
        match current {
            Some(current) if current.field == field => Self {
                field,
                direction: current.direction.flipped(),
            },
            _ => Self::asc(field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnVisibility {
    hidden: BTreeSet<&'static str>,
}

impl ColumnVisibility {
    pub fn is_visible(&self, field: &str) -> bool {
        !self.hidden.contains(field)
    }

    /// Returns whether anything changed.
    pub fn set(&mut self, field: &'static str, visible: bool) -> bool {
        if visible {
            self.hidden.remove(field)
        } else {
            self.hidden.insert(field)
        }
    }

    pub fn show_all(&mut self) -> bool {
        let changed = !self.hidden.is_empty();
        self.hidden.clear();
        changed
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl PageState {
    pub const fn first(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    pub sort: Option<SortSpec>,
    pub columns: ColumnVisibility,
    pub page: PageState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> PageSlice<T> {
    /// True when there is nothing to show ("no records").
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first_item(&self) -> usize {
        ((self.page - 1) * self.page_size + 1).min(self.total_count)
    }

    pub fn last_item(&self) -> usize {
        (self.page * self.page_size).min(self.total_count)
    }

    pub fn range_label(&self) -> String {
        format!(
            "{}-{} of {}",
            self.first_item(),
            self.last_item(),
            self.total_count
        )
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Clamps a requested page into `[1, total_pages]`; an empty set stays on 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

enum Predicate {
    Search { needle: String, fields: Vec<usize> },
    Field { index: usize, constraint: Constraint },
}

impl Predicate {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Search { needle, fields } => fields.iter().any(|index| {
                record
                    .value(*index)
                    .is_some_and(|value| contains_ignore_case(&value.display(), needle))
            }),
            Self::Field { index, constraint } => record
                .value(*index)
                .is_some_and(|value| constraint.matches(value)),
        }
    }
}

fn active_predicates(schema: &Schema, criteria: &FilterCriteria) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if !criteria.search.is_empty() {
        let fields = schema.searchable_indices();
        if !fields.is_empty() {
            predicates.push(Predicate::Search {
                needle: criteria.search.clone(),
                fields,
            });
        }
    }

    if criteria.window.is_active()
        && let Some(index) = schema.date_field().and_then(|key| schema.index_of(key))
    {
        predicates.push(Predicate::Field {
            index,
            constraint: Constraint::DateRange(criteria.window),
        });
    }

    for (key, constraint) in &criteria.fields {
        if !constraint.is_active() {
            continue;
        }
        let Some(index) = schema.index_of(key) else {
            warn!(field = key, "filter on unknown field ignored");
            continue;
        };
        predicates.push(Predicate::Field {
            index,
            constraint: constraint.clone(),
        });
    }

    predicates
}

/// Row indices of `set` satisfying every active constraint, in load order.
pub fn apply_filters(set: &RecordSet, criteria: &FilterCriteria) -> Vec<usize> {
    let records = set.records();
    let mut rows = (0..records.len()).collect::<Vec<_>>();
    for predicate in active_predicates(set.schema(), criteria) {
        if rows.is_empty() {
            break;
        }
        rows.retain(|row| predicate.matches(&records[*row]));
    }
    rows
}

/// Stable sort of `rows`; no sort keeps input order.
pub fn apply_sort(set: &RecordSet, mut rows: Vec<usize>, sort: Option<&SortSpec>) -> Vec<usize> {
    let Some(sort) = sort else {
        return rows;
    };
    let Some(index) = set.schema().index_of(sort.field) else {
        warn!(field = sort.field, "sort on unknown field ignored");
        return rows;
    };

    let records = set.records();
    rows.sort_by(|left, right| {
        let order = match (records[*left].value(index), records[*right].value(index)) {
            (Some(left), Some(right)) => left.cmp_value(right),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        };
        match sort.direction {
            SortDirection::Asc => order,
            SortDirection::Desc => order.reverse(),
        }
    });
    rows
}

pub fn paginate<T: Clone>(items: &[T], state: PageState) -> PageSlice<T> {
    let total_count = items.len();
    let total_pages = total_pages(total_count, state.page_size);
    let page = clamp_page(state.page, total_pages);
    let start = (page - 1).saturating_mul(state.page_size).min(total_count);
    let end = start.saturating_add(state.page_size).min(total_count);

    PageSlice {
        items: items[start..end].to_vec(),
        page,
        page_size: state.page_size,
        total_pages,
        total_count,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    SetSearch(String),
    SetConstraint {
        field: &'static str,
        constraint: Constraint,
    },
    /// Raw text from min/max inputs.
    SetRangeText {
        field: &'static str,
        min: String,
        max: String,
    },
    /// Raw text from from/to date inputs.
    SetDateRangeText {
        field: &'static str,
        from: String,
        to: String,
    },
    ClearFilter(&'static str),
    SetWindow(DateRange),
    SetWindowText {
        from: String,
        to: String,
    },
    SortBy(&'static str),
    ClearSort,
    SetColumnVisibility {
        field: &'static str,
        visible: bool,
    },
    ShowAllColumns,
    SetPageSize(usize),
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GoToPage(usize),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FiltersChanged { matched: usize },
    SortChanged(Option<SortSpec>),
    PageChanged(usize),
    PageSizeChanged(usize),
    ColumnToggled { field: &'static str, visible: bool },
    ColumnsShown,
    InputRejected(String),
    Reset,
}

impl ViewEvent {
    pub fn message(&self, schema: &Schema) -> String {
        let label = |key: &str| {
            schema
                .field(key)
                .map_or_else(|| key.to_owned(), |field| field.label.to_owned())
        };
        match self {
            Self::FiltersChanged { matched } => format!("filter: {matched} matching"),
            Self::SortChanged(Some(sort)) => {
                format!("sort {} {}", label(sort.field), sort.direction.label())
            }
            Self::SortChanged(None) => "sort cleared".to_owned(),
            Self::PageChanged(page) => format!("page {page}"),
            Self::PageSizeChanged(size) => format!("{size} per page"),
            Self::ColumnToggled {
                field,
                visible: true,
            } => format!("column shown: {}", label(field)),
            Self::ColumnToggled {
                field,
                visible: false,
            } => format!("column hidden: {}", label(field)),
            Self::ColumnsShown => "all columns shown".to_owned(),
            Self::InputRejected(message) => message.clone(),
            Self::Reset => "filters reset".to_owned(),
        }
    }
}

/// Filter, sort, column and page state over one immutable record set.
///
/// Filtered and sorted row order is derived eagerly whenever a command
/// touches criteria or sort, so reads never recompute.
#[derive(Debug, Clone)]
pub struct TableView {
    name: &'static str,
    set: RecordSet,
    state: ViewState,
    rows: Vec<usize>,
}

impl TableView {
    pub fn new(name: &'static str, set: RecordSet, page_size: usize) -> Result<Self> {
        let page_size = validate_page_size(page_size)
            .map_err(|error| anyhow!("{name} view: {error} {page_size}"))?;
        let rows = (0..set.len()).collect();
        debug!(view = name, records = set.len(), page_size, "table view ready");
        Ok(Self {
            name,
            set,
            state: ViewState {
                page: PageState::first(page_size),
                ..ViewState::default()
            },
            rows,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn records(&self) -> &RecordSet {
        &self.set
    }

    pub fn schema(&self) -> &Schema {
        self.set.schema()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn filtered_rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn filtered_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.rows.len(), self.state.page.page_size)
    }

    pub fn page(&self) -> PageSlice<usize> {
        paginate(&self.rows, self.state.page)
    }

    pub fn page_records(&self) -> Vec<&Record> {
        let records = self.set.records();
        self.page()
            .items
            .into_iter()
            .map(|row| &records[row])
            .collect()
    }

    pub fn visible_fields(&self) -> Vec<(usize, &FieldSpec)> {
        self.schema()
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, field)| self.state.columns.is_visible(field.key))
            .collect()
    }

    /// Values of the visible columns, in schema order.
    pub fn project<'a>(&self, record: &'a Record) -> Vec<&'a FieldValue> {
        self.visible_fields()
            .into_iter()
            .filter_map(|(index, _)| record.value(index))
            .collect()
    }

    pub fn enum_options(&self, field: &str) -> Vec<String> {
        self.set.distinct_values(field)
    }

    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        debug!(view = self.name, ?command, "view command");
        match command {
            ViewCommand::SetSearch(term) => {
                self.state.criteria.search = term;
                self.filters_changed(Vec::new())
            }
            ViewCommand::SetConstraint { field, constraint } => {
                if let Err(message) = self.check_constraint(field, &constraint) {
                    return vec![ViewEvent::InputRejected(message)];
                }
                self.state.criteria.fields.insert(field, constraint);
                self.filters_changed(Vec::new())
            }
            ViewCommand::SetRangeText { field, min, max } => {
                let mut events = Vec::new();
                let min = self.parse_number_input(field, "minimum", &min, &mut events);
                let max = self.parse_number_input(field, "maximum", &max, &mut events);
                let constraint = Constraint::Range { min, max };
                if let Err(message) = self.check_constraint(field, &constraint) {
                    return vec![ViewEvent::InputRejected(message)];
                }
                self.state.criteria.fields.insert(field, constraint);
                self.filters_changed(events)
            }
            ViewCommand::SetDateRangeText { field, from, to } => {
                let mut events = Vec::new();
                let from = self.parse_date_input(field, "from", &from, &mut events);
                let to = self.parse_date_input(field, "to", &to, &mut events);
                let constraint = Constraint::DateRange(DateRange::new(from, to));
                if let Err(message) = self.check_constraint(field, &constraint) {
                    return vec![ViewEvent::InputRejected(message)];
                }
                self.state.criteria.fields.insert(field, constraint);
                self.filters_changed(events)
            }
            ViewCommand::ClearFilter(field) => {
                if self.state.criteria.fields.remove(field).is_none() {
                    return Vec::new();
                }
                self.filters_changed(Vec::new())
            }
            ViewCommand::SetWindow(range) => {
                self.state.criteria.window = range;
                self.filters_changed(Vec::new())
            }
            ViewCommand::SetWindowText { from, to } => {
                let field = self.schema().date_field().unwrap_or("date");
                let mut events = Vec::new();
                let from = self.parse_date_input(field, "from", &from, &mut events);
                let to = self.parse_date_input(field, "to", &to, &mut events);
                self.state.criteria.window = DateRange::new(from, to);
                self.filters_changed(events)
            }
            ViewCommand::SortBy(field) => {
                if self.schema().field(field).is_none() {
                    return vec![ViewEvent::InputRejected(format!(
                        "{}: {field}",
                        ValidationError::UnknownField
                    ))];
                }
                let sort = SortSpec::next(self.state.sort, field);
                self.state.sort = Some(sort);
                self.sort_changed()
            }
            ViewCommand::ClearSort => {
                if self.state.sort.is_none() {
                    return Vec::new();
                }
                self.state.sort = None;
                self.sort_changed()
            }
            ViewCommand::SetColumnVisibility { field, visible } => {
                if self.schema().field(field).is_none() {
                    return vec![ViewEvent::InputRejected(format!(
                        "{}: {field}",
                        ValidationError::UnknownField
                    ))];
                }
                if self.state.columns.set(field, visible) {
                    vec![ViewEvent::ColumnToggled { field, visible }]
                } else {
                    Vec::new()
                }
            }
            ViewCommand::ShowAllColumns => {
                if self.state.columns.show_all() {
                    vec![ViewEvent::ColumnsShown]
                } else {
                    Vec::new()
                }
            }
            ViewCommand::SetPageSize(size) => match validate_page_size(size) {
                Ok(size) => {
                    let mut events = Vec::new();
                    if self.state.page.page_size != size {
                        self.state.page.page_size = size;
                        events.push(ViewEvent::PageSizeChanged(size));
                    }
                    self.reset_page(&mut events);
                    events
                }
                Err(error) => vec![ViewEvent::InputRejected(format!("{error}: {size}"))],
            },
            ViewCommand::FirstPage => self.go_to(1),
            ViewCommand::PrevPage => self.go_to(self.state.page.page.saturating_sub(1)),
            ViewCommand::NextPage => self.go_to(self.state.page.page.saturating_add(1)),
            ViewCommand::LastPage => self.go_to(self.total_pages()),
            ViewCommand::GoToPage(page) => self.go_to(page),
            ViewCommand::Reset => {
                self.state.criteria = FilterCriteria::default();
                self.state.sort = None;
                self.state.page.page = 1;
                self.recompute();
                vec![ViewEvent::Reset]
            }
        }
    }

    fn check_constraint(
        &self,
        field: &'static str,
        constraint: &Constraint,
    ) -> std::result::Result<(), String> {
        let Some(spec) = self.schema().field(field) else {
            return Err(format!("{}: {field}", ValidationError::UnknownField));
        };
        if !constraint.applies_to(spec.kind) {
            return Err(format!(
                "{}: {} is a {} field",
                ValidationError::ConstraintMismatch,
                spec.label,
                spec.kind.label()
            ));
        }
        Ok(())
    }

    fn field_label(&self, field: &str) -> String {
        self.schema()
            .field(field)
            .map_or_else(|| field.to_owned(), |spec| spec.label.to_owned())
    }

    fn parse_number_input(
        &self,
        field: &str,
        bound: &str,
        raw: &str,
        events: &mut Vec<ViewEvent>,
    ) -> Option<f64> {
        match parse_optional_number(raw) {
            Ok(value) => value,
            Err(error) => {
                events.push(ViewEvent::InputRejected(format!(
                    "{error} for {} {bound}: {:?}",
                    self.field_label(field),
                    raw.trim()
                )));
                None
            }
        }
    }

    fn parse_date_input(
        &self,
        field: &str,
        bound: &str,
        raw: &str,
        events: &mut Vec<ViewEvent>,
    ) -> Option<Date> {
        match parse_optional_date(raw) {
            Ok(value) => value,
            Err(error) => {
                events.push(ViewEvent::InputRejected(format!(
                    "{error} for {} {bound}: {:?}",
                    self.field_label(field),
                    raw.trim()
                )));
                None
            }
        }
    }

    fn filters_changed(&mut self, mut events: Vec<ViewEvent>) -> Vec<ViewEvent> {
        self.recompute();
        events.push(ViewEvent::FiltersChanged {
            matched: self.rows.len(),
        });
        self.reset_page(&mut events);
        events
    }

    fn sort_changed(&mut self) -> Vec<ViewEvent> {
        self.recompute();
        let mut events = vec![ViewEvent::SortChanged(self.state.sort)];
        self.reset_page(&mut events);
        events
    }

    fn reset_page(&mut self, events: &mut Vec<ViewEvent>) {
        if self.state.page.page != 1 {
            self.state.page.page = 1;
            events.push(ViewEvent::PageChanged(1));
        }
    }

    fn go_to(&mut self, page: usize) -> Vec<ViewEvent> {
        let page = clamp_page(page, self.total_pages());
        if page == self.state.page.page {
            return Vec::new();
        }
        self.state.page.page = page;
        vec![ViewEvent::PageChanged(page)]
    }

    fn recompute(&mut self) {
        let filtered = apply_filters(&self.set, &self.state.criteria);
        self.rows = apply_sort(&self.set, filtered, self.state.sort.as_ref());
        trace!(
            view = self.name,
            matched = self.rows.len(),
            total = self.set.len(),
            "rows recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Constraint, DateRange, FilterCriteria, PageState, SortSpec, TableView, ViewCommand,
        ViewEvent, apply_filters, apply_sort, clamp_page, paginate, total_pages,
    };
    use crate::model::SortDirection;
    use crate::record::{FieldSpec, FieldValue, Record, RecordSet, Schema};
    use anyhow::Result;
    use time::{Date, Month};

    fn day(day: u8) -> Date {
        Date::from_calendar_date(2025, Month::October, day).expect("valid date")
    }

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::text("title", "Title").searchable(),
            FieldSpec::enumeration("status", "Status"),
            FieldSpec::integer("price", "Price").currency(),
            FieldSpec::date("created", "Created"),
        ])
        .with_date_field("created")
    }

    fn row(title: &str, status: &str, price: i64, created: u8) -> Record {
        Record::new(vec![
            FieldValue::Text(title.to_owned()),
            FieldValue::Text(status.to_owned()),
            FieldValue::Integer(price),
            FieldValue::Date(day(created)),
        ])
    }

    fn two_rows() -> Result<RecordSet> {
        RecordSet::new(
            schema(),
            vec![row("A", "Active", 100, 1), row("B", "Sold", 200, 2)],
        )
    }

    fn sample() -> Result<RecordSet> {
        RecordSet::new(
            schema(),
            vec![
                row("iPhone 15 Pro", "Active", 850, 15),
                row("MacBook Pro M3", "Active", 2500, 14),
                row("Samsung Galaxy S24", "Sold", 650, 14),
                row("Dell XPS 13", "Active", 1200, 13),
                row("iPad Air", "Pending", 450, 12),
                row("AirPods Pro", "Pending", 150, 8),
                row("Google Pixel 8", "Sold", 550, 6),
            ],
        )
    }

    fn titles(set: &RecordSet, rows: &[usize]) -> Vec<String> {
        rows.iter()
            .filter_map(|row| set.get(*row, "title"))
            .map(FieldValue::display)
            .collect()
    }

    #[test]
    fn price_minimum_filters_records() -> Result<()> {
        let set = two_rows()?;
        let mut criteria = FilterCriteria::default();
        criteria.fields.insert(
            "price",
            Constraint::Range {
                min: Some(150.0),
                max: None,
            },
        );
        assert_eq!(titles(&set, &apply_filters(&set, &criteria)), vec!["B"]);
        Ok(())
    }

    #[test]
    fn price_descending_sort() -> Result<()> {
        let set = two_rows()?;
        let rows = apply_sort(&set, vec![0, 1], Some(&SortSpec::desc("price")));
        assert_eq!(titles(&set, &rows), vec!["B", "A"]);
        Ok(())
    }

    #[test]
    fn second_page_of_size_one() -> Result<()> {
        let set = two_rows()?;
        let page = paginate(&[0usize, 1], PageState { page: 2, page_size: 1 });
        assert_eq!(titles(&set, &page.items), vec!["B"]);
        assert_eq!(page.total_pages, 2);
        Ok(())
    }

    #[test]
    fn half_open_date_range_is_ignored() -> Result<()> {
        let set = sample()?;
        let mut criteria = FilterCriteria::default();
        criteria.fields.insert(
            "created",
            Constraint::DateRange(DateRange::new(Some(day(14)), None)),
        );
        assert_eq!(apply_filters(&set, &criteria).len(), set.len());

        criteria.window = DateRange::new(None, Some(day(10)));
        assert_eq!(apply_filters(&set, &criteria).len(), set.len());
        Ok(())
    }

    #[test]
    fn closed_date_range_is_inclusive() -> Result<()> {
        let set = sample()?;
        let mut criteria = FilterCriteria::default();
        criteria.window = DateRange::between(day(12), day(14));
        assert_eq!(
            titles(&set, &apply_filters(&set, &criteria)),
            vec![
                "MacBook Pro M3",
                "Samsung Galaxy S24",
                "Dell XPS 13",
                "iPad Air"
            ]
        );
        Ok(())
    }

    #[test]
    fn closed_field_date_range_is_inclusive() -> Result<()> {
        let set = sample()?;
        let mut criteria = FilterCriteria::default();
        criteria.fields.insert(
            "created",
            Constraint::DateRange(DateRange::between(day(8), day(13))),
        );
        assert_eq!(
            titles(&set, &apply_filters(&set, &criteria)),
            vec!["Dell XPS 13", "iPad Air", "AirPods Pro"]
        );
        Ok(())
    }

    #[test]
    fn field_date_range_intersects_window() -> Result<()> {
        let set = sample()?;
        let mut criteria = FilterCriteria::default();
        criteria.fields.insert(
            "created",
            Constraint::DateRange(DateRange::between(day(8), day(13))),
        );
        criteria.window = DateRange::between(day(12), day(15));
        assert_eq!(
            titles(&set, &apply_filters(&set, &criteria)),
            vec!["Dell XPS 13", "iPad Air"]
        );

        criteria.window = DateRange::between(day(1), day(7));
        assert!(apply_filters(&set, &criteria).is_empty());
        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_substring() -> Result<()> {
        let set = sample()?;
        let criteria = FilterCriteria {
            search: "PRO".to_owned(),
            ..FilterCriteria::default()
        };
        assert_eq!(
            titles(&set, &apply_filters(&set, &criteria)),
            vec!["iPhone 15 Pro", "MacBook Pro M3", "AirPods Pro"]
        );
        Ok(())
    }

    #[test]
    fn equality_is_exact() -> Result<()> {
        let set = sample()?;
        let mut criteria = FilterCriteria::default();
        criteria
            .fields
            .insert("status", Constraint::Equals("sold".to_owned()));
        assert!(apply_filters(&set, &criteria).is_empty());

        criteria
            .fields
            .insert("status", Constraint::Equals("Sold".to_owned()));
        assert_eq!(apply_filters(&set, &criteria).len(), 2);
        Ok(())
    }

    #[test]
    fn constraints_are_conjunctive() -> Result<()> {
        let set = sample()?;
        let mut criteria = FilterCriteria::default();
        criteria
            .fields
            .insert("status", Constraint::Equals("Active".to_owned()));
        criteria.fields.insert(
            "price",
            Constraint::Range {
                min: Some(800.0),
                max: Some(1200.0),
            },
        );
        assert_eq!(
            titles(&set, &apply_filters(&set, &criteria)),
            vec!["iPhone 15 Pro", "Dell XPS 13"]
        );
        Ok(())
    }

    #[test]
    fn no_criteria_keeps_load_order() -> Result<()> {
        let set = sample()?;
        let rows = apply_filters(&set, &FilterCriteria::default());
        assert_eq!(rows, (0..set.len()).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn sort_is_stable_for_equal_keys() -> Result<()> {
        let set = sample()?;
        let rows = apply_sort(
            &set,
            (0..set.len()).collect(),
            Some(&SortSpec::asc("status")),
        );
        assert_eq!(
            titles(&set, &rows),
            vec![
                "iPhone 15 Pro",
                "MacBook Pro M3",
                "Dell XPS 13",
                "iPad Air",
                "AirPods Pro",
                "Samsung Galaxy S24",
                "Google Pixel 8",
            ]
        );
        Ok(())
    }

    #[test]
    fn sort_spec_toggles_on_same_field() {
        let first = SortSpec::next(None, "price");
        assert_eq!(first.direction, SortDirection::Asc);
        let second = SortSpec::next(Some(first), "price");
        assert_eq!(second.direction, SortDirection::Desc);
        let third = SortSpec::next(Some(second), "price");
        assert_eq!(third.direction, SortDirection::Asc);
        let other = SortSpec::next(Some(second), "title");
        assert_eq!(other, SortSpec::asc("title"));
    }

    #[test]
    fn empty_set_has_no_pages() {
        let page = paginate::<usize>(&[], PageState { page: 3, page_size: 5 });
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.range_label(), "0-0 of 0");
    }

    #[test]
    fn page_math_matches_selector_footer() {
        let items = (0..12).collect::<Vec<usize>>();
        let page = paginate(&items, PageState { page: 3, page_size: 5 });
        assert_eq!(page.items, vec![10, 11]);
        assert_eq!(page.range_label(), "11-12 of 12");
        assert!(page.has_prev());
        assert!(!page.has_next());
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
    }

    #[test]
    fn malformed_price_text_is_rejected_and_inactive() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 5)?;
        let events = view.dispatch(ViewCommand::SetRangeText {
            field: "price",
            min: "abc".to_owned(),
            max: String::new(),
        });
        assert_eq!(
            events,
            vec![
                ViewEvent::InputRejected("invalid number for Price minimum: \"abc\"".to_owned()),
                ViewEvent::FiltersChanged { matched: 7 },
            ]
        );
        assert_eq!(view.filtered_count(), 7);
        Ok(())
    }

    #[test]
    fn mismatched_constraint_leaves_state_untouched() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 5)?;
        let events = view.dispatch(ViewCommand::SetConstraint {
            field: "title",
            constraint: Constraint::Range {
                min: Some(1.0),
                max: None,
            },
        });
        assert!(matches!(events.as_slice(), [ViewEvent::InputRejected(_)]));
        assert!(view.state().criteria.is_empty());

        let events = view.dispatch(ViewCommand::SetConstraint {
            field: "missing",
            constraint: Constraint::Contains("x".to_owned()),
        });
        assert_eq!(
            events,
            vec![ViewEvent::InputRejected("unknown field: missing".to_owned())]
        );
        Ok(())
    }

    #[test]
    fn filter_and_sort_changes_reset_to_first_page() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 2)?;
        assert_eq!(view.dispatch(ViewCommand::LastPage), vec![ViewEvent::PageChanged(4)]);

        let events = view.dispatch(ViewCommand::SortBy("price"));
        assert_eq!(
            events,
            vec![
                ViewEvent::SortChanged(Some(SortSpec::asc("price"))),
                ViewEvent::PageChanged(1),
            ]
        );

        view.dispatch(ViewCommand::NextPage);
        let events = view.dispatch(ViewCommand::SetSearch("pro".to_owned()));
        assert_eq!(
            events,
            vec![
                ViewEvent::FiltersChanged { matched: 3 },
                ViewEvent::PageChanged(1),
            ]
        );
        Ok(())
    }

    #[test]
    fn navigation_clamps_to_available_pages() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 5)?;
        assert!(view.dispatch(ViewCommand::PrevPage).is_empty());
        assert_eq!(view.dispatch(ViewCommand::GoToPage(40)), vec![ViewEvent::PageChanged(2)]);
        assert!(view.dispatch(ViewCommand::NextPage).is_empty());
        assert_eq!(view.page().items.len(), 2);
        Ok(())
    }

    #[test]
    fn page_size_change_lands_on_first_page() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 5)?;
        view.dispatch(ViewCommand::NextPage);
        let events = view.dispatch(ViewCommand::SetPageSize(10));
        assert_eq!(
            events,
            vec![ViewEvent::PageSizeChanged(10), ViewEvent::PageChanged(1)]
        );
        assert!(matches!(
            view.dispatch(ViewCommand::SetPageSize(0)).as_slice(),
            [ViewEvent::InputRejected(_)]
        ));
        assert_eq!(view.state().page.page_size, 10);
        Ok(())
    }

    #[test]
    fn reset_keeps_page_size_and_columns() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 5)?;
        view.dispatch(ViewCommand::SetSearch("pro".to_owned()));
        view.dispatch(ViewCommand::SortBy("price"));
        view.dispatch(ViewCommand::SetColumnVisibility {
            field: "status",
            visible: false,
        });
        view.dispatch(ViewCommand::Reset);

        assert!(view.state().criteria.is_empty());
        assert_eq!(view.state().sort, None);
        assert_eq!(view.state().page, PageState { page: 1, page_size: 5 });
        assert!(!view.state().columns.is_visible("status"));
        assert_eq!(view.filtered_rows(), (0..7).collect::<Vec<_>>().as_slice());
        Ok(())
    }

    #[test]
    fn hidden_columns_only_change_projection() -> Result<()> {
        let mut view = TableView::new("assets", sample()?, 5)?;
        let events = view.dispatch(ViewCommand::SetColumnVisibility {
            field: "price",
            visible: false,
        });
        assert_eq!(
            events,
            vec![ViewEvent::ColumnToggled {
                field: "price",
                visible: false
            }]
        );
        view.dispatch(ViewCommand::SortBy("price"));
        let first = view.page_records()[0];
        assert_eq!(
            view.project(first),
            vec![
                &FieldValue::Text("AirPods Pro".to_owned()),
                &FieldValue::Text("Pending".to_owned()),
                &FieldValue::Date(day(8)),
            ]
        );
        assert_eq!(view.visible_fields().len(), 3);
        assert_eq!(
            view.dispatch(ViewCommand::ShowAllColumns),
            vec![ViewEvent::ColumnsShown]
        );
        Ok(())
    }

    #[test]
    fn event_messages_use_field_labels() {
        let schema = schema();
        assert_eq!(
            ViewEvent::SortChanged(Some(SortSpec::desc("price"))).message(&schema),
            "sort Price desc"
        );
        assert_eq!(
            ViewEvent::ColumnToggled {
                field: "created",
                visible: false
            }
            .message(&schema),
            "column hidden: Created"
        );
    }

    #[test]
    fn zero_page_size_is_rejected_at_construction() -> Result<()> {
        let error = TableView::new("assets", sample()?, 0).expect_err("zero page size");
        assert!(error.to_string().contains("invalid page size"));
        Ok(())
    }
}
