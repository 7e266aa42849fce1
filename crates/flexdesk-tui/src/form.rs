// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use flexdesk_app::validation::format_date;
use flexdesk_app::{
    Constraint, DateRange, FieldKind, FilterCriteria, Schema, TableView, ViewCommand,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputKind {
    Contains,
    Choice(Vec<String>),
    Min,
    Max,
    From,
    To,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormInput {
    pub field: &'static str,
    pub label: String,
    pub kind: InputKind,
    pub value: String,
    /// Date inputs bound to the view-wide window rather than a field filter.
    pub window: bool,
}

impl FormInput {
    fn new(field: &'static str, label: String, kind: InputKind, value: String) -> Self {
        Self {
            field,
            label,
            kind,
            value,
            window: false,
        }
    }

    fn is_text(&self) -> bool {
        !matches!(self.kind, InputKind::Choice(_))
    }
}

/// Advanced filter form built from a view's schema and prefilled from its criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilterForm {
    pub inputs: Vec<FormInput>,
    pub cursor: usize,
}

impl FilterForm {
    /// `with_window` appends the view-wide window pair after the field inputs.
    pub fn for_view(view: &TableView, with_window: bool) -> Self {
        let schema = view.schema();
        let criteria = &view.state().criteria;
        let mut inputs = Vec::new();

        for spec in schema.fields() {
            let current = criteria.fields.get(spec.key);
            match spec.kind {
                FieldKind::Text => inputs.push(FormInput::new(
                    spec.key,
                    spec.label.to_owned(),
                    InputKind::Contains,
                    match current {
                        Some(Constraint::Contains(text)) => text.clone(),
                        _ => String::new(),
                    },
                )),
                FieldKind::Enum => inputs.push(FormInput::new(
                    spec.key,
                    spec.label.to_owned(),
                    InputKind::Choice(view.enum_options(spec.key)),
                    match current {
                        Some(Constraint::Equals(value)) => value.clone(),
                        _ => String::new(),
                    },
                )),
                FieldKind::Integer | FieldKind::Number => {
                    let (min, max) = match current {
                        Some(Constraint::Range { min, max }) => {
                            (format_bound(*min), format_bound(*max))
                        }
                        _ => (String::new(), String::new()),
                    };
                    inputs.push(FormInput::new(
                        spec.key,
                        format!("{} min", spec.label),
                        InputKind::Min,
                        min,
                    ));
                    inputs.push(FormInput::new(
                        spec.key,
                        format!("{} max", spec.label),
                        InputKind::Max,
                        max,
                    ));
                }
                FieldKind::Date => {
                    let range = match current {
                        Some(Constraint::DateRange(range)) => *range,
                        _ => DateRange::default(),
                    };
                    push_date_pair(&mut inputs, spec.key, spec.label, range, false);
                }
            }
        }

        if with_window && let Some(key) = schema.date_field() {
            push_date_pair(&mut inputs, key, "Window", criteria.window, true);
        }

        Self { inputs, cursor: 0 }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.inputs.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn current(&self) -> Option<&FormInput> {
        self.inputs.get(self.cursor)
    }

    pub fn push_char(&mut self, ch: char) {
        if let Some(input) = self.inputs.get_mut(self.cursor)
            && input.is_text()
        {
            input.value.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.cursor)
            && input.is_text()
        {
            input.value.pop();
        }
    }

    pub fn clear_current(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.cursor) {
            input.value.clear();
        }
    }

    /// Steps a choice input through "All" then each option.
    pub fn cycle_choice(&mut self, delta: isize) {
        let Some(input) = self.inputs.get_mut(self.cursor) else {
            return;
        };
        let InputKind::Choice(options) = &input.kind else {
            return;
        };
        let slots = options.len() as isize + 1;
        let current = options
            .iter()
            .position(|option| *option == input.value)
            .map_or(0, |index| index as isize + 1);
        let next = (current + delta).rem_euclid(slots);
        input.value = if next == 0 {
            String::new()
        } else {
            options[(next - 1) as usize].clone()
        };
    }

    /// Commands that make the view's criteria match the form.
    pub fn commands(&self) -> Vec<ViewCommand> {
        let mut commands = Vec::new();
        let mut index = 0;
        while index < self.inputs.len() {
            let input = &self.inputs[index];
            match &input.kind {
                InputKind::Contains => {
                    commands.push(text_command(input.field, &input.value, Constraint::Contains));
                    index += 1;
                }
                InputKind::Choice(_) => {
                    commands.push(text_command(input.field, &input.value, Constraint::Equals));
                    index += 1;
                }
                InputKind::Min | InputKind::Max => {
                    let (min, max) = self.pair(index);
                    commands.push(if min.trim().is_empty() && max.trim().is_empty() {
                        ViewCommand::ClearFilter(input.field)
                    } else {
                        ViewCommand::SetRangeText {
                            field: input.field,
                            min,
                            max,
                        }
                    });
                    index += 2;
                }
                InputKind::From | InputKind::To => {
                    let (from, to) = self.pair(index);
                    commands.push(if input.window {
                        ViewCommand::SetWindowText { from, to }
                    } else if from.trim().is_empty() && to.trim().is_empty() {
                        ViewCommand::ClearFilter(input.field)
                    } else {
                        ViewCommand::SetDateRangeText {
                            field: input.field,
                            from,
                            to,
                        }
                    });
                    index += 2;
                }
            }
        }
        commands
    }

    fn pair(&self, index: usize) -> (String, String) {
        let first = self.inputs[index].value.clone();
        let second = self
            .inputs
            .get(index + 1)
            .map(|input| input.value.clone())
            .unwrap_or_default();
        (first, second)
    }
}

fn text_command(
    field: &'static str,
    value: &str,
    build: fn(String) -> Constraint,
) -> ViewCommand {
    let value = value.trim();
    if value.is_empty() {
        ViewCommand::ClearFilter(field)
    } else {
        ViewCommand::SetConstraint {
            field,
            constraint: build(value.to_owned()),
        }
    }
}

fn push_date_pair(
    inputs: &mut Vec<FormInput>,
    field: &'static str,
    label: &str,
    range: DateRange,
    window: bool,
) {
    for (kind, suffix, value) in [
        (InputKind::From, "from", range.from),
        (InputKind::To, "to", range.to),
    ] {
        let mut input = FormInput::new(
            field,
            format!("{label} {suffix}"),
            kind,
            value.map(format_date).unwrap_or_default(),
        );
        input.window = window;
        inputs.push(input);
    }
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map(|value| value.to_string()).unwrap_or_default()
}

pub(crate) fn render_filter_form_text(form: &FilterForm, schema: &Schema) -> String {
    let mut lines = vec![format!(
        "{} fields | j/k or tab move | type to edit | h/l choose | ctrl+u clear | enter apply | esc cancel",
        schema.len()
    )];
    lines.push(String::new());
    for (index, input) in form.inputs.iter().enumerate() {
        let marker = if index == form.cursor { ">" } else { " " };
        let value = match (&input.kind, input.value.is_empty()) {
            (InputKind::Choice(_), true) => "All".to_owned(),
            (InputKind::Choice(_), false) => format!("< {} >", input.value),
            (InputKind::From | InputKind::To, true) => "YYYY-MM-DD".to_owned(),
            (_, true) => "_".to_owned(),
            (_, false) => input.value.clone(),
        };
        lines.push(format!("{marker} {:<24} {value}", input.label));
    }
    lines.join("\n")
}

/// Reports whether any criteria beyond search are set.
pub(crate) fn has_advanced_filters(criteria: &FilterCriteria) -> bool {
    criteria.window.is_active()
        || criteria
            .fields
            .values()
            .any(|constraint| constraint.is_active())
}
