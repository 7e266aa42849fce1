// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::cmp::Ordering;
use time::Date;

use crate::validation::{format_date, format_grouped_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Enum,
    Integer,
    Number,
    Date,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Enum => "enum",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Date => "date",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }

    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Text | Self::Enum)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Date(Date),
}

impl FieldValue {
    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Number(value) => format_grouped_number(*value),
            Self::Date(value) => format_date(*value),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Self::Text(_), FieldKind::Text | FieldKind::Enum)
                | (Self::Integer(_), FieldKind::Integer)
                | (Self::Number(_), FieldKind::Number)
                | (Self::Date(_), FieldKind::Date)
        )
    }

    /// Native ordering per value type: byte-wise lexicographic for text,
    /// numeric for numbers, chronological for dates.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (left, right) => match (left.as_number(), right.as_number()) {
                (Some(left), Some(right)) => left.total_cmp(&right),
                _ => left.display().cmp(&right.display()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub searchable: bool,
    pub currency: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            searchable: false,
            currency: false,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub const fn enumeration(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Enum)
    }

    pub const fn integer(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Integer)
    }

    pub const fn number(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub const fn date(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub const fn currency(mut self) -> Self {
        self.currency = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    date_field: Option<&'static str>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            date_field: None,
        }
    }

    /// Field targeted by the view-wide date window.
    pub fn with_date_field(mut self, key: &'static str) -> Self {
        self.date_field = Some(key);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.key == key)
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn date_field(&self) -> Option<&'static str> {
        self.date_field
    }

    pub fn searchable_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.searchable)
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<FieldValue>,
}

impl Record {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn value(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

/// Typed rows that can be shown by a table view.
pub trait TableRow {
    fn schema() -> Schema;
    fn to_record(&self) -> Record;
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    schema: Schema,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(schema: Schema, records: Vec<Record>) -> Result<Self> {
        if let Some(date_field) = schema.date_field()
            && schema
                .field(date_field)
                .is_none_or(|field| field.kind != FieldKind::Date)
        {
            bail!("date window field {date_field:?} is not a date field of the schema");
        }

        for (row, record) in records.iter().enumerate() {
            if record.values.len() != schema.len() {
                bail!(
                    "record {row} has {} values; schema declares {} fields",
                    record.values.len(),
                    schema.len()
                );
            }
            for (value, field) in record.values.iter().zip(schema.fields()) {
                if !value.fits(field.kind) {
                    bail!(
                        "record {row} field {:?} holds {value:?}; expected {}",
                        field.key,
                        field.kind.label()
                    );
                }
            }
        }

        Ok(Self { schema, records })
    }

    pub fn from_rows<T: TableRow>(rows: &[T]) -> Self {
        Self {
            schema: T::schema(),
            records: rows.iter().map(TableRow::to_record).collect(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize, key: &str) -> Option<&FieldValue> {
        let index = self.schema.index_of(key)?;
        self.records.get(row)?.value(index)
    }

    /// Distinct values of a field in load order.
    pub fn distinct_values(&self, key: &str) -> Vec<String> {
        let Some(index) = self.schema.index_of(key) else {
            return Vec::new();
        };
        let mut seen = Vec::new();
        for record in &self.records {
            if let Some(value) = record.value(index) {
                let value = value.display();
                if !seen.contains(&value) {
                    seen.push(value);
                }
            }
        }
        seen
    }
}
