// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub const PAGE_SIZE_CHOICES: [usize; 5] = [5, 10, 20, 50, 100];
pub const CURRENCY_SYMBOL: &str = "₦";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidNumber,
    InvalidDate,
    InvalidPageSize,
    UnknownField,
    ConstraintMismatch,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber => f.write_str("invalid number"),
            Self::InvalidDate => f.write_str("invalid date"),
            Self::InvalidPageSize => f.write_str("invalid page size"),
            Self::UnknownField => f.write_str("unknown field"),
            Self::ConstraintMismatch => f.write_str("filter does not apply to this field"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Parses a numeric filter bound. Blank input means "no bound".
pub fn parse_optional_number(input: &str) -> ValidationResult<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let clean = trimmed
        .strip_prefix(CURRENCY_SYMBOL)
        .unwrap_or(trimmed)
        .replace(',', "");
    let value = clean
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber);
    }
    Ok(Some(value))
}

/// Accepts `YYYY-MM-DD` and the picker's `DD/MM/YYYY`.
pub fn parse_optional_date(input: &str) -> ValidationResult<Option<Date>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed).map(Some)
}

pub fn parse_date(input: &str) -> ValidationResult<Date> {
    let iso = format_description!("[year]-[month]-[day]");
    let picker = format_description!("[day]/[month]/[year]");
    Date::parse(input, &iso)
        .or_else(|_| Date::parse(input, &picker))
        .map_err(|_| ValidationError::InvalidDate)
}

pub fn format_date(value: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        value.year(),
        u8::from(value.month()),
        value.day()
    )
}

pub fn validate_page_size(size: usize) -> ValidationResult<usize> {
    if size == 0 {
        return Err(ValidationError::InvalidPageSize);
    }
    Ok(size)
}

/// Next selector choice above or below `current`, clamped to the ends.
pub fn step_page_size(current: usize, delta: isize) -> usize {
    let position = PAGE_SIZE_CHOICES
        .iter()
        .position(|choice| *choice >= current)
        .unwrap_or(PAGE_SIZE_CHOICES.len() - 1);
    let next = (position as isize + delta).clamp(0, PAGE_SIZE_CHOICES.len() as isize - 1);
    PAGE_SIZE_CHOICES[next as usize]
}

pub fn format_grouped_number(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let whole = magnitude.trunc() as u64;
    let grouped = comma_format(whole);
    let fraction = magnitude.fract();
    if fraction < f64::EPSILON {
        format!("{sign}{grouped}")
    } else {
        let cents = (fraction * 100.0).round() as u64;
        if cents >= 100 {
            format!("{sign}{}", comma_format(whole + 1))
        } else {
            format!("{sign}{grouped}.{cents:02}")
        }
    }
}

pub fn format_naira(value: f64) -> String {
    if value < 0.0 {
        return format!("-{CURRENCY_SYMBOL}{}", format_grouped_number(-value));
    }
    format!("{CURRENCY_SYMBOL}{}", format_grouped_number(value))
}

fn comma_format(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
