//! Date formats used on each side of the tool.
//!
//! - `YYYY-MM-DD` for user input and display
//! - `YYYYMMDD` for API request paths
//! - `YYYYMMDD00` for API response timestamps (the trailing hour is always `00`)

use chrono::NaiveDate;

use crate::error::CompareError;

const INPUT_FORMAT: &str = "%Y-%m-%d";
const API_DATE_FORMAT: &str = "%Y%m%d";

/// Inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range whose start is after its end covers no days.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn num_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}

pub fn parse_input_date(input: &str) -> Result<NaiveDate, CompareError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, INPUT_FORMAT)
        .map_err(|_| CompareError::InvalidDate(trimmed.to_string()))
}

pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// Parses an API timestamp such as `2024010100`.
pub fn parse_api_timestamp(timestamp: &str) -> Result<NaiveDate, CompareError> {
    let invalid = || CompareError::Decode(format!("invalid timestamp '{}'", timestamp));
    let day = timestamp.strip_suffix("00").ok_or_else(invalid)?;
    if day.len() != 8 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(day, API_DATE_FORMAT).map_err(|_| invalid())
}
