//! Input widgets for the structured enrollment fields

use super::record::Attachment;
use chrono::{Duration, Months, NaiveDate};
use thiserror::Error;

/// Separator between paths typed into the file chooser
pub const PATH_SEPARATOR: char = ',';

/// Earliest date the picker will scroll to
pub fn earliest_selectable_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Display format used by the date picker
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date segment adjusted by the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSegment {
    #[default]
    Year,
    Month,
    Day,
}

impl DateSegment {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }
}

/// Keyboard date picker. Holds only the cursor; the value lives in the record.
#[derive(Debug, Clone, Default)]
pub struct DatePicker {
    pub segment: DateSegment,
}

impl DatePicker {
    pub fn next_segment(&mut self) {
        self.segment = match self.segment {
            DateSegment::Year => DateSegment::Month,
            DateSegment::Month | DateSegment::Day => DateSegment::Day,
        };
    }

    pub fn prev_segment(&mut self) {
        self.segment = match self.segment {
            DateSegment::Day => DateSegment::Month,
            DateSegment::Month | DateSegment::Year => DateSegment::Year,
        };
    }

    /// Move `current` by `delta` units of the focused segment.
    ///
    /// An unset date opens at `max`. The result never goes past `max`, so
    /// dates later than it cannot be selected.
    pub fn shift(&self, current: Option<NaiveDate>, delta: i32, max: NaiveDate) -> NaiveDate {
        let Some(date) = current else {
            return max;
        };

        let shifted = match self.segment {
            DateSegment::Year => shift_months(date, delta.saturating_mul(12)),
            DateSegment::Month => shift_months(date, delta),
            DateSegment::Day => date.checked_add_signed(Duration::days(i64::from(delta))),
        }
        .unwrap_or(date);

        shifted.clamp(earliest_selectable_date().min(max), max)
    }
}

fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// File selection refused by the chooser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{name} is not an image or PDF")]
    UnsupportedType { name: String },
}

/// Path entry standing in for an OS file chooser
#[derive(Debug, Clone, Default)]
pub struct FileChooser {
    pub input: String,
}

impl FileChooser {
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// The complete selection described by the typed paths
    pub fn selection(&self) -> Result<Vec<Attachment>, SelectionError> {
        self.input
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let attachment = Attachment::from_path(p);
                if attachment.is_accepted() {
                    Ok(attachment)
                } else {
                    Err(SelectionError::UnsupportedType {
                        name: attachment.name,
                    })
                }
            })
            .collect()
    }
}
