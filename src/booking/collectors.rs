//! Structured collectors — the pickers and the contact form.
//!
//! These gather values that free text is a poor fit for and validate them
//! before the session writes them into the booking state.

use chrono::{Months, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CollectorError;

/// Bookable time slots, in display order.
pub const TIME_SLOTS: [&str; 7] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
];

/// Which collector the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorKind {
    Date,
    Time,
    Contact,
}

impl std::fmt::Display for CollectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Contact => write!(f, "contact"),
        }
    }
}

/// A validated email + phone pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

/// Validates the contact form.
pub struct ContactCollector {
    email: Regex,
    phone: Regex,
}

impl ContactCollector {
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(),
            // North American 10 digits, optional parentheses and separators.
            phone: Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$").unwrap(),
        }
    }

    pub fn validate_email(&self, email: &str) -> Result<String, CollectorError> {
        let email = email.trim();
        if self.email.is_match(email) {
            Ok(email.to_string())
        } else {
            Err(CollectorError::InvalidEmail)
        }
    }

    pub fn validate_phone(&self, phone: &str) -> Result<String, CollectorError> {
        let phone = phone.trim();
        if self.phone.is_match(phone) {
            Ok(phone.to_string())
        } else {
            Err(CollectorError::InvalidPhone)
        }
    }

    /// Validate both fields. The email is checked first, so a form with two
    /// bad fields reports the email.
    pub fn validate(&self, email: &str, phone: &str) -> Result<Contact, CollectorError> {
        let email = self.validate_email(email)?;
        let phone = self.validate_phone(phone)?;
        Ok(Contact { email, phone })
    }
}

impl Default for ContactCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Date picker bounds: from today up to `horizon_months` ahead, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCollector {
    earliest: NaiveDate,
    latest: NaiveDate,
}

impl DateCollector {
    pub fn new(today: NaiveDate, horizon_months: u32) -> Self {
        let latest = today
            .checked_add_months(Months::new(horizon_months))
            .unwrap_or(NaiveDate::MAX);
        Self {
            earliest: today,
            latest,
        }
    }

    /// Inclusive bounds of bookable dates.
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        (self.earliest, self.latest)
    }

    pub fn validate(&self, date: NaiveDate) -> Result<NaiveDate, CollectorError> {
        if date < self.earliest {
            return Err(CollectorError::DateInPast {
                date: date.to_string(),
                earliest: self.earliest.to_string(),
            });
        }
        if date > self.latest {
            return Err(CollectorError::DateBeyondHorizon {
                date: date.to_string(),
                latest: self.latest.to_string(),
            });
        }
        Ok(date)
    }

    /// Parse `YYYY-MM-DD` and check it against the window.
    pub fn parse(&self, input: &str) -> Result<NaiveDate, CollectorError> {
        let trimmed = input.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| CollectorError::UnparseableDate(trimmed.to_string()))?;
        self.validate(date)
    }
}

/// The time-slot picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeCollector;

impl TimeCollector {
    pub fn slots(&self) -> &'static [&'static str] {
        &TIME_SLOTS
    }

    /// Slot by zero-based position.
    pub fn slot(&self, index: usize) -> Option<&'static str> {
        TIME_SLOTS.get(index).copied()
    }

    /// Accept a slot label, ignoring case and surrounding whitespace.
    pub fn validate(&self, label: &str) -> Result<&'static str, CollectorError> {
        let wanted = label.trim();
        TIME_SLOTS
            .iter()
            .copied()
            .find(|slot| slot.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CollectorError::UnknownTimeSlot(wanted.to_string()))
    }
}
