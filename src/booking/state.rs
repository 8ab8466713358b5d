//! Booking state machine — which step the conversation is on and what has
//! been collected so far.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The steps of the booking conversation.
///
/// Progresses linearly: Greeting → Name → Contact → Reason → Date → Time →
/// Confirmation → Complete. The only backward edge is Confirmation → Name
/// when the user rejects the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Greeting,
    Name,
    Contact,
    Reason,
    Date,
    Time,
    Confirmation,
    Complete,
}

impl BookingStep {
    /// Every step, in flow order.
    pub const ALL: [BookingStep; 8] = [
        BookingStep::Greeting,
        BookingStep::Name,
        BookingStep::Contact,
        BookingStep::Reason,
        BookingStep::Date,
        BookingStep::Time,
        BookingStep::Confirmation,
        BookingStep::Complete,
    ];

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: BookingStep) -> bool {
        use BookingStep::*;
        matches!(
            (self, target),
            (Greeting, Name)
                | (Name, Contact)
                | (Contact, Reason)
                | (Reason, Date)
                | (Date, Time)
                | (Time, Confirmation)
                | (Confirmation, Complete)
                | (Confirmation, Name)
        )
    }

    /// Whether this step is terminal (the appointment is booked).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for BookingStep {
    fn default() -> Self {
        Self::Greeting
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Name => "name",
            Self::Contact => "contact",
            Self::Reason => "reason",
            Self::Date => "date",
            Self::Time => "time",
            Self::Confirmation => "confirmation",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BookingStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.to_string() == s)
            .ok_or_else(|| format!("Unknown booking step: {s}"))
    }
}

/// Everything collected about the appointment so far.
///
/// Treated as a value: each turn produces a new `BookingState` rather than
/// editing the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingState {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Display label of the chosen slot, e.g. "2:00 PM".
    pub time: String,
    pub reason: String,
    pub step: BookingStep,
}

impl BookingState {
    /// A fresh state at the greeting step with nothing collected.
    pub fn initial() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            date: None,
            time: String::new(),
            reason: String::new(),
            step: BookingStep::Greeting,
        }
    }

    /// Whether both halves of the contact pair are present.
    pub fn has_contact(&self) -> bool {
        !self.email.is_empty() && !self.phone.is_empty()
    }

    /// Copy of this state moved to `step`.
    pub fn at_step(&self, step: BookingStep) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }
}

impl Default for BookingState {
    fn default() -> Self {
        Self::initial()
    }
}
