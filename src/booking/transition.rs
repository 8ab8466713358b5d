//! The booking state transition function.
//!
//! `transition` maps the current state plus one piece of user input to the
//! next state. It is total: any input at any step yields a state, possibly
//! the same one.

use super::state::{BookingState, BookingStep};

/// Words that mean "yes, book it" on the greeting step.
const GREETING_ACCEPT: [&str; 2] = ["yes", "schedule"];

/// Words that accept the confirmation summary.
const CONFIRMATION_ACCEPT: [&str; 3] = ["confirm", "yes", "correct"];

/// Compute the state that follows `state` after the user says `input`.
///
/// Blank input is not rejected: it is trimmed to an empty string and stored,
/// so a blank name still advances to the contact step.
pub fn transition(input: &str, state: &BookingState) -> BookingState {
    let mut next = state.clone();
    let trimmed = input.trim();

    match state.step {
        BookingStep::Greeting => {
            if contains_any(input, &GREETING_ACCEPT) {
                next.step = BookingStep::Name;
            }
        }

        BookingStep::Name => {
            next.name = trimmed.to_string();
            next.step = BookingStep::Contact;
        }

        BookingStep::Contact => {
            // Heuristic only: "@" means email, any digit means phone. The
            // contact collector does the real validation.
            match classify_contact(input) {
                Some(ContactField::Email) => next.email = trimmed.to_string(),
                Some(ContactField::Phone) => next.phone = trimmed.to_string(),
                None => {}
            }
            if next.has_contact() {
                next.step = BookingStep::Reason;
            }
        }

        BookingStep::Reason => {
            next.reason = trimmed.to_string();
            next.step = BookingStep::Date;
        }

        // Dates only arrive through the date collector.
        BookingStep::Date => {}

        BookingStep::Time => {
            next.time = trimmed.to_string();
            next.step = BookingStep::Confirmation;
        }

        BookingStep::Confirmation => {
            // Rejection goes back to the name question but keeps what was
            // collected; re-answering overwrites field by field.
            next.step = if contains_any(input, &CONFIRMATION_ACCEPT) {
                BookingStep::Complete
            } else {
                BookingStep::Name
            };
        }

        BookingStep::Complete => {}
    }

    next
}

/// Which contact field a free-text answer is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Phone,
}

/// Guess whether `input` is an email or a phone number.
///
/// Anything with an `@` is an email, even if it also contains digits.
/// Otherwise any ASCII digit makes it a phone number, which misfiles text
/// like "call me at 5, not email".
pub fn classify_contact(input: &str) -> Option<ContactField> {
    if input.contains('@') {
        Some(ContactField::Email)
    } else if input.chars().any(|c| c.is_ascii_digit()) {
        Some(ContactField::Phone)
    } else {
        None
    }
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    let lower = input.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}
