//! Bot replies for each booking step.

use super::model::{DateLocale, Message, MessageId};
use super::state::{BookingState, BookingStep};

/// Choices offered with the greeting.
pub const GREETING_OPTIONS: [&str; 2] = ["Yes, I'd like to schedule", "Just browsing"];

/// Choices offered when asking for the reason of the visit.
pub const REASON_OPTIONS: [&str; 6] = [
    "Anxiety",
    "Depression",
    "Relationship issues",
    "Stress management",
    "Trauma/PTSD",
    "Other",
];

/// Choices offered with the confirmation summary.
pub const CONFIRMATION_OPTIONS: [&str; 2] = ["Confirm appointment", "Edit information"];

/// Build the bot message for the step `state` is on.
///
/// Pure: the same state, id and locale always give the same message. The
/// caller owns id generation.
pub fn generate(state: &BookingState, id: MessageId, locale: DateLocale) -> Message {
    match state.step {
        BookingStep::Greeting => Message::bot(
            id,
            "Hello! I'm your therapy scheduling assistant. I can help you book a session \
             with our therapists. Would you like to schedule an appointment?",
        )
        .with_options(&GREETING_OPTIONS),

        BookingStep::Name => Message::bot(id, "Great! Let's get started. What's your name?"),

        BookingStep::Contact => Message::bot(
            id,
            format!(
                "Nice to meet you, {}! I'll need your email and phone number to confirm \
                 the appointment.",
                state.name
            ),
        ),

        BookingStep::Reason => Message::bot(
            id,
            "Thank you. What's the primary reason for your visit?",
        )
        .with_options(&REASON_OPTIONS),

        BookingStep::Date => {
            Message::bot(id, "When would you like to schedule your appointment?")
        }

        BookingStep::Time => Message::bot(
            id,
            format!(
                "What time works best for you on {}?",
                display_date(state, locale, "your selected date")
            ),
        ),

        BookingStep::Confirmation => {
            Message::bot(id, confirmation_summary(state, locale)).with_options(&CONFIRMATION_OPTIONS)
        }

        BookingStep::Complete => Message::bot(
            id,
            format!(
                "Thank you, {}! Your appointment has been scheduled successfully. \
                 You'll receive a confirmation email shortly.\n\n\
                 If you need to reschedule or cancel, please contact us at least 24 hours \
                 before your appointment.\n\n\
                 See you soon!",
                state.name
            ),
        ),
    }
}

/// Multi-line summary of everything collected, shown for confirmation.
pub fn confirmation_summary(state: &BookingState, locale: DateLocale) -> String {
    let lines = [
        "Great! Please confirm your appointment details:".to_string(),
        String::new(),
        format!("Name: {}", state.name),
        format!("Email: {}", state.email),
        format!("Phone: {}", state.phone),
        format!("Date: {}", display_date(state, locale, "Not selected")),
        format!("Time: {}", state.time),
        format!("Reason: {}", state.reason),
        String::new(),
        "Is this information correct?".to_string(),
    ];
    lines.join("\n")
}

fn display_date(state: &BookingState, locale: DateLocale, missing: &str) -> String {
    state
        .date
        .map(|d| locale.format(d))
        .unwrap_or_else(|| missing.to_string())
}
