//! Booking flow — the scripted appointment-scheduling conversation.
//!
//! The bot walks the user through a fixed sequence of steps, collecting
//! name, contact details, reason for the visit, date and time. `transition`
//! and `generate` are the pure core; `BookingSession` wraps them with a
//! message log and the structured collectors.

pub mod collectors;
pub mod model;
pub mod responses;
pub mod session;
pub mod state;
pub mod transition;

pub use collectors::{CollectorKind, Contact, ContactCollector, DateCollector, TimeCollector};
pub use model::{DateLocale, Message, MessageId, Sender};
pub use responses::generate;
pub use session::{BookingSession, TurnOutcome};
pub use state::{BookingState, BookingStep};
pub use transition::transition;
