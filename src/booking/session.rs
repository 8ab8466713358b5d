//! BookingSession — owns one conversation's message log and state, and runs
//! the turn cycle around the transition function and the response generator.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::BookingConfig;
use crate::error::{CollectorError, SessionError};

use super::collectors::{CollectorKind, ContactCollector, DateCollector, TimeCollector};
use super::model::{DateLocale, Message, MessageId, Sender};
use super::responses::generate;
use super::state::{BookingState, BookingStep};
use super::transition::transition;

/// What the front-end should do after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A bot message was appended to the log; show it.
    Reply(Message),
    /// Open this collector; no bot message was appended.
    Collect(CollectorKind),
    /// Blank input, nothing happened.
    Ignored,
}

/// A single booking conversation.
pub struct BookingSession {
    state: BookingState,
    messages: Vec<Message>,
    pending: Option<CollectorKind>,
    locale: DateLocale,
    dates: DateCollector,
    times: TimeCollector,
    contact: ContactCollector,
}

impl BookingSession {
    /// Start a conversation. The log begins with the greeting.
    ///
    /// `today` is the first bookable date.
    pub fn new(config: &BookingConfig, today: NaiveDate) -> Self {
        let mut session = Self {
            state: BookingState::initial(),
            messages: Vec::new(),
            pending: None,
            locale: config.locale,
            dates: DateCollector::new(today, config.horizon_months),
            times: TimeCollector,
            contact: ContactCollector::new(),
        };
        session.reply();
        session
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The collector currently waiting for input, if any.
    pub fn pending(&self) -> Option<CollectorKind> {
        self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.state.step.is_terminal()
    }

    pub fn locale(&self) -> DateLocale {
        self.locale
    }

    pub fn date_collector(&self) -> &DateCollector {
        &self.dates
    }

    pub fn time_collector(&self) -> &TimeCollector {
        &self.times
    }

    /// Handle typed text (or a chosen option).
    ///
    /// Refused while any collector is open: dates, slots and contact details
    /// only enter the state through `submit_date`, `submit_time` and
    /// `submit_contact`, where they are validated.
    pub fn submit_text(&mut self, text: &str) -> Result<TurnOutcome, SessionError> {
        if text.trim().is_empty() {
            return Ok(TurnOutcome::Ignored);
        }
        if let Some(kind) = self.pending {
            tracing::warn!(
                step = %self.state.step,
                collector = %kind,
                "Text received while a collector is open"
            );
            return Err(SessionError::CollectorPending(kind));
        }

        self.messages.push(Message::user(text));
        let next = transition(text, &self.state);
        Ok(self.advance(next))
    }

    /// Pick option `index` (zero-based) from the latest message. Same as
    /// typing the option's text.
    pub fn select_option(&mut self, index: usize) -> Result<TurnOutcome, SessionError> {
        let option = self
            .current_options()
            .get(index)
            .cloned()
            .ok_or_else(|| SessionError::NoSuchOption {
                index,
                available: self.current_options().len(),
            })?;
        self.submit_text(&option)
    }

    /// Options on the latest message, empty if it is a user message or a
    /// plain question.
    pub fn current_options(&self) -> &[String] {
        match self.messages.last() {
            Some(msg) if msg.sender == Sender::Bot => &msg.options,
            _ => &[],
        }
    }

    /// Date picker result: store the date and open the time picker.
    pub fn submit_date(&mut self, date: NaiveDate) -> Result<TurnOutcome, SessionError> {
        self.expect_pending(CollectorKind::Date)?;
        let date = self.dates.validate(date).map_err(|e| self.rejected(e))?;

        let label = self.locale.format(date);
        self.messages
            .push(Message::user(format!("I'd like to schedule on {label}")));
        tracing::info!(date = %label, "Date selected");

        let next = BookingState {
            date: Some(date),
            ..self.state.at_step(BookingStep::Time)
        };
        Ok(self.advance(next))
    }

    /// Time picker result: store the slot and show the confirmation summary.
    pub fn submit_time(&mut self, label: &str) -> Result<TurnOutcome, SessionError> {
        self.expect_pending(CollectorKind::Time)?;
        let time = self.times.validate(label).map_err(|e| self.rejected(e))?;

        self.messages
            .push(Message::user(format!("I'd like the appointment at {time}")));
        tracing::info!(time, "Time selected");

        let next = BookingState {
            time: time.to_string(),
            ..self.state.at_step(BookingStep::Confirmation)
        };
        Ok(self.advance(next))
    }

    /// Contact form result: store both fields and ask for the reason.
    pub fn submit_contact(&mut self, email: &str, phone: &str) -> Result<TurnOutcome, SessionError> {
        self.expect_pending(CollectorKind::Contact)?;
        let contact = self
            .contact
            .validate(email, phone)
            .map_err(|e| self.rejected(e))?;

        self.messages.push(Message::user(format!(
            "My email is {} and my phone is {}",
            contact.email, contact.phone
        )));
        tracing::info!("Contact information saved");

        let next = BookingState {
            email: contact.email,
            phone: contact.phone,
            ..self.state.at_step(BookingStep::Reason)
        };
        Ok(self.advance(next))
    }

    /// Throw the conversation away and greet again.
    pub fn restart(&mut self) {
        tracing::debug!(messages = self.messages.len(), "Restarting booking conversation");
        self.state = BookingState::initial();
        self.messages.clear();
        self.pending = None;
        self.reply();
    }

    /// The log and the collected fields as pretty JSON.
    pub fn transcript_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Transcript {
            state: &self.state,
            messages: &self.messages,
        })
    }

    /// Install `next`, then either open a collector or append the reply.
    fn advance(&mut self, next: BookingState) -> TurnOutcome {
        let from = self.state.step;
        self.state = next;
        tracing::debug!(from = %from, to = %self.state.step, "Booking turn");

        let pending = collector_for(&self.state);
        self.pending = pending;
        match pending {
            Some(kind) => TurnOutcome::Collect(kind),
            None => TurnOutcome::Reply(self.reply()),
        }
    }

    fn reply(&mut self) -> Message {
        let msg = generate(&self.state, MessageId::bot(), self.locale);
        self.messages.push(msg.clone());
        msg
    }

    fn expect_pending(&self, got: CollectorKind) -> Result<(), SessionError> {
        match self.pending {
            Some(expected) if expected == got => Ok(()),
            Some(expected) => Err(SessionError::WrongCollector { expected, got }),
            None => Err(SessionError::NoCollectorPending),
        }
    }

    fn rejected(&self, err: CollectorError) -> SessionError {
        tracing::warn!(step = %self.state.step, error = %err, "Collector input rejected");
        SessionError::Rejected(err)
    }
}

/// Which collector, if any, the front-end has to open for `state`.
///
/// Date and time always go through their pickers. The contact form is only
/// needed while one of the two fields is still missing.
pub fn collector_for(state: &BookingState) -> Option<CollectorKind> {
    match state.step {
        BookingStep::Date => Some(CollectorKind::Date),
        BookingStep::Time => Some(CollectorKind::Time),
        BookingStep::Contact if !state.has_contact() => Some(CollectorKind::Contact),
        _ => None,
    }
}

#[derive(Serialize)]
struct Transcript<'a> {
    state: &'a BookingState,
    messages: &'a [Message],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn session() -> BookingSession {
        BookingSession::new(&BookingConfig::default(), today())
    }

    /// Session parked at the date picker.
    fn at_date_picker() -> BookingSession {
        let mut s = session();
        s.select_option(0).unwrap();
        s.submit_text("Jordan").unwrap();
        s.submit_contact("jordan@x.com", "555-000-1111").unwrap();
        s.submit_text("Anxiety").unwrap();
        assert_eq!(s.pending(), Some(CollectorKind::Date));
        s
    }

    #[test]
    fn starts_with_greeting_only() {
        let s = session();
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].sender, Sender::Bot);
        assert_eq!(s.current_options().len(), 2);
        assert_eq!(s.state(), &BookingState::initial());
        assert!(s.pending().is_none());
    }

    #[test]
    fn browsing_repeats_greeting() {
        let mut s = session();
        let outcome = s.select_option(1).unwrap();
        match outcome {
            TurnOutcome::Reply(msg) => assert!(msg.text.starts_with("Hello!")),
            other => panic!("expected greeting reply, got {other:?}"),
        }
        assert_eq!(s.state().step, BookingStep::Greeting);
        assert_eq!(s.messages().len(), 3);
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut s = session();
        assert_eq!(s.submit_text("   ").unwrap(), TurnOutcome::Ignored);
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn name_opens_contact_form() {
        let mut s = session();
        s.submit_text("yes").unwrap();
        let outcome = s.submit_text("Jordan").unwrap();
        assert_eq!(outcome, TurnOutcome::Collect(CollectorKind::Contact));
        assert_eq!(s.state().name, "Jordan");
        // Only the user's answer was appended.
        assert_eq!(s.messages().last().map(|m| m.sender), Some(Sender::User));
    }

    #[test]
    fn contact_form_blocks_text() {
        let mut s = session();
        s.submit_text("yes").unwrap();
        s.submit_text("Jordan").unwrap();
        let before = s.messages().len();
        assert_eq!(
            s.submit_text("call me at 5").unwrap_err(),
            SessionError::CollectorPending(CollectorKind::Contact)
        );
        assert!(s.state().phone.is_empty());
        assert_eq!(s.messages().len(), before);
    }

    #[test]
    fn time_picker_only_takes_listed_slots() {
        let mut s = at_date_picker();
        s.submit_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap();
        assert_eq!(
            s.submit_text("banana at midnight").unwrap_err(),
            SessionError::CollectorPending(CollectorKind::Time)
        );
        assert_eq!(
            s.submit_time("banana at midnight").unwrap_err(),
            SessionError::Rejected(CollectorError::UnknownTimeSlot(
                "banana at midnight".to_string()
            ))
        );
        assert!(s.state().time.is_empty());
        assert_eq!(s.state().step, BookingStep::Time);
        assert_eq!(s.pending(), Some(CollectorKind::Time));
    }

    #[test]
    fn contact_form_validates() {
        let mut s = session();
        s.submit_text("yes").unwrap();
        s.submit_text("Jordan").unwrap();
        let before = s.messages().len();

        let err = s.submit_contact("jordan", "555-000-1111").unwrap_err();
        assert_eq!(err, SessionError::Rejected(CollectorError::InvalidEmail));
        assert_eq!(s.messages().len(), before);
        assert_eq!(s.pending(), Some(CollectorKind::Contact));

        s.submit_contact("jordan@x.com", "555-000-1111").unwrap();
        let echo = &s.messages()[before];
        assert_eq!(echo.text, "My email is jordan@x.com and my phone is 555-000-1111");
        assert_eq!(s.state().step, BookingStep::Reason);
    }

    #[test]
    fn date_picker_blocks_text() {
        let mut s = at_date_picker();
        assert_eq!(
            s.submit_text("tomorrow").unwrap_err(),
            SessionError::CollectorPending(CollectorKind::Date)
        );
    }

    #[test]
    fn date_then_time_reaches_confirmation() {
        let mut s = at_date_picker();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        assert_eq!(
            s.submit_date(date).unwrap(),
            TurnOutcome::Collect(CollectorKind::Time)
        );
        assert_eq!(
            s.messages().last().map(|m| m.text.as_str()),
            Some("I'd like to schedule on 6/1/2024")
        );

        match s.submit_time("2:00 PM").unwrap() {
            TurnOutcome::Reply(msg) => {
                assert!(msg.text.contains("Date: 6/1/2024"));
                assert!(msg.text.contains("Time: 2:00 PM"));
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
        assert_eq!(s.state().step, BookingStep::Confirmation);
    }

    #[test]
    fn out_of_window_date_is_rejected() {
        let mut s = at_date_picker();
        let past = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(matches!(
            s.submit_date(past),
            Err(SessionError::Rejected(CollectorError::DateInPast { .. }))
        ));
        assert_eq!(s.state().step, BookingStep::Date);
    }

    #[test]
    fn collector_callbacks_check_what_is_open() {
        let mut s = session();
        assert_eq!(
            s.submit_time("2:00 PM").unwrap_err(),
            SessionError::NoCollectorPending
        );

        let mut s = at_date_picker();
        assert_eq!(
            s.submit_time("2:00 PM").unwrap_err(),
            SessionError::WrongCollector {
                expected: CollectorKind::Date,
                got: CollectorKind::Time,
            }
        );
    }

    #[test]
    fn unknown_option_index() {
        let mut s = session();
        assert_eq!(
            s.select_option(5).unwrap_err(),
            SessionError::NoSuchOption {
                index: 5,
                available: 2
            }
        );
    }

    #[test]
    fn restart_starts_fresh() {
        let mut s = at_date_picker();
        s.restart();
        assert_eq!(s.state(), &BookingState::initial());
        assert_eq!(s.messages().len(), 1);
        assert!(s.pending().is_none());
    }

    #[test]
    fn transcript_is_json() {
        let mut s = session();
        s.submit_text("yes").unwrap();
        let json: serde_json::Value = serde_json::from_str(&s.transcript_json().unwrap()).unwrap();
        assert_eq!(json["state"]["step"], "name");
        assert_eq!(json["messages"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["messages"][1]["sender"], "user");
    }

    #[test]
    fn collector_for_steps() {
        let mut state = BookingState::initial().at_step(BookingStep::Contact);
        assert_eq!(collector_for(&state), Some(CollectorKind::Contact));
        state.email = "a@b.com".to_string();
        state.phone = "555-123-4567".to_string();
        assert_eq!(collector_for(&state), None);
        assert_eq!(
            collector_for(&state.at_step(BookingStep::Date)),
            Some(CollectorKind::Date)
        );
        assert_eq!(
            collector_for(&state.at_step(BookingStep::Time)),
            Some(CollectorKind::Time)
        );
        assert_eq!(collector_for(&state.at_step(BookingStep::Reason)), None);
    }
}
