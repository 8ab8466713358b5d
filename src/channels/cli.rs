//! CLI channel — stdin/stdout REPL for booking an appointment.
//!
//! Bot messages are printed with numbered choices; the pickers and the
//! contact form become line prompts.

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::booking::{BookingSession, CollectorKind, Message, MessageId, TurnOutcome};
use crate::config::BookingConfig;
use crate::error::{ChannelError, SessionError};

use super::command::{Command, HELP};

/// Where the two-line contact form is.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ContactForm {
    Email,
    Phone { email: String },
}

/// Terminal front-end for one booking conversation.
pub struct CliChannel {
    config: BookingConfig,
    session: BookingSession,
    contact_form: Option<ContactForm>,
}

impl CliChannel {
    pub fn new(config: BookingConfig, today: NaiveDate) -> Self {
        let session = BookingSession::new(&config, today);
        Self {
            config,
            session,
            contact_form: None,
        }
    }

    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    /// Run on the process's stdin/stdout.
    pub async fn run(&mut self) -> Result<(), ChannelError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }

    /// Run until the booking completes, `/quit`, or end of input.
    pub async fn run_with<R, W>(&mut self, input: R, out: &mut W) -> Result<(), ChannelError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        if let Some(greeting) = self.session.messages().last() {
            write_out(out, &render_message(greeting)).await?;
        }
        write_out(out, "> ").await?;

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break, // EOF
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    return Err(e.into());
                }
            };

            match Command::parse(&line) {
                Command::Quit => break,
                Command::Help => write_out(out, &format!("{HELP}\n")).await?,
                Command::Restart => {
                    self.session.restart();
                    self.contact_form = None;
                    if let Some(greeting) = self.session.messages().last() {
                        write_out(out, &render_message(greeting)).await?;
                    }
                }
                Command::Transcript => {
                    let json = self.session.transcript_json()?;
                    write_out(out, &format!("{json}\n")).await?;
                }
                command => {
                    let rendered = self.handle(command, &line).await;
                    write_out(out, &rendered).await?;
                }
            }

            if self.session.is_complete() {
                return Ok(());
            }
            write_out(out, "> ").await?;
        }

        Ok(())
    }

    /// Feed one line to whatever the session is waiting for and render the
    /// result.
    async fn handle(&mut self, command: Command, line: &str) -> String {
        let result = match self.session.pending() {
            Some(CollectorKind::Date) => {
                match self.session.date_collector().parse(line) {
                    Ok(date) => self.session.submit_date(date),
                    Err(e) => Err(SessionError::Rejected(e)),
                }
            }
            Some(CollectorKind::Time) => match command {
                Command::Choice(index) => match self.session.time_collector().slot(index) {
                    Some(slot) => self.session.submit_time(slot),
                    None => self.session.submit_time(line),
                },
                _ => self.session.submit_time(line),
            },
            // Blank lines leave the contact form where it is.
            Some(CollectorKind::Contact) if line.trim().is_empty() => return String::new(),
            Some(CollectorKind::Contact) => match self.contact_form.take() {
                Some(ContactForm::Phone { email }) => {
                    self.session.submit_contact(&email, line)
                }
                _ => {
                    self.contact_form = Some(ContactForm::Phone {
                        email: line.trim().to_string(),
                    });
                    return "Phone number, e.g. (123) 456-7890:\n".to_string();
                }
            },
            None => match command {
                Command::Choice(index) if !self.session.current_options().is_empty() => {
                    self.session.select_option(index)
                }
                _ => self.session.submit_text(line),
            },
        };

        match result {
            Ok(TurnOutcome::Reply(msg)) => {
                if !self.config.reply_delay.is_zero() {
                    tokio::time::sleep(self.config.reply_delay).await;
                }
                render_message(&msg)
            }
            Ok(TurnOutcome::Collect(kind)) => self.open_collector(kind),
            Ok(TurnOutcome::Ignored) => String::new(),
            Err(SessionError::NoSuchOption { .. }) => {
                render_message(&Message::fallback(MessageId::bot()))
            }
            Err(e) => {
                let mut rendered = format!("⚠️  {e}\n");
                if let Some(kind) = self.session.pending() {
                    rendered.push_str(&self.open_collector(kind));
                }
                rendered
            }
        }
    }

    fn open_collector(&mut self, kind: CollectorKind) -> String {
        match kind {
            CollectorKind::Date => {
                let (earliest, latest) = self.session.date_collector().window();
                format!(
                    "📅 Pick a date between {earliest} and {latest} (YYYY-MM-DD):\n"
                )
            }
            CollectorKind::Time => {
                let mut rendered = String::from("🕑 Available times:\n");
                for (i, slot) in self.session.time_collector().slots().iter().enumerate() {
                    rendered.push_str(&format!("  {}. {}\n", i + 1, slot));
                }
                rendered
            }
            CollectorKind::Contact => {
                self.contact_form = Some(ContactForm::Email);
                "✉️  Email, e.g. your@email.com:\n".to_string()
            }
        }
    }
}

/// A bot message followed by its numbered choices.
pub fn render_message(msg: &Message) -> String {
    let mut rendered = format!("\n{}\n", msg.text);
    for (i, option) in msg.options.iter().enumerate() {
        rendered.push_str(&format!("  {}. {}\n", i + 1, option));
    }
    rendered.push('\n');
    rendered
}

async fn write_out<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<(), ChannelError> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
