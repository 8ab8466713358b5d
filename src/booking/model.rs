//! Chat message model and date presentation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bot => write!(f, "bot"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Rendering key for a message. Only needs to be unique enough to keep a
/// message list stable; nothing in the flow depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Fresh id for a bot message.
    pub fn bot() -> Self {
        Self(format!("msg-{}", Uuid::new_v4()))
    }

    /// Fresh id for a user message.
    pub fn user() -> Self {
        Self(format!("user-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One turn in the chat log. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// May span several lines (the confirmation summary does).
    pub text: String,
    pub sender: Sender,
    /// Choices the user can pick instead of typing. Empty for user messages
    /// and for bot questions that expect free text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Message {
    /// Bot message without choices.
    pub fn bot(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            options: Vec::new(),
        }
    }

    /// User message with a freshly generated id.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::user(),
            text: text.into(),
            sender: Sender::User,
            options: Vec::new(),
        }
    }

    /// Attach selectable choices.
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    /// The "didn't understand" reply.
    pub fn fallback(id: MessageId) -> Self {
        Self::bot(id, "I'm sorry, I didn't understand that. Let's try again.")
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// How calendar dates are shown to the user (short numeric form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateLocale {
    /// `6/1/2024`
    #[serde(rename = "en-US")]
    EnUs,
    /// `01/06/2024`
    #[serde(rename = "en-GB")]
    EnGb,
    /// `1.6.2024`
    #[serde(rename = "de-DE")]
    DeDe,
    /// `2024-06-01`
    #[serde(rename = "iso")]
    Iso,
}

impl DateLocale {
    /// Short date in this locale's day/month/year order.
    pub fn format(&self, date: NaiveDate) -> String {
        let pattern = match self {
            Self::EnUs => "%-m/%-d/%Y",
            Self::EnGb => "%d/%m/%Y",
            Self::DeDe => "%-d.%-m.%Y",
            Self::Iso => "%Y-%m-%d",
        };
        date.format(pattern).to_string()
    }
}

impl Default for DateLocale {
    fn default() -> Self {
        Self::EnUs
    }
}

impl std::fmt::Display for DateLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnUs => write!(f, "en-US"),
            Self::EnGb => write!(f, "en-GB"),
            Self::DeDe => write!(f, "de-DE"),
            Self::Iso => write!(f, "iso"),
        }
    }
}

impl std::str::FromStr for DateLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(Self::EnUs),
            "en-gb" => Ok(Self::EnGb),
            "de-de" | "de" => Ok(Self::DeDe),
            "iso" => Ok(Self::Iso),
            _ => Err(format!("Unknown date locale: {s}")),
        }
    }
}
