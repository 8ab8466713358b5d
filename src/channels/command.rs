//! Parses a line typed at the terminal into a REPL command.

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the REPL.
    Quit,
    /// Drop the conversation and start over.
    Restart,
    /// Print the conversation as JSON.
    Transcript,
    /// Show the command list.
    Help,
    /// A 1-based number as typed, stored zero-based.
    Choice(usize),
    /// Anything else, passed on verbatim.
    Text(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        match lower.as_str() {
            "/quit" | "/exit" => Self::Quit,
            "/restart" | "/new" => Self::Restart,
            "/transcript" | "/log" => Self::Transcript,
            "/help" | "/?" => Self::Help,
            _ => parse_choice(trimmed).unwrap_or_else(|| Self::Text(line.to_string())),
        }
    }
}

/// `3` → `Choice(2)`. Zero is not a choice.
fn parse_choice(trimmed: &str) -> Option<Command> {
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: usize = trimmed.parse().ok()?;
    n.checked_sub(1).map(Command::Choice)
}

/// Shown for `/help`.
pub const HELP: &str = "\
Commands:
  <number>     pick one of the numbered choices
  /restart     start over
  /transcript  print the conversation as JSON
  /quit        leave";
