//! Terminal front-end for the booking flow.

pub mod cli;
pub mod command;

pub use cli::CliChannel;
pub use command::Command;
