//! Booking Assistant — scripted appointment-scheduling chat.

pub mod booking;
pub mod channels;
pub mod config;
pub mod error;
