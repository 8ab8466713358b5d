//! Configuration types.

use std::time::Duration;

use crate::booking::model::DateLocale;
use crate::error::ConfigError;

/// Booking assistant configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// How dates are shown in bot replies.
    pub locale: DateLocale,
    /// Pause before each bot reply so the chat doesn't feel instant.
    pub reply_delay: Duration,
    /// How many months ahead an appointment may be booked.
    pub horizon_months: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            locale: DateLocale::default(),
            reply_delay: Duration::from_millis(700),
            horizon_months: 3,
        }
    }
}

impl BookingConfig {
    /// Load from `BOOKING_*` environment variables, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let locale = match lookup("BOOKING_LOCALE") {
            Some(raw) => raw.parse::<DateLocale>().map_err(|message| ConfigError::InvalidValue {
                key: "BOOKING_LOCALE".to_string(),
                message,
            })?,
            None => defaults.locale,
        };

        let reply_delay = match lookup("BOOKING_REPLY_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_number("BOOKING_REPLY_DELAY_MS", &raw)?),
            None => defaults.reply_delay,
        };

        let horizon_months = match lookup("BOOKING_HORIZON_MONTHS") {
            Some(raw) => parse_number("BOOKING_HORIZON_MONTHS", &raw)?,
            None => defaults.horizon_months,
        };

        Ok(Self {
            locale,
            reply_delay,
            horizon_months,
        })
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = BookingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BookingConfig::default());
        assert_eq!(config.locale, DateLocale::EnUs);
        assert_eq!(config.reply_delay, Duration::from_millis(700));
        assert_eq!(config.horizon_months, 3);
    }

    #[test]
    fn reads_overrides() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("BOOKING_LOCALE", "en-GB"),
            ("BOOKING_REPLY_DELAY_MS", "0"),
            ("BOOKING_HORIZON_MONTHS", " 6 "),
        ]))
        .unwrap();
        assert_eq!(config.locale, DateLocale::EnGb);
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.horizon_months, 6);
    }

    #[test]
    fn rejects_bad_values() {
        let err = BookingConfig::from_lookup(lookup(&[("BOOKING_LOCALE", "xx")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "BOOKING_LOCALE"));

        let err =
            BookingConfig::from_lookup(lookup(&[("BOOKING_REPLY_DELAY_MS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("BOOKING_REPLY_DELAY_MS"));

        let err =
            BookingConfig::from_lookup(lookup(&[("BOOKING_HORIZON_MONTHS", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
