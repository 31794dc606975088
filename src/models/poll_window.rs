use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound (unix seconds) passed as `from_date` on every status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PollWindow(i64);

impl PollWindow {
    pub fn new(from_date: i64) -> Self {
        Self(from_date)
    }

    pub fn now() -> Self {
        Self(crate::utils::time::now_timestamp())
    }

    pub fn from_date(&self) -> i64 {
        self.0
    }

    /// Moves the window forward to `from_date`. Never moves it backward.
    pub fn advance_to(&mut self, from_date: i64) -> bool {
        if from_date > self.0 {
            self.0 = from_date;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for PollWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// Keep the initial `from_date` for the whole run.
    #[default]
    Fixed,
    /// Advance to the response's `current_date` after a fully handled cycle.
    CurrentDate,
}

impl FromStr for WindowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(WindowMode::Fixed),
            "current_date" => Ok(WindowMode::CurrentDate),
            other => Err(format!(
                "unknown window mode '{}', expected 'fixed' or 'current_date'",
                other
            )),
        }
    }
}
