//! The bucket widths selectable in the dashboard UI.

use std::fmt;
use std::str::FromStr;

use klima_core::KlimaError;
use serde::{Deserialize, Serialize};

/// A fixed bucket width from the dashboard's interval picker.
///
/// The core transformations accept any positive minute count; this enum
/// covers the widths the UI actually offers, with stable labels for
/// filenames and config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// One minute.
    M1,
    /// Five minutes.
    M5,
    /// Fifteen minutes.
    M15,
    /// Thirty minutes.
    M30,
    /// One hour.
    H1,
    /// Six hours.
    H6,
    /// Twelve hours.
    H12,
    /// One day.
    D1,
}

impl Interval {
    /// Every selectable width, ascending.
    pub const ALL: [Self; 8] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H6,
        Self::H12,
        Self::D1,
    ];

    /// Bucket width in minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        match self {
            Self::M1 => 1,
            Self::M5 => 5,
            Self::M15 => 15,
            Self::M30 => 30,
            Self::H1 => 60,
            Self::H6 => 360,
            Self::H12 => 720,
            Self::D1 => 1440,
        }
    }

    /// Short label used in filenames and config (`5m`, `1h`, `1d`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H6 => "6h",
            Self::H12 => "12h",
            Self::D1 => "1d",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interval {
    type Err = KlimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.label() == s)
            .ok_or_else(|| KlimaError::invalid_arg(format!("unknown interval: {s}")))
    }
}

impl TryFrom<i64> for Interval {
    type Error = KlimaError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|i| i.minutes() == minutes)
            .ok_or_else(|| KlimaError::invalid_arg(format!("unsupported interval: {minutes} minutes")))
    }
}
