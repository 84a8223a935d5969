// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FoxSched.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A day-local wall-clock value (hour and minute, no date, no timezone).
///
/// Ordering is derived field-by-field, which is equivalent to ordering by
/// `hour * 60 + minute` since `minute` is always below 60.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Time {
    hour: u8,
    minute: u8,
}

impl Time {
    /// Start of the day, 00:00.
    pub const MIDNIGHT: Time = Time { hour: 0, minute: 0 };

    /// Last representable minute of the day, 23:59.
    ///
    /// The schedule model has no midnight-crossing phases and an end must be
    /// strictly after its start, so a "rest of the day" range uses this
    /// sentinel as its end.
    pub const END_OF_DAY: Time = Time {
        hour: 23,
        minute: 59,
    };

    /// Checked constructor. Returns `None` when `hour > 23` or `minute > 59`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Builds a `Time` from minutes after midnight, clamped to 23:59.
    pub fn from_minutes(minutes: u16) -> Self {
        let clamped = minutes.min(MINUTES_PER_DAY - 1);
        Self {
            hour: (clamped / 60) as u8,
            minute: (clamped % 60) as u8,
        }
    }

    /// The wall-clock time of a local timestamp, seconds discarded.
    pub fn from_datetime(datetime: &DateTime<Local>) -> Self {
        Self {
            hour: datetime.hour() as u8,
            minute: datetime.minute() as u8,
        }
    }

    /// Current local wall-clock time.
    pub fn current() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes after midnight.
    pub fn to_minutes(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// A new `Time` `minutes` later the same day, saturating at 23:59.
    /// Callers must not rely on this to cross midnight.
    pub fn adding_minutes(&self, minutes: u16) -> Self {
        Self::from_minutes(self.to_minutes().saturating_add(minutes))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
