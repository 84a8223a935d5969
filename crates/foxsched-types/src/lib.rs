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

//! Domain model for the battery charge/discharge scheduler: day-local times,
//! operating modes, phases, schedules, reusable templates, and gap filling.
//! Pure values and synchronous computation only; network and caching live in
//! `foxsched-cloud`.

pub mod device;
pub mod gaps;
pub mod schedule;
pub mod template;
pub mod time;
pub mod work_mode;

// Re-export common types for convenience
pub use device::{BatterySettings, Device};
pub use gaps::fill_gaps;
pub use schedule::{Schedule, SchedulePhase};
pub use template::ScheduleTemplate;
pub use time::{MINUTES_PER_DAY, Time};
pub use work_mode::WorkMode;
