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

//! Autofill for uncovered time ranges in a schedule.
//!
//! The model cannot express a phase crossing midnight or a 24:00 end, so
//! "the whole day" is the range 00:00 to the 23:59 sentinel. A trailing fill
//! phase therefore ends at 23:59, leaving the day's final minute governed by
//! the device's standing configuration rather than the schedule.

use crate::schedule::{Schedule, SchedulePhase};
use crate::time::Time;
use crate::work_mode::WorkMode;

/// Fill every uncovered range of the day with a phase running `mode` at the
/// given SOC. Existing phases are kept untouched; the result is sorted by
/// start and, by construction, free of overlaps introduced by the fill.
///
/// An empty schedule becomes a single full-day phase. Passing the `Invalid`
/// sentinel as the fallback fills nothing.
pub fn fill_gaps(schedule: &Schedule, mode: WorkMode, soc: u8) -> Schedule {
    let mut existing = schedule.phases.clone();
    existing.sort_by_key(|phase| phase.start);

    let mut filled: Vec<SchedulePhase> = Vec::with_capacity(existing.len() * 2 + 1);
    let mut cursor = Time::MIDNIGHT;

    for phase in existing {
        if cursor < phase.start {
            filled.extend(fill_phase(cursor, phase.start, mode, soc));
        }
        cursor = cursor.max(phase.end);
        filled.push(phase);
    }

    if cursor < Time::END_OF_DAY {
        filled.extend(fill_phase(cursor, Time::END_OF_DAY, mode, soc));
    }

    filled.sort_by_key(|phase| phase.start);
    Schedule::new(filled)
}

fn fill_phase(start: Time, end: Time, mode: WorkMode, soc: u8) -> Option<SchedulePhase> {
    SchedulePhase::new(start, end, mode, soc, 0, soc)
}
