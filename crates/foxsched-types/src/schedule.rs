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

use crate::device::Device;
use crate::time::{MINUTES_PER_DAY, Time};
use crate::work_mode::WorkMode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One contiguous interval of the day during which the inverter runs a fixed
/// mode with fixed SOC/power parameters.
///
/// Construction is the only validation gate: `new`/`with_id` return `None`
/// for an empty or inverted time range or for the `Invalid` mode sentinel,
/// so no invalid phase is ever observable. Edits replace a phase wholesale,
/// matched by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePhase {
    pub id: String,
    pub start: Time,
    pub end: Time,
    pub mode: WorkMode,

    /// Minimum SOC (%) to hold while on grid
    pub min_soc_on_grid: u8,

    /// Force-discharge output power (W); 0 outside force-discharge phases
    pub force_discharge_power: u32,

    /// SOC (%) at which force discharge stops
    pub force_discharge_soc: u8,
}

impl SchedulePhase {
    /// Build a phase with a freshly generated id.
    ///
    /// Fails when `start >= end` (phases may not be empty or wrap midnight)
    /// or when `mode` is the `Invalid` sentinel. There is deliberately no
    /// error reason: absence is the sole failure signal.
    pub fn new(
        start: Time,
        end: Time,
        mode: WorkMode,
        min_soc_on_grid: u8,
        force_discharge_power: u32,
        force_discharge_soc: u8,
    ) -> Option<Self> {
        Self::with_id(
            Uuid::new_v4().to_string(),
            start,
            end,
            mode,
            min_soc_on_grid,
            force_discharge_power,
            force_discharge_soc,
        )
    }

    /// Build a phase keeping an existing identity, used when re-creating a
    /// phase from an edit or instantiating one from a template.
    pub fn with_id(
        id: impl Into<String>,
        start: Time,
        end: Time,
        mode: WorkMode,
        min_soc_on_grid: u8,
        force_discharge_power: u32,
        force_discharge_soc: u8,
    ) -> Option<Self> {
        if start >= end {
            return None;
        }
        if mode == WorkMode::Invalid {
            return None;
        }

        Some(Self {
            id: id.into(),
            start,
            end,
            mode,
            min_soc_on_grid,
            force_discharge_power,
            force_discharge_soc,
        })
    }

    /// A one-minute phase starting at the current wall-clock time, the seed
    /// for the "add time period" edit action. SOC fields come from the
    /// device's battery settings. Fails only in the last minute of the day,
    /// where no end after the start exists.
    pub fn starting_now(mode: WorkMode, device: Option<&Device>) -> Option<Self> {
        let start = Time::current();
        let soc = device.map_or(10, Device::min_soc_or_default);
        Self::new(start, start.adding_minutes(1), mode, soc, 0, soc)
    }

    /// True when the time range is still well-formed. Always holds for a
    /// constructed phase; re-checked by `Schedule::is_valid` so externally
    /// assembled data gets the same gate.
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Position of the start within the 24-hour span, 0.0..1.0, for
    /// proportional rendering.
    pub fn start_fraction(&self) -> f32 {
        f32::from(self.start.to_minutes()) / f32::from(MINUTES_PER_DAY)
    }

    /// Position of the end within the 24-hour span, 0.0..1.0.
    pub fn end_fraction(&self) -> f32 {
        f32::from(self.end.to_minutes()) / f32::from(MINUTES_PER_DAY)
    }

    /// ARGB hex colour for rendering, derived from the mode.
    pub fn display_color(&self) -> &'static str {
        self.mode.color_hex()
    }
}

/// The full set of phases governing a device's behaviour over a day.
///
/// Unlike phases, a schedule is not validated at construction: mid-edit
/// states may overlap. `is_valid` is the gate before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub phases: Vec<SchedulePhase>,
}

impl Schedule {
    pub fn new(phases: Vec<SchedulePhase>) -> Self {
        Self { phases }
    }

    /// Whether every phase is internally valid and no two phases overlap.
    ///
    /// The overlap test is half-open with the boundary semantics the cloud
    /// enforces: for an earlier-listed phase A and later phase B,
    /// `A.start <= B.end && B.start < A.end` is a conflict. Phases sharing a
    /// boundary minute are adjacent, not overlapping, when listed in
    /// ascending start order — the order fetched schedules and gap-fill
    /// output use. Pairwise O(n²); schedules hold at most a handful of
    /// phases.
    pub fn is_valid(&self) -> bool {
        for (index, phase) in self.phases.iter().enumerate() {
            if !phase.is_valid() {
                return false;
            }

            let phase_start = phase.start.to_minutes();
            let phase_end = phase.end.to_minutes();

            for other in &self.phases[index + 1..] {
                let other_start = other.start.to_minutes();
                let other_end = other.end.to_minutes();

                if phase_start <= other_end && other_start < phase_end {
                    return false;
                }
            }
        }

        true
    }

    /// Replace the phase carrying `updated.id`, preserving order. A no-op
    /// when no phase has that identity.
    pub fn replacing(&self, updated: SchedulePhase) -> Self {
        let phases = self
            .phases
            .iter()
            .map(|phase| {
                if phase.id == updated.id {
                    updated.clone()
                } else {
                    phase.clone()
                }
            })
            .collect();
        Self { phases }
    }

    /// Remove the phase with the given identity.
    pub fn deleting(&self, phase_id: &str) -> Self {
        let phases = self
            .phases
            .iter()
            .filter(|phase| phase.id != phase_id)
            .cloned()
            .collect();
        Self { phases }
    }
}
