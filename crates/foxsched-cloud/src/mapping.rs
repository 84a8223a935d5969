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

//! Conversion between the vendor's wire phase records and the domain model.
//!
//! Decoding is lenient per phase: a record with an unrecognised mode key or
//! a malformed time range is dropped with a warning instead of failing the
//! whole response. Encoding never drops anything since constructed phases
//! are valid by definition.

use crate::types::{SchedulePollcy, ScheduleListResponse, ScheduleTemplateResponse};
use foxsched_types::{Schedule, SchedulePhase, ScheduleTemplate, Time, WorkMode};
use tracing::warn;

/// Decode one wire phase. `None` when the record cannot form a valid phase;
/// ids are client-generated since the wire carries none.
pub fn phase_from_wire(pollcy: &SchedulePollcy) -> Option<SchedulePhase> {
    let start = Time::new(pollcy.start_hour, pollcy.start_minute)?;
    let end = Time::new(pollcy.end_hour, pollcy.end_minute)?;
    let mode = WorkMode::from_key(&pollcy.work_mode);

    SchedulePhase::new(
        start,
        end,
        mode,
        pollcy.min_soc_on_grid,
        pollcy.force_discharge_power,
        pollcy.force_discharge_soc,
    )
}

pub fn phase_to_wire(phase: &SchedulePhase) -> SchedulePollcy {
    SchedulePollcy {
        start_hour: phase.start.hour(),
        start_minute: phase.start.minute(),
        end_hour: phase.end.hour(),
        end_minute: phase.end.minute(),
        work_mode: phase.mode.key().to_string(),
        min_soc_on_grid: phase.min_soc_on_grid,
        force_discharge_soc: phase.force_discharge_soc,
        force_discharge_power: phase.force_discharge_power,
    }
}

/// Decode a fetched schedule, dropping undecodable phases individually.
pub fn schedule_from_wire(response: &ScheduleListResponse) -> Schedule {
    Schedule::new(decode_phases(&response.pollcy))
}

pub fn schedule_to_wire(schedule: &Schedule) -> Vec<SchedulePollcy> {
    schedule.phases.iter().map(phase_to_wire).collect()
}

/// Decode a fetched template body, attaching the id and name from its list
/// entry (the template endpoint itself only returns phases).
pub fn template_from_wire(
    template_id: impl Into<String>,
    name: impl Into<String>,
    response: &ScheduleTemplateResponse,
) -> ScheduleTemplate {
    ScheduleTemplate::new(template_id, name, decode_phases(&response.pollcy))
}

pub fn template_to_wire(template: &ScheduleTemplate) -> Vec<SchedulePollcy> {
    template.phases.iter().map(phase_to_wire).collect()
}

fn decode_phases(pollcy: &[SchedulePollcy]) -> Vec<SchedulePhase> {
    pollcy
        .iter()
        .filter_map(|record| {
            let phase = phase_from_wire(record);
            if phase.is_none() {
                warn!(
                    "Dropping undecodable schedule phase: mode '{}', {:02}:{:02}-{:02}:{:02}",
                    record.work_mode,
                    record.start_hour,
                    record.start_minute,
                    record.end_hour,
                    record.end_minute
                );
            }
            phase
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_phase(mode: &str, start: (u8, u8), end: (u8, u8)) -> SchedulePollcy {
        SchedulePollcy {
            start_hour: start.0,
            start_minute: start.1,
            end_hour: end.0,
            end_minute: end.1,
            work_mode: mode.to_string(),
            min_soc_on_grid: 20,
            force_discharge_soc: 20,
            force_discharge_power: 3500,
        }
    }

    #[test]
    fn decodes_a_well_formed_schedule() {
        let response = ScheduleListResponse {
            enable: 1,
            pollcy: vec![
                wire_phase("ForceCharge", (1, 0), (5, 0)),
                wire_phase("ForceDischarge", (17, 30), (19, 30)),
            ],
        };

        let schedule = schedule_from_wire(&response);
        assert_eq!(schedule.phases.len(), 2);
        assert_eq!(schedule.phases[0].mode, WorkMode::ForceCharge);
        assert_eq!(schedule.phases[1].force_discharge_power, 3500);
        assert!(schedule.is_valid());
    }

    #[test]
    fn unknown_mode_key_drops_only_that_phase() {
        let response = ScheduleListResponse {
            enable: 1,
            pollcy: vec![
                wire_phase("PeakShaving", (1, 0), (5, 0)),
                wire_phase("SelfUse", (6, 0), (7, 0)),
            ],
        };

        let schedule = schedule_from_wire(&response);
        assert_eq!(schedule.phases.len(), 1);
        assert_eq!(schedule.phases[0].mode, WorkMode::SelfUse);
    }

    #[test]
    fn malformed_time_range_drops_only_that_phase() {
        let response = ScheduleListResponse {
            enable: 1,
            pollcy: vec![
                wire_phase("SelfUse", (9, 0), (9, 0)),   // empty
                wire_phase("SelfUse", (25, 0), (26, 0)), // out of range
                wire_phase("SelfUse", (10, 0), (11, 0)),
            ],
        };

        let schedule = schedule_from_wire(&response);
        assert_eq!(schedule.phases.len(), 1);
        assert_eq!(schedule.phases[0].start.hour(), 10);
    }

    #[test]
    fn round_trip_preserves_the_phase_set() {
        let original = vec![
            wire_phase("ForceCharge", (1, 0), (5, 0)),
            wire_phase("SelfUse", (5, 0), (23, 59)),
        ];
        let response = ScheduleListResponse {
            enable: 1,
            pollcy: original.clone(),
        };

        let schedule = schedule_from_wire(&response);
        let back = schedule_to_wire(&schedule);

        assert_eq!(back, original);
    }

    #[test]
    fn template_round_trip() {
        let response = ScheduleTemplateResponse {
            pollcy: vec![wire_phase("Backup", (0, 0), (6, 0))],
        };

        let template = template_from_wire("tpl-1", "Overnight backup", &response);
        assert_eq!(template.id, "tpl-1");
        assert_eq!(template.name, "Overnight backup");
        assert_eq!(template.phases.len(), 1);

        assert_eq!(template_to_wire(&template), response.pollcy);

        let rebuilt = template.with_phases(template.as_schedule().phases);
        assert_eq!(rebuilt, template);
    }
}
