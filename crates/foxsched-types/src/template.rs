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

use crate::schedule::{Schedule, SchedulePhase};
use serde::{Deserialize, Serialize};

/// A named, reusable schedule. Activating a template submits its phases as
/// the device's live schedule; the template itself stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplate {
    pub id: String,
    pub name: String,
    pub phases: Vec<SchedulePhase>,
}

impl ScheduleTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phases: Vec<SchedulePhase>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phases,
        }
    }

    /// The template's phases as a plain schedule, ready for validation or
    /// activation.
    pub fn as_schedule(&self) -> Schedule {
        Schedule::new(self.phases.clone())
    }

    /// A copy with replaced phases, keeping identity and name.
    pub fn with_phases(&self, phases: Vec<SchedulePhase>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            phases,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.as_schedule().is_valid()
    }
}
