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

use serde::{Deserialize, Serialize};

/// Battery parameters the scheduler consumes when seeding new phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterySettings {
    /// Configured minimum state of charge (%)
    pub min_soc: u8,

    /// Usable capacity, when the cloud reports one
    pub capacity_wh: Option<u32>,
}

/// An inverter as the schedule engine sees it. Everything else about the
/// device (firmware, datalogger, strings) lives with other collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Serial number, the identifier most cloud calls key on
    pub device_sn: String,

    /// Cloud-side device id, used by the scheduler-modes endpoint
    pub device_id: String,

    pub battery: Option<BatterySettings>,
}

impl Device {
    /// The minimum SOC to seed new phases with; 10% when the device has no
    /// battery settings attached.
    pub fn min_soc_or_default(&self) -> u8 {
        self.battery.as_ref().map_or(10, |battery| battery.min_soc)
    }
}
