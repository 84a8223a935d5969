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

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Inverter operating modes understood by the scheduler.
///
/// The cloud API identifies modes by key string ("SelfUse", "ForceCharge",
/// ...). `Invalid` is the local sentinel for keys this build does not
/// recognise; a phase can never be constructed with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum WorkMode {
    /// Use solar and battery for self-consumption
    #[default]
    SelfUse,
    /// Export solar to the grid before charging the battery
    Feedin,
    /// Hold battery charge in reserve for outages
    Backup,
    /// Charge the battery from the grid
    ForceCharge,
    /// Discharge the battery at a fixed power
    ForceDischarge,
    /// Unrecognised wire key
    Invalid,
}

// Unknown keys must decode to the sentinel rather than failing the document,
// which the derive cannot express for a plain string enum.
impl<'de> Deserialize<'de> for WorkMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}

impl WorkMode {
    /// Every mode a phase may legitimately carry.
    pub fn all() -> &'static [WorkMode] {
        &[
            Self::SelfUse,
            Self::Feedin,
            Self::Backup,
            Self::ForceCharge,
            Self::ForceDischarge,
        ]
    }

    /// Parse a raw wire key. Unknown keys become `Invalid` rather than an
    /// error; callers drop the affected phase, not the whole response.
    pub fn from_key(key: &str) -> Self {
        match key {
            "SelfUse" => Self::SelfUse,
            "Feedin" => Self::Feedin,
            "Backup" => Self::Backup,
            "ForceCharge" => Self::ForceCharge,
            "ForceDischarge" => Self::ForceDischarge,
            _ => Self::Invalid,
        }
    }

    /// The cloud wire key for this mode.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SelfUse => "SelfUse",
            Self::Feedin => "Feedin",
            Self::Backup => "Backup",
            Self::ForceCharge => "ForceCharge",
            Self::ForceDischarge => "ForceDischarge",
            Self::Invalid => "Invalid",
        }
    }

    /// Human-readable name, matching the vendor's own labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SelfUse => "Self-Use",
            Self::Feedin => "Feed-in Priority",
            Self::Backup => "Back Up",
            Self::ForceCharge => "Force Charge",
            Self::ForceDischarge => "Force Discharge",
            Self::Invalid => "Invalid",
        }
    }

    /// ARGB hex colour used when rendering a phase of this mode.
    /// Values mirror the vendor's scheduler palette.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Self::SelfUse => "#8061DDAA",
            Self::Feedin => "#805B8FF9",
            Self::Backup => "#80F6BD16",
            Self::ForceCharge => "#80BBE9FB",
            Self::ForceDischarge => "#8065789B",
            Self::Invalid => "#80FFFFFF",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
