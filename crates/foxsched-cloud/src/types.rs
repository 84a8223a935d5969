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

//! Wire models for the vendor cloud API. Field names follow the vendor's
//! JSON exactly, quirks included ("pollcy" is the vendor's spelling of the
//! phase list). Modes travel as raw key strings here; mapping to the domain
//! `WorkMode` happens in `mapping`.

use serde::{Deserialize, Serialize};

/// Envelope every cloud response arrives in. A non-zero `errno` is a
/// vendor-level failure even when HTTP says 200.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub errno: i32,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
}

// ============= Scheduler =============

/// One phase as the scheduler endpoints transmit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePollcy {
    #[serde(rename = "startH")]
    pub start_hour: u8,
    #[serde(rename = "startM")]
    pub start_minute: u8,
    #[serde(rename = "endH")]
    pub end_hour: u8,
    #[serde(rename = "endM")]
    pub end_minute: u8,
    /// Raw mode key string, e.g. "SelfUse" or "ForceCharge"
    #[serde(rename = "workMode")]
    pub work_mode: String,
    #[serde(rename = "minSocOnGrid")]
    pub min_soc_on_grid: u8,
    #[serde(rename = "fdSoc")]
    pub force_discharge_soc: u8,
    #[serde(rename = "fdPwr")]
    pub force_discharge_power: u32,
}

/// The device's current schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleListResponse {
    /// 1 when the scheduler is active on the device
    pub enable: u8,
    #[serde(default)]
    pub pollcy: Vec<SchedulePollcy>,
}

/// Whether the device supports and has enabled the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerFlagResponse {
    pub enable: bool,
    pub support: bool,
}

/// An operating mode as advertised by the cloud for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerModeResponse {
    /// ARGB hex string, e.g. "#8061DDAA"
    pub color: String,
    /// Display name, e.g. "Self-Use"
    pub name: String,
    /// Wire key, e.g. "SelfUse"
    pub key: String,
}

// ============= Schedule templates =============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplateSummaryResponse {
    #[serde(rename = "templateID")]
    pub template_id: String,
    #[serde(rename = "templateName")]
    pub template_name: String,
    pub enable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplateListResponse {
    #[serde(default)]
    pub data: Vec<ScheduleTemplateSummaryResponse>,
}

/// A single template's phase list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTemplateResponse {
    #[serde(default)]
    pub pollcy: Vec<SchedulePollcy>,
}

// ============= General data fetches =============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSummaryResponse {
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(rename = "hasBattery")]
    pub has_battery: bool,
    #[serde(rename = "stationName")]
    pub station_name: Option<String>,
}

/// One live variable reading (power, SOC, ...) from the real-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealDataVariable {
    pub variable: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealDataResponse {
    #[serde(rename = "deviceSN")]
    pub device_sn: String,
    #[serde(default)]
    pub datas: Vec<RealDataVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterySettingsResponse {
    #[serde(rename = "minSoc")]
    pub min_soc: u8,
    #[serde(rename = "minGridSoc")]
    pub min_soc_on_grid: u8,
}
