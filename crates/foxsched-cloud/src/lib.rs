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

//! Vendor cloud integration for the scheduler: the `EnergyCloudApi`
//! contract, the HTTP client, wire models and their domain mapping, and the
//! short-TTL response cache decorator.

pub mod cache;
pub mod client;
pub mod errors;
pub mod mapping;
pub mod types;

pub use cache::{CacheKey, CachedCloud, SHORT_CACHE_TTL};
pub use client::{CloudClient, EnergyCloudApi};
pub use errors::{CloudError, CloudResult};
pub use mapping::{schedule_from_wire, schedule_to_wire, template_from_wire, template_to_wire};
pub use types::{
    ApiResponse, BatterySettingsResponse, DeviceSummaryResponse, RealDataResponse,
    RealDataVariable, ScheduleListResponse, SchedulePollcy, ScheduleTemplateListResponse,
    ScheduleTemplateResponse, ScheduleTemplateSummaryResponse, SchedulerFlagResponse,
    SchedulerModeResponse,
};
