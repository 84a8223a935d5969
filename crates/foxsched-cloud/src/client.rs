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

use crate::errors::{CloudError, CloudResult};
use crate::mapping;
use crate::types::{
    ApiResponse, BatterySettingsResponse, DeviceSummaryResponse, RealDataResponse,
    ScheduleListResponse, ScheduleTemplateListResponse, ScheduleTemplateResponse,
    SchedulerFlagResponse, SchedulerModeResponse,
};
use async_trait::async_trait;
use foxsched_types::{Schedule, ScheduleTemplate};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// The vendor cloud operations the scheduler works through.
///
/// Fetches are GET-style and may be wrapped by the response cache; the
/// save/delete/create/enable operations are writes and always pass through.
#[async_trait]
pub trait EnergyCloudApi: Send + Sync {
    async fn fetch_device_list(&self) -> CloudResult<Vec<DeviceSummaryResponse>>;
    async fn fetch_real_data(
        &self,
        device_sn: &str,
        variables: &[String],
    ) -> CloudResult<RealDataResponse>;
    async fn fetch_battery_settings(
        &self,
        device_sn: &str,
    ) -> CloudResult<BatterySettingsResponse>;

    async fn fetch_scheduler_flag(&self, device_sn: &str) -> CloudResult<SchedulerFlagResponse>;
    async fn fetch_schedule_modes(
        &self,
        device_id: &str,
    ) -> CloudResult<Vec<SchedulerModeResponse>>;
    async fn fetch_current_schedule(&self, device_sn: &str) -> CloudResult<ScheduleListResponse>;
    async fn save_schedule(&self, device_sn: &str, schedule: &Schedule) -> CloudResult<()>;
    async fn delete_schedule(&self, device_sn: &str) -> CloudResult<()>;

    async fn fetch_schedule_templates(&self) -> CloudResult<ScheduleTemplateListResponse>;
    async fn fetch_schedule_template(
        &self,
        device_sn: &str,
        template_id: &str,
    ) -> CloudResult<ScheduleTemplateResponse>;
    async fn create_schedule_template(&self, name: &str, description: &str) -> CloudResult<()>;
    async fn save_schedule_template(
        &self,
        device_sn: &str,
        template: &ScheduleTemplate,
    ) -> CloudResult<()>;
    async fn enable_schedule_template(
        &self,
        device_sn: &str,
        template_id: &str,
    ) -> CloudResult<()>;
    async fn delete_schedule_template(&self, template_id: &str) -> CloudResult<()>;
}

/// Vendor cloud REST API client
#[derive(Debug, Clone)]
pub struct CloudClient {
    base_url: String,
    api_key: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl CloudClient {
    /// Create a new cloud client with the given base URL and API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> CloudResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CloudError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Create a cloud client from environment variables, for development
    /// and integration tests
    pub fn from_env() -> CloudResult<Self> {
        let base_url = std::env::var("FOX_CLOUD_URL")
            .unwrap_or_else(|_| "https://www.foxesscloud.com".to_string());
        let api_key = std::env::var("FOX_API_KEY").map_err(|_| {
            CloudError::ConfigError("FOX_API_KEY environment variable not set".to_string())
        })?;

        info!("Initializing cloud client for {}", base_url);
        Self::new(base_url, api_key)
    }

    /// Set custom retry configuration
    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> CloudResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("🔍 [CLOUD] GET {} {:?}", path, query);

        let response = self
            .retry_request(|| async {
                self.client
                    .get(&url)
                    .header("token", &self.api_key)
                    .query(query)
                    .send()
                    .await
            })
            .await?;

        Self::unwrap_envelope(path, response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &Value) -> CloudResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("📤 [CLOUD] POST {}", path);

        let response = self
            .retry_request(|| async {
                self.client
                    .post(&url)
                    .header("token", &self.api_key)
                    .json(body)
                    .send()
                    .await
            })
            .await?;

        Self::unwrap_envelope(path, response).await
    }

    /// POST for write operations whose success carries no payload.
    async fn post_unit(&self, path: &str, body: &Value) -> CloudResult<()> {
        let envelope: ApiResponse<Value> = {
            let url = format!("{}{}", self.base_url, path);
            info!("📤 [CLOUD] POST {}", path);

            let response = self
                .retry_request(|| async {
                    self.client
                        .post(&url)
                        .header("token", &self.api_key)
                        .json(body)
                        .send()
                        .await
                })
                .await?;

            Self::check_status(path, response).await?
        };

        if envelope.errno != 0 {
            error!("❌ [CLOUD] {} rejected, errno {}", path, envelope.errno);
            return Err(CloudError::VendorError {
                errno: envelope.errno,
                message: "request rejected by cloud".to_string(),
            });
        }

        Ok(())
    }

    async fn unwrap_envelope<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> CloudResult<T> {
        let envelope: ApiResponse<T> = Self::check_status(path, response).await?;

        if envelope.errno != 0 {
            error!("❌ [CLOUD] {} failed, errno {}", path, envelope.errno);
            return Err(CloudError::VendorError {
                errno: envelope.errno,
                message: "request rejected by cloud".to_string(),
            });
        }

        envelope.result.ok_or_else(|| {
            CloudError::InvalidResponse(format!("{}: errno 0 but no result payload", path))
        })
    }

    async fn check_status<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> CloudResult<ApiResponse<T>> {
        match response.status() {
            StatusCode::OK => Ok(response.json::<ApiResponse<T>>().await?),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [CLOUD] Authentication failed for {}", path);
                Err(CloudError::AuthenticationFailed)
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                error!("❌ [CLOUD] {} status {}: {}", path, status, message);
                Err(CloudError::ApiError {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, Fut>(&self, mut request_fn: F) -> CloudResult<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            match request_fn().await {
                Ok(response) => return Ok(response),
                Err(e) if attempts >= self.max_retries => {
                    error!("Request failed after {} attempts: {}", attempts, e);
                    return Err(CloudError::HttpError(e));
                }
                Err(e) => {
                    warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2; // Exponential backoff
                }
            }
        }
    }
}

#[async_trait]
impl EnergyCloudApi for CloudClient {
    async fn fetch_device_list(&self) -> CloudResult<Vec<DeviceSummaryResponse>> {
        self.get_json("/op/v0/device/list", &[]).await
    }

    async fn fetch_real_data(
        &self,
        device_sn: &str,
        variables: &[String],
    ) -> CloudResult<RealDataResponse> {
        self.post_json(
            "/op/v0/device/real/query",
            &json!({ "deviceSN": device_sn, "variables": variables }),
        )
        .await
    }

    async fn fetch_battery_settings(
        &self,
        device_sn: &str,
    ) -> CloudResult<BatterySettingsResponse> {
        self.get_json("/op/v0/device/battery/soc/get", &[("deviceSN", device_sn)])
            .await
    }

    async fn fetch_scheduler_flag(&self, device_sn: &str) -> CloudResult<SchedulerFlagResponse> {
        self.get_json("/op/v0/device/scheduler/flag", &[("deviceSN", device_sn)])
            .await
    }

    async fn fetch_schedule_modes(
        &self,
        device_id: &str,
    ) -> CloudResult<Vec<SchedulerModeResponse>> {
        self.get_json("/op/v0/device/scheduler/modes", &[("deviceID", device_id)])
            .await
    }

    async fn fetch_current_schedule(&self, device_sn: &str) -> CloudResult<ScheduleListResponse> {
        self.get_json("/op/v0/device/scheduler/get", &[("deviceSN", device_sn)])
            .await
    }

    async fn save_schedule(&self, device_sn: &str, schedule: &Schedule) -> CloudResult<()> {
        let pollcy = mapping::schedule_to_wire(schedule);
        self.post_unit(
            "/op/v0/device/scheduler/enable",
            &json!({ "deviceSN": device_sn, "pollcy": pollcy }),
        )
        .await
    }

    async fn delete_schedule(&self, device_sn: &str) -> CloudResult<()> {
        self.post_unit(
            "/op/v0/device/scheduler/disable",
            &json!({ "deviceSN": device_sn }),
        )
        .await
    }

    async fn fetch_schedule_templates(&self) -> CloudResult<ScheduleTemplateListResponse> {
        self.get_json("/op/v0/device/scheduler/template/list", &[])
            .await
    }

    async fn fetch_schedule_template(
        &self,
        device_sn: &str,
        template_id: &str,
    ) -> CloudResult<ScheduleTemplateResponse> {
        self.get_json(
            "/op/v0/device/scheduler/template/get",
            &[("deviceSN", device_sn), ("templateID", template_id)],
        )
        .await
    }

    async fn create_schedule_template(&self, name: &str, description: &str) -> CloudResult<()> {
        self.post_unit(
            "/op/v0/device/scheduler/template/create",
            &json!({ "templateName": name, "content": description }),
        )
        .await
    }

    async fn save_schedule_template(
        &self,
        device_sn: &str,
        template: &ScheduleTemplate,
    ) -> CloudResult<()> {
        let pollcy = mapping::template_to_wire(template);
        self.post_unit(
            "/op/v0/device/scheduler/template/save",
            &json!({
                "deviceSN": device_sn,
                "templateID": template.id,
                "pollcy": pollcy,
            }),
        )
        .await
    }

    async fn enable_schedule_template(
        &self,
        device_sn: &str,
        template_id: &str,
    ) -> CloudResult<()> {
        self.post_unit(
            "/op/v0/device/scheduler/template/enable",
            &json!({ "deviceSN": device_sn, "templateID": template_id }),
        )
        .await
    }

    async fn delete_schedule_template(&self, template_id: &str) -> CloudResult<()> {
        self.post_unit(
            "/op/v0/device/scheduler/template/delete",
            &json!({ "templateID": template_id }),
        )
        .await
    }
}
