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

//! Short-TTL memoizing decorator in front of the cloud client.
//!
//! UI refresh cycles fire several identical fetches in quick succession
//! (device list, real data, schedule, all per visible screen). The cache
//! collapses those bursts: a fetch hit within the TTL returns the stored
//! response without touching the network. Entries live for the process
//! lifetime and are superseded in place; nothing is ever evicted.
//!
//! Writes (save/delete/create/enable) always pass through and do NOT
//! invalidate cached reads: a read inside the TTL window after a write may
//! still see the pre-write response. Callers that need read-your-write must
//! wait out the TTL.

use crate::client::EnergyCloudApi;
use crate::errors::CloudResult;
use crate::types::{
    BatterySettingsResponse, DeviceSummaryResponse, RealDataResponse, ScheduleListResponse,
    ScheduleTemplateListResponse, ScheduleTemplateResponse, SchedulerFlagResponse,
    SchedulerModeResponse,
};
use async_trait::async_trait;
use foxsched_types::{Schedule, ScheduleTemplate};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Default freshness window. Short enough not to serve stale schedule state
/// across an edit session, long enough to collapse one refresh burst.
pub const SHORT_CACHE_TTL: Duration = Duration::from_secs(5);

/// Cache key: operation id plus its rendered arguments. Arity is part of
/// equality, so operations with different argument lists can never collide
/// the way ad-hoc string concatenation could.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    op: &'static str,
    args: Vec<String>,
}

impl CacheKey {
    pub fn op(op: &'static str) -> Self {
        Self {
            op,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a list argument as one positional element, order-preserving.
    pub fn list_arg(self, items: &[String]) -> Self {
        self.arg(items.join("_"))
    }
}

/// One stored response. Replaced wholesale on refresh, never mutated, so a
/// concurrent reader sees either the prior entry or the new one.
struct CachedItem {
    cached_at: Instant,
    payload: Arc<dyn Any + Send + Sync>,
}

impl CachedItem {
    fn new<T: Clone + Send + Sync + 'static>(value: &T) -> Self {
        Self {
            cached_at: Instant::now(),
            payload: Arc::new(value.clone()),
        }
    }

    fn is_fresher_than(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

/// Memoizing decorator for [`EnergyCloudApi`]. Wrap the real client once and
/// share it; all state is internal.
pub struct CachedCloud<A> {
    inner: A,
    entries: Mutex<HashMap<CacheKey, CachedItem>>,
    ttl: Duration,
}

impl<A> std::fmt::Debug for CachedCloud<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedCloud")
            .field("entries", &self.entries.lock().len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl<A: EnergyCloudApi> CachedCloud<A> {
    pub fn new(inner: A) -> Self {
        Self::with_ttl(inner, SHORT_CACHE_TTL)
    }

    /// Custom TTL, mainly for tests.
    pub fn with_ttl(inner: A, ttl: Duration) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lookup<T: Clone + Send + Sync + 'static>(&self, key: &CacheKey) -> Option<T> {
        let entries = self.entries.lock();
        let item = entries.get(key)?;
        if !item.is_fresher_than(self.ttl) {
            trace!("Cache entry expired: {:?}", key);
            return None;
        }
        // A type mismatch under an identical key cannot happen while keys
        // are built from distinct operation ids; downcast_ref keeps it a
        // miss rather than a panic regardless.
        item.payload.downcast_ref::<T>().cloned()
    }

    fn remember<T: Clone + Send + Sync + 'static>(&self, key: CacheKey, value: &T) {
        self.entries.lock().insert(key, CachedItem::new(value));
    }

    /// Miss path shared by every cached operation: call through, store on
    /// success, propagate failure without storing anything. The lock is
    /// only taken before and after the await, never across it.
    async fn through<T, Fut>(&self, key: CacheKey, fetch: Fut) -> CloudResult<T>
    where
        T: Clone + Send + Sync + 'static,
        Fut: Future<Output = CloudResult<T>> + Send,
    {
        if let Some(hit) = self.lookup::<T>(&key) {
            debug!("Cache hit: {:?}", key);
            return Ok(hit);
        }

        let fresh = fetch.await?;
        self.remember(key, &fresh);
        Ok(fresh)
    }
}

#[async_trait]
impl<A: EnergyCloudApi> EnergyCloudApi for CachedCloud<A> {
    async fn fetch_device_list(&self) -> CloudResult<Vec<DeviceSummaryResponse>> {
        let key = CacheKey::op("fetch_device_list");
        self.through(key, self.inner.fetch_device_list()).await
    }

    async fn fetch_real_data(
        &self,
        device_sn: &str,
        variables: &[String],
    ) -> CloudResult<RealDataResponse> {
        let key = CacheKey::op("fetch_real_data")
            .arg(device_sn)
            .list_arg(variables);
        self.through(key, self.inner.fetch_real_data(device_sn, variables))
            .await
    }

    async fn fetch_battery_settings(
        &self,
        device_sn: &str,
    ) -> CloudResult<BatterySettingsResponse> {
        let key = CacheKey::op("fetch_battery_settings").arg(device_sn);
        self.through(key, self.inner.fetch_battery_settings(device_sn))
            .await
    }

    async fn fetch_scheduler_flag(&self, device_sn: &str) -> CloudResult<SchedulerFlagResponse> {
        let key = CacheKey::op("fetch_scheduler_flag").arg(device_sn);
        self.through(key, self.inner.fetch_scheduler_flag(device_sn))
            .await
    }

    async fn fetch_schedule_modes(
        &self,
        device_id: &str,
    ) -> CloudResult<Vec<SchedulerModeResponse>> {
        let key = CacheKey::op("fetch_schedule_modes").arg(device_id);
        self.through(key, self.inner.fetch_schedule_modes(device_id))
            .await
    }

    async fn fetch_current_schedule(&self, device_sn: &str) -> CloudResult<ScheduleListResponse> {
        let key = CacheKey::op("fetch_current_schedule").arg(device_sn);
        self.through(key, self.inner.fetch_current_schedule(device_sn))
            .await
    }

    // Writes bypass the cache entirely; they also deliberately leave cached
    // reads alone (see module docs).

    async fn save_schedule(&self, device_sn: &str, schedule: &Schedule) -> CloudResult<()> {
        self.inner.save_schedule(device_sn, schedule).await
    }

    async fn delete_schedule(&self, device_sn: &str) -> CloudResult<()> {
        self.inner.delete_schedule(device_sn).await
    }

    async fn fetch_schedule_templates(&self) -> CloudResult<ScheduleTemplateListResponse> {
        let key = CacheKey::op("fetch_schedule_templates");
        self.through(key, self.inner.fetch_schedule_templates())
            .await
    }

    async fn fetch_schedule_template(
        &self,
        device_sn: &str,
        template_id: &str,
    ) -> CloudResult<ScheduleTemplateResponse> {
        let key = CacheKey::op("fetch_schedule_template")
            .arg(device_sn)
            .arg(template_id);
        self.through(
            key,
            self.inner.fetch_schedule_template(device_sn, template_id),
        )
        .await
    }

    async fn create_schedule_template(&self, name: &str, description: &str) -> CloudResult<()> {
        self.inner.create_schedule_template(name, description).await
    }

    async fn save_schedule_template(
        &self,
        device_sn: &str,
        template: &ScheduleTemplate,
    ) -> CloudResult<()> {
        self.inner.save_schedule_template(device_sn, template).await
    }

    async fn enable_schedule_template(
        &self,
        device_sn: &str,
        template_id: &str,
    ) -> CloudResult<()> {
        self.inner
            .enable_schedule_template(device_sn, template_id)
            .await
    }

    async fn delete_schedule_template(&self, template_id: &str) -> CloudResult<()> {
        self.inner.delete_schedule_template(template_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CloudError;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Scripted inner client counting how often each operation is hit.
    #[derive(Default)]
    struct CountingCloud {
        schedule_calls: AtomicU32,
        device_list_calls: AtomicU32,
        real_data_calls: AtomicU32,
        template_calls: AtomicU32,
        save_calls: AtomicU32,
        fail_schedule_fetches: AtomicU32,
    }

    impl CountingCloud {
        fn schedule_response() -> ScheduleListResponse {
            ScheduleListResponse {
                enable: 1,
                pollcy: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl EnergyCloudApi for CountingCloud {
        async fn fetch_device_list(&self) -> CloudResult<Vec<DeviceSummaryResponse>> {
            self.device_list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn fetch_real_data(
            &self,
            device_sn: &str,
            _variables: &[String],
        ) -> CloudResult<RealDataResponse> {
            self.real_data_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RealDataResponse {
                device_sn: device_sn.to_string(),
                datas: Vec::new(),
            })
        }

        async fn fetch_battery_settings(
            &self,
            _device_sn: &str,
        ) -> CloudResult<BatterySettingsResponse> {
            Ok(BatterySettingsResponse {
                min_soc: 10,
                min_soc_on_grid: 20,
            })
        }

        async fn fetch_scheduler_flag(
            &self,
            _device_sn: &str,
        ) -> CloudResult<SchedulerFlagResponse> {
            Ok(SchedulerFlagResponse {
                enable: true,
                support: true,
            })
        }

        async fn fetch_schedule_modes(
            &self,
            _device_id: &str,
        ) -> CloudResult<Vec<SchedulerModeResponse>> {
            Ok(Vec::new())
        }

        async fn fetch_current_schedule(
            &self,
            _device_sn: &str,
        ) -> CloudResult<ScheduleListResponse> {
            self.schedule_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_schedule_fetches.load(Ordering::SeqCst) > 0 {
                self.fail_schedule_fetches.fetch_sub(1, Ordering::SeqCst);
                return Err(CloudError::InvalidResponse("scripted failure".into()));
            }
            Ok(Self::schedule_response())
        }

        async fn save_schedule(&self, _device_sn: &str, _schedule: &Schedule) -> CloudResult<()> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_schedule(&self, _device_sn: &str) -> CloudResult<()> {
            Ok(())
        }

        async fn fetch_schedule_templates(&self) -> CloudResult<ScheduleTemplateListResponse> {
            self.template_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ScheduleTemplateListResponse { data: Vec::new() })
        }

        async fn fetch_schedule_template(
            &self,
            _device_sn: &str,
            _template_id: &str,
        ) -> CloudResult<ScheduleTemplateResponse> {
            Ok(ScheduleTemplateResponse { pollcy: Vec::new() })
        }

        async fn create_schedule_template(
            &self,
            _name: &str,
            _description: &str,
        ) -> CloudResult<()> {
            Ok(())
        }

        async fn save_schedule_template(
            &self,
            _device_sn: &str,
            _template: &ScheduleTemplate,
        ) -> CloudResult<()> {
            Ok(())
        }

        async fn enable_schedule_template(
            &self,
            _device_sn: &str,
            _template_id: &str,
        ) -> CloudResult<()> {
            Ok(())
        }

        async fn delete_schedule_template(&self, _template_id: &str) -> CloudResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn repeated_fetch_within_ttl_hits_inner_once() {
        let cached = CachedCloud::new(CountingCloud::default());

        cached.fetch_current_schedule("SN1").await.unwrap();
        cached.fetch_current_schedule("SN1").await.unwrap();

        assert_eq!(cached.inner.schedule_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let cached = CachedCloud::with_ttl(CountingCloud::default(), Duration::from_millis(30));

        cached.fetch_current_schedule("SN1").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        cached.fetch_current_schedule("SN1").await.unwrap();

        assert_eq!(cached.inner.schedule_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn different_arguments_never_share_an_entry() {
        let cached = CachedCloud::new(CountingCloud::default());

        cached.fetch_current_schedule("SN1").await.unwrap();
        cached.fetch_current_schedule("SN2").await.unwrap();

        assert_eq!(cached.inner.schedule_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn real_data_key_covers_variable_list() {
        let cached = CachedCloud::new(CountingCloud::default());
        let soc = vec!["SoC".to_string()];
        let power = vec!["pvPower".to_string()];

        cached.fetch_real_data("SN1", &soc).await.unwrap();
        cached.fetch_real_data("SN1", &soc).await.unwrap();
        cached.fetch_real_data("SN1", &power).await.unwrap();

        assert_eq!(cached.inner.real_data_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_arg_operations_are_cached_too() {
        let cached = CachedCloud::new(CountingCloud::default());

        cached.fetch_device_list().await.unwrap();
        cached.fetch_device_list().await.unwrap();
        cached.fetch_schedule_templates().await.unwrap();
        cached.fetch_schedule_templates().await.unwrap();

        assert_eq!(cached.inner.device_list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.inner.template_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_not_cached() {
        let inner = CountingCloud::default();
        inner.fail_schedule_fetches.store(1, Ordering::SeqCst);
        let cached = CachedCloud::new(inner);

        assert!(cached.fetch_current_schedule("SN1").await.is_err());
        // The failed call left no entry; the retry reaches the inner client
        // and its result is then served from cache.
        assert!(cached.fetch_current_schedule("SN1").await.is_ok());
        cached.fetch_current_schedule("SN1").await.unwrap();

        assert_eq!(cached.inner.schedule_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn writes_bypass_and_do_not_invalidate() {
        let cached = CachedCloud::new(CountingCloud::default());

        cached.fetch_current_schedule("SN1").await.unwrap();
        cached
            .save_schedule("SN1", &Schedule::default())
            .await
            .unwrap();
        cached
            .save_schedule("SN1", &Schedule::default())
            .await
            .unwrap();
        // Still served from cache: writes neither populate nor clear entries
        cached.fetch_current_schedule("SN1").await.unwrap();

        assert_eq!(cached.inner.save_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.inner.schedule_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_readers_never_see_a_torn_entry() {
        let cached = Arc::new(CachedCloud::new(CountingCloud::default()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cached = Arc::clone(&cached);
            handles.push(tokio::spawn(async move {
                cached.fetch_current_schedule("SN1").await
            }));
        }

        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            assert_eq!(response, CountingCloud::schedule_response());
        }
    }

    #[test]
    fn key_arity_prevents_collisions() {
        let one = CacheKey::op("fetch").arg("a_b");
        let two = CacheKey::op("fetch").arg("a").arg("b");
        assert_ne!(one, two);

        let joined = CacheKey::op("fetch").list_arg(&["a".into(), "b".into()]);
        assert_ne!(two, joined);
        assert_eq!(one, joined);
    }
}
