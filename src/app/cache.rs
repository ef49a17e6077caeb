use std::{sync::Arc, time::Duration};

use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{
    app::builder::StateBuilder,
    domain::weather::{Location, WeatherState},
    error::CacheBuildError,
};

type SharedBuild = Shared<BoxFuture<'static, Result<Arc<WeatherState>, CacheBuildError>>>;

struct InFlight {
    id: u64,
    build: SharedBuild,
}

#[derive(Default)]
struct CacheSlot {
    value: Option<Arc<WeatherState>>,
    expires_at: Option<Instant>,
    in_flight: Option<InFlight>,
    next_build_id: u64,
}

impl CacheSlot {
    fn fresh_value(&self, now: Instant) -> Option<Arc<WeatherState>> {
        match (&self.value, self.expires_at) {
            (Some(value), Some(expires_at)) if now < expires_at => Some(Arc::clone(value)),
            _ => None,
        }
    }

    fn finish(&mut self, id: u64, state: Option<Arc<WeatherState>>, ttl: Duration) {
        if let Some(state) = state {
            self.value = Some(state);
            self.expires_at = Some(Instant::now() + ttl);
        }
        self.clear(id);
    }

    fn clear(&mut self, id: u64) {
        if self.in_flight.as_ref().is_some_and(|f| f.id == id) {
            self.in_flight = None;
        }
    }
}

/// Releases the in-flight slot even if the build task panics or is cancelled.
struct InFlightGuard {
    slot: Arc<Mutex<CacheSlot>>,
    id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.slot.lock().clear(self.id);
    }
}

/// Single-slot, time-boxed cache in front of [`StateBuilder`].
///
/// At most one build runs at a time: callers arriving during a miss join the
/// running build instead of starting their own. A failed build leaves the
/// previous value untouched and frees the slot, so the next call retries.
pub struct StateCache {
    builder: Arc<StateBuilder>,
    refresh_interval: Duration,
    slot: Arc<Mutex<CacheSlot>>,
}

impl StateCache {
    pub fn new(builder: StateBuilder, refresh_interval: Duration) -> Self {
        Self {
            builder: Arc::new(builder),
            refresh_interval,
            slot: Arc::new(Mutex::new(CacheSlot::default())),
        }
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub async fn get_state(
        &self,
        locations: &[Location],
    ) -> Result<Arc<WeatherState>, CacheBuildError> {
        let pending = {
            let mut slot = self.slot.lock();
            if let Some(value) = slot.fresh_value(Instant::now()) {
                debug!("state cache hit");
                return Ok(value);
            }
            if let Some(in_flight) = &slot.in_flight {
                debug!(build = in_flight.id, "joining in-flight state build");
                in_flight.build.clone()
            } else {
                let id = slot.next_build_id;
                slot.next_build_id += 1;
                debug!(build = id, "state cache miss, starting build");
                let build = self.spawn_build(id, locations.to_vec());
                slot.in_flight = Some(InFlight {
                    id,
                    build: build.clone(),
                });
                build
            }
        };
        pending.await
    }

    /// Spawns the build so it completes and updates the slot even if every
    /// waiting caller goes away.
    fn spawn_build(&self, id: u64, locations: Vec<Location>) -> SharedBuild {
        let builder = Arc::clone(&self.builder);
        let slot = Arc::clone(&self.slot);
        let ttl = self.refresh_interval;

        let task = tokio::spawn(async move {
            let guard = InFlightGuard { slot, id };
            let result = builder.build(&locations).await.map(Arc::new);
            guard.slot.lock().finish(id, result.as_ref().ok().cloned(), ttl);
            if let Err(err) = &result {
                warn!(build = id, error = %err, "state build failed");
            }
            result.map_err(CacheBuildError::from)
        });

        async move {
            task.await
                .unwrap_or_else(|err| Err(CacheBuildError::Aborted(err.to_string())))
        }
        .boxed()
        .shared()
    }
}
