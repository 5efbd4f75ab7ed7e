use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::Serialize;

use crate::alarm::{self, AlarmRate, NEAR_THRESHOLD_MINUTES};
use crate::orbit::{Observer, OrbitModel};
use crate::predict::{classify, find_next_pass, PassPhase, PassWindow, PredictError, SearchConfig};
use crate::track::{footprint_rings, ground_track, FootprintRing, GroundTrack, SweepConfig};

/// Everything one map sweep produces.
#[derive(Debug, Clone, Serialize)]
pub struct Sweep {
    pub generated_at: DateTime<Utc>,
    pub track: GroundTrack,
    pub rings: Vec<FootprintRing>,
}

/// Per-target prediction state, owned by the caller.
///
/// Holds the orbit model, the observer, and the cached pass window together
/// with its refresh lifecycle: the window is recomputed when the model's
/// epoch changes (fresh elements) or when the cached pass has fully elapsed.
/// Sweeps are computed only on demand, decoupled from the pass cadence,
/// because footprint sampling costs far more than the event-driven search.
///
/// There is no global state anywhere; any number of trackers can coexist.
pub struct Tracker<M: OrbitModel> {
    orbit: Option<M>,
    observer: Option<Observer>,
    search: SearchConfig,
    sweep: SweepConfig,
    cached: Option<CachedWindow>,
    near: Duration,
}

struct CachedWindow {
    window: PassWindow,
    epoch: DateTime<Utc>,
}

impl<M: OrbitModel> Default for Tracker<M> {
    fn default() -> Self {
        Self::new(SearchConfig::default(), SweepConfig::default())
    }
}

impl<M: OrbitModel> Tracker<M> {
    pub fn new(search: SearchConfig, sweep: SweepConfig) -> Self {
        Self {
            orbit: None,
            observer: None,
            search,
            sweep,
            cached: None,
            near: Duration::minutes(NEAR_THRESHOLD_MINUTES),
        }
    }

    pub fn set_orbit(&mut self, orbit: M) {
        self.orbit = Some(orbit);
        self.cached = None;
    }

    pub fn clear_orbit(&mut self) {
        self.orbit = None;
        self.cached = None;
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
        self.cached = None;
    }

    pub fn orbit(&self) -> Option<&M> {
        self.orbit.as_ref()
    }

    pub fn window(&self) -> Option<&PassWindow> {
        self.cached.as_ref().map(|c| &c.window)
    }

    /// Classify "now" against the current pass window, refreshing the window
    /// first if its lifecycle calls for it, and derive the alarm rate.
    /// Without an orbit and an observer this is `(NoData, Off)`; a propagator
    /// failure during refresh degrades to the same, with a warning logged.
    pub fn update(&mut self, now: DateTime<Utc>) -> (PassPhase, AlarmRate) {
        let (Some(orbit), Some(observer)) = (self.orbit.as_mut(), self.observer.as_ref()) else {
            return (PassPhase::NoData, AlarmRate::Off);
        };

        let epoch = orbit.epoch();
        let stale = match &self.cached {
            None => true,
            Some(cached) if cached.epoch != epoch => true,
            Some(cached) => matches!(classify(&cached.window, now), PassPhase::JustSet { .. }),
        };

        if stale {
            match find_next_pass(orbit, observer, now, &self.search) {
                Ok(window) => self.cached = Some(CachedWindow { window, epoch }),
                Err(e) => {
                    warn!("pass search failed: {}", e);
                    self.cached = None;
                    return (PassPhase::NoData, AlarmRate::Off);
                }
            }
        }

        let window = match &self.cached {
            Some(cached) => cached.window,
            None => PassWindow::default(),
        };
        let phase = classify(&window, now);
        let rate = alarm::signal(&phase, self.near);
        (phase, rate)
    }

    /// Recompute the ground track and footprint rings. `None` without an
    /// orbit model. Callers are expected to drive this at display-refresh
    /// cadence, not per frame.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> Result<Option<Sweep>, PredictError> {
        let Some(orbit) = self.orbit.as_mut() else {
            return Ok(None);
        };
        let track = ground_track(orbit, now, &self.sweep)?;
        let rings = footprint_rings(orbit, now, &self.sweep)?;
        Ok(Some(Sweep {
            generated_at: now,
            track,
            rings,
        }))
    }
}
