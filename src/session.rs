//! The owned simulation context: user location, fleet, traffic, and
//! selection live here, and every state change pushes a fresh frame to the
//! map renderer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;

use crate::error::TrackingError;
use crate::fleet::Fleet;
use crate::framelog::FrameLog;
use crate::geo::Coordinate;
use crate::locate::{FixSource, GeoLocator, LocationFix, LocationProvider};
use crate::notify::{Notice, Notifier, NullNotifier};
use crate::render::{MapFrame, MapRenderer, NullRenderer};
use crate::rng::RngManager;
use crate::scenario::Scenario;
use crate::select::{RouteView, SelectionController};
use crate::traffic::{self, TrafficSegment};

pub struct SessionBuilder {
    scenario: Scenario,
    notifier: Box<dyn Notifier>,
    renderer: Box<dyn MapRenderer>,
    frame_log: FrameLog,
}

impl SessionBuilder {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            notifier: Box::new(NullNotifier),
            renderer: Box::new(NullRenderer),
            frame_log: FrameLog::disabled(),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_renderer(mut self, renderer: impl MapRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_frame_log(mut self, frame_log: FrameLog) -> Self {
        self.frame_log = frame_log;
        self
    }

    pub fn build(self) -> Session {
        Session {
            rng: RngManager::new(self.scenario.seed),
            user_location: None,
            fleet: None,
            traffic: Vec::new(),
            selection: SelectionController::default(),
            tick_count: 0,
            notifier: self.notifier,
            renderer: self.renderer,
            frame_log: self.frame_log,
            scenario: self.scenario,
        }
    }
}

pub struct Session {
    scenario: Scenario,
    rng: RngManager,
    user_location: Option<Coordinate>,
    fleet: Option<Fleet>,
    traffic: Vec<TrafficSegment>,
    selection: SelectionController,
    tick_count: u64,
    notifier: Box<dyn Notifier>,
    renderer: Box<dyn MapRenderer>,
    frame_log: FrameLog,
}

impl Session {
    /// Acquires the viewer's position and, on the first resolution, seeds
    /// the fleet and generates the congestion overlay around it. Invoked
    /// again on an explicit refresh, which re-centers everything and drops
    /// any active selection. Never fails: denial and timeout degrade to the
    /// scenario's fallback coordinate.
    pub async fn resolve_location(&mut self, provider: &impl LocationProvider) -> LocationFix {
        let locator = GeoLocator::new(
            Duration::from_millis(self.scenario.acquire_timeout_ms),
            self.scenario.fallback,
        );
        let fix = locator.acquire(provider).await;
        match fix.source {
            FixSource::Device => self.notifier.notify(Notice::info(
                "Geolocation active",
                "Your position was determined precisely",
            )),
            FixSource::Fallback => self.notifier.notify(Notice::error(
                "Geolocation unavailable",
                "Using the default location",
            )),
        }
        log::info!(
            "session center resolved to ({:.4}, {:.4})",
            fix.coordinate.lat,
            fix.coordinate.lng
        );

        self.user_location = Some(fix.coordinate);
        self.fleet = Some(Fleet::seed(
            fix.coordinate,
            &self.scenario.fleet,
            self.scenario.tuning(),
        ));
        self.traffic = traffic::generate(fix.coordinate, &self.scenario.traffic);
        self.selection.clear();
        self.push_frame();
        fix
    }

    /// Advances the fleet by one tick and pushes a frame. Suppressed until
    /// the user location has resolved; before that there is no meaningful
    /// center to move anything around.
    pub fn tick(&mut self) -> Result<()> {
        let Some(fleet) = self.fleet.as_mut() else {
            log::debug!("tick before location resolution, suppressed");
            return Ok(());
        };
        fleet.tick(&mut self.rng.stream("fleet"));
        self.tick_count += 1;
        self.push_frame()
    }

    /// Runs a fixed number of ticks back to back.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    /// Selects a vehicle by marker id, replacing any previous selection, and
    /// announces the distance estimate. The error paths (no user location,
    /// unknown id) leave the selection state untouched and surface a notice.
    pub fn select(&mut self, vehicle_id: u32) -> Result<RouteView, TrackingError> {
        let route = match self.fleet.as_ref() {
            Some(fleet) => self.selection.select(vehicle_id, self.user_location, fleet),
            None => Err(TrackingError::SelectionWithoutLocation),
        };
        match route {
            Ok(route) => {
                self.notifier.notify(Notice::info(
                    "Route built",
                    format!(
                        "{} is {:.2} km away at {:.0} km/h",
                        route.vehicle.route_label, route.distance_km, route.vehicle.speed_kmh
                    ),
                ));
                let _ = self.push_frame();
                Ok(route)
            }
            Err(err) => {
                self.notifier
                    .notify(Notice::error("Cannot build route", err.to_string()));
                Err(err)
            }
        }
    }

    /// Clears the active selection; a no-op when nothing is selected.
    pub fn clear_selection(&mut self) {
        if self.selection.selected_id().is_some() {
            self.selection.clear();
            let _ = self.push_frame();
        }
    }

    /// The active route, re-derived against the vehicle's live position.
    pub fn current_route(&self) -> Option<RouteView> {
        let fleet = self.fleet.as_ref()?;
        self.selection.current(self.user_location, fleet)
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    pub fn fleet(&self) -> Option<&Fleet> {
        self.fleet.as_ref()
    }

    pub fn traffic(&self) -> &[TrafficSegment] {
        &self.traffic
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The current drawable state, or `None` before the location resolves.
    pub fn frame(&self) -> Option<MapFrame> {
        let center = self.user_location?;
        let fleet = self.fleet.as_ref()?;
        let route = self.current_route();
        Some(MapFrame::compose(center, &self.traffic, fleet, route.as_ref()))
    }

    fn push_frame(&mut self) -> Result<()> {
        if let Some(frame) = self.frame() {
            self.renderer.render(&frame);
            self.frame_log.maybe_write(self.tick_count, &frame)?;
        }
        Ok(())
    }
}

/// The 2000 ms repeating tick as an explicit, cancellable task. Stopping the
/// handle (or dropping it) aborts the task; a leaked timer mutating a fleet
/// nobody observes is a correctness bug.
pub struct TickerHandle {
    task: tokio::task::JoinHandle<()>,
}

impl TickerHandle {
    pub fn spawn(session: Arc<Mutex<Session>>) -> Self {
        let period = {
            let session = session.lock().expect("session lock poisoned");
            Duration::from_millis(session.scenario.tick_ms)
        };
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // the first interval tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut session = session.lock().expect("session lock poisoned");
                if let Err(err) = session.tick() {
                    log::warn!("tick failed: {err:#}");
                }
            }
        });
        Self { task }
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
