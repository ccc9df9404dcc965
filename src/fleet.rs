//! Fleet simulation: seeding the tracked vehicles and moving them each tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Bus,
    Tram,
    Trolleybus,
}

/// Where a vehicle's position report nominally comes from. Display-only;
/// nothing in the simulation branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Satellite,
    Camera,
    V2v,
}

#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: u32,
    pub kind: VehicleKind,
    pub position: Coordinate,
    pub speed_kmh: f64,
    pub route_label: String,
    pub source: Option<SourceKind>,
}

/// One catalogue entry: a vehicle seeded at a fixed offset from the session
/// center. The catalogue is data, not code, so scenarios can reshape the
/// mock fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub kind: VehicleKind,
    pub lat_offset: f64,
    pub lng_offset: f64,
    pub speed_kmh: f64,
    pub route: String,
    #[serde(default)]
    pub source: Option<SourceKind>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedBand {
    pub min_kmh: f64,
    pub max_kmh: f64,
}

impl SpeedBand {
    pub fn clamp(&self, speed: f64) -> f64 {
        speed.clamp(self.min_kmh, self.max_kmh)
    }
}

/// Per-tick perturbation amplitudes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FleetTuning {
    /// Maximum absolute latitude/longitude step per tick, in degrees.
    pub max_step_deg: f64,
    /// Maximum absolute speed step per tick, in km/h.
    pub speed_step_kmh: f64,
    pub speed_band: SpeedBand,
}

/// The set of tracked vehicles. Owned and mutated exclusively here; every
/// other component reads vehicles by id lookup.
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    tuning: FleetTuning,
}

impl Fleet {
    /// Seeds a fixed-size fleet around `center` from the catalogue. Ids are
    /// assigned 1..=n in catalogue order and stay stable for the session;
    /// the fleet never grows or shrinks afterwards.
    pub fn seed(center: Coordinate, catalogue: &[VehicleSpec], tuning: FleetTuning) -> Self {
        let vehicles = catalogue
            .iter()
            .enumerate()
            .map(|(index, spec)| Vehicle {
                id: index as u32 + 1,
                kind: spec.kind,
                position: center.offset_deg(spec.lat_offset, spec.lng_offset),
                speed_kmh: tuning.speed_band.clamp(spec.speed_kmh),
                route_label: spec.route.clone(),
                source: spec.source,
            })
            .collect();
        Self { vehicles, tuning }
    }

    /// Advances every vehicle by one tick: independent bounded jitter on
    /// latitude and longitude plus a bounded speed perturbation clamped into
    /// the configured band. Total function, cannot fail.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        let step = self.tuning.max_step_deg;
        let speed_step = self.tuning.speed_step_kmh;
        for vehicle in &mut self.vehicles {
            let d_lat = rng.gen_range(-step..step);
            let d_lng = rng.gen_range(-step..step);
            vehicle.position = vehicle.position.offset_deg(d_lat, d_lng);
            let d_speed = rng.gen_range(-speed_step..speed_step);
            vehicle.speed_kmh = self.tuning.speed_band.clamp(vehicle.speed_kmh + d_speed);
        }
    }

    pub fn get(&self, id: u32) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn tuning(&self) -> &FleetTuning {
        &self.tuning
    }
}
