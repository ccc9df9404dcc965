use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::fleet::{FleetTuning, SourceKind, SpeedBand, VehicleKind, VehicleSpec};
use crate::geo::Coordinate;
use crate::traffic::{CongestionLevel, SegmentSpec};

fn default_tick_ms() -> u64 {
    2000
}

fn default_acquire_timeout_ms() -> u64 {
    5000
}

fn default_fallback() -> Coordinate {
    crate::locate::FALLBACK_COORDINATE
}

fn default_speed_band() -> SpeedBand {
    SpeedBand { min_kmh: 20.0, max_kmh: 80.0 }
}

fn default_max_step_deg() -> f64 {
    0.0004
}

fn default_speed_step_kmh() -> f64 {
    2.5
}

fn default_fleet() -> Vec<VehicleSpec> {
    let spec = |kind, lat_offset, lng_offset, speed_kmh, route: &str, source| VehicleSpec {
        kind,
        lat_offset,
        lng_offset,
        speed_kmh,
        route: route.to_string(),
        source: Some(source),
    };
    vec![
        spec(VehicleKind::Car, 0.01, 0.01, 45.0, "A-101", SourceKind::Satellite),
        spec(VehicleKind::Car, -0.008, 0.0, 30.0, "M-11", SourceKind::Camera),
        spec(VehicleKind::Car, 0.015, -0.01, 60.0, "E-105", SourceKind::V2v),
        spec(VehicleKind::Bus, -0.005, 0.015, 35.0, "M1", SourceKind::Camera),
        spec(VehicleKind::Car, 0.02, 0.02, 50.0, "R-132", SourceKind::Satellite),
        spec(VehicleKind::Tram, -0.012, -0.008, 25.0, "T3", SourceKind::Camera),
        spec(VehicleKind::Car, 0.005, -0.015, 40.0, "M-7", SourceKind::V2v),
    ]
}

fn default_traffic() -> Vec<SegmentSpec> {
    vec![
        SegmentSpec {
            offsets: vec![(0.01, 0.0), (0.01, 0.02)],
            level: CongestionLevel::High,
        },
        SegmentSpec {
            offsets: vec![(0.0, -0.01), (-0.015, -0.01)],
            level: CongestionLevel::Medium,
        },
        SegmentSpec {
            offsets: vec![(-0.008, 0.005), (-0.008, 0.02)],
            level: CongestionLevel::Severe,
        },
        SegmentSpec {
            offsets: vec![(0.015, -0.015), (0.015, 0.0)],
            level: CongestionLevel::Low,
        },
    ]
}

/// A session scenario: seeds, timings, jitter amplitudes, the vehicle
/// catalogue, and the congestion layout. Every field defaults to the
/// reference behaviour, so a scenario file only states what it changes.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    #[serde(default = "default_fallback")]
    pub fallback: Coordinate,
    #[serde(default = "default_speed_band")]
    pub speed_band: SpeedBand,
    #[serde(default = "default_max_step_deg")]
    pub max_step_deg: f64,
    #[serde(default = "default_speed_step_kmh")]
    pub speed_step_kmh: f64,
    #[serde(default = "default_fleet")]
    pub fleet: Vec<VehicleSpec>,
    #[serde(default = "default_traffic")]
    pub traffic: Vec<SegmentSpec>,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        if self.fleet.is_empty() {
            bail!("scenario must define at least one vehicle");
        }
        if self.speed_band.min_kmh < 0.0 || self.speed_band.min_kmh >= self.speed_band.max_kmh {
            bail!(
                "speed band [{}, {}] is not a valid range",
                self.speed_band.min_kmh,
                self.speed_band.max_kmh
            );
        }
        if self.max_step_deg <= 0.0 || self.speed_step_kmh <= 0.0 {
            bail!("jitter amplitudes must be positive");
        }
        if Coordinate::new(self.fallback.lat, self.fallback.lng).is_none() {
            bail!(
                "fallback coordinate ({}, {}) is out of range",
                self.fallback.lat,
                self.fallback.lng
            );
        }
        for spec in &self.traffic {
            if spec.offsets.len() < 2 {
                bail!("traffic segments need at least two points");
            }
        }
        Ok(())
    }

    pub fn tuning(&self) -> FleetTuning {
        FleetTuning {
            max_step_deg: self.max_step_deg,
            speed_step_kmh: self.speed_step_kmh,
            speed_band: self.speed_band,
        }
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(30)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: None,
            seed: 42,
            ticks: None,
            tick_ms: default_tick_ms(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            fallback: default_fallback(),
            speed_band: default_speed_band(),
            max_step_deg: default_max_step_deg(),
            speed_step_kmh: default_speed_step_kmh(),
            fleet: default_fleet(),
            traffic: default_traffic(),
        }
    }
}
