//! Map renderer boundary: the drawable frame the core pushes after every
//! tick, selection change, and traffic generation. Tile drawing itself lives
//! outside this crate.

use serde::Serialize;

use crate::fleet::{Fleet, VehicleKind};
use crate::geo::Coordinate;
use crate::select::RouteView;
use crate::traffic::TrafficSegment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    User,
    Vehicle(VehicleKind),
}

impl MarkerIcon {
    pub fn colour(self) -> &'static str {
        match self {
            MarkerIcon::User => "#3B82F6",
            MarkerIcon::Vehicle(VehicleKind::Car) => "#3B82F6",
            MarkerIcon::Vehicle(VehicleKind::Bus) => "#10B981",
            MarkerIcon::Vehicle(VehicleKind::Tram) => "#8B5CF6",
            MarkerIcon::Vehicle(VehicleKind::Trolleybus) => "#6B7280",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    /// Set for vehicle markers so the renderer can report clicks back by id.
    pub vehicle_id: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolylineStyle {
    pub colour: &'static str,
    pub weight_px: u32,
    pub opacity: f64,
    pub dash: Option<&'static str>,
}

impl PolylineStyle {
    pub fn traffic(colour: &'static str, weight_px: u32) -> Self {
        Self { colour, weight_px, opacity: 0.7, dash: None }
    }

    pub fn route() -> Self {
        Self { colour: "#0EA5E9", weight_px: 3, opacity: 1.0, dash: Some("10, 10") }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Polyline {
    pub path: Vec<Coordinate>,
    pub style: PolylineStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapFrame {
    pub viewport_center: Coordinate,
    pub markers: Vec<Marker>,
    pub polylines: Vec<Polyline>,
}

impl MapFrame {
    /// Assembles the full drawable state: congestion underlay, user marker,
    /// one marker per vehicle, and the live route line when a vehicle is
    /// selected.
    pub fn compose(
        center: Coordinate,
        traffic: &[TrafficSegment],
        fleet: &Fleet,
        route: Option<&RouteView>,
    ) -> Self {
        let mut markers = Vec::with_capacity(fleet.len() + 1);
        markers.push(Marker {
            position: center,
            icon: MarkerIcon::User,
            vehicle_id: None,
        });
        for vehicle in fleet.vehicles() {
            markers.push(Marker {
                position: vehicle.position,
                icon: MarkerIcon::Vehicle(vehicle.kind),
                vehicle_id: Some(vehicle.id),
            });
        }

        let mut polylines: Vec<Polyline> = traffic
            .iter()
            .map(|segment| {
                let (colour, weight) = segment.level.style();
                Polyline {
                    path: segment.path.clone(),
                    style: PolylineStyle::traffic(colour, weight),
                }
            })
            .collect();
        if let Some(route) = route {
            polylines.push(Polyline {
                path: vec![route.from, route.to],
                style: PolylineStyle::route(),
            });
        }

        Self { viewport_center: center, markers, polylines }
    }
}

/// Consumer of composed frames.
pub trait MapRenderer: Send {
    fn render(&mut self, frame: &MapFrame);
}

/// Ignores every frame.
#[derive(Default)]
pub struct NullRenderer;

impl MapRenderer for NullRenderer {
    fn render(&mut self, _frame: &MapFrame) {}
}

/// Remembers the most recent frame and how many were pushed; handy in tests.
#[derive(Default)]
pub struct RecordingRenderer {
    state: std::sync::Arc<std::sync::Mutex<(usize, Option<MapFrame>)>>,
}

impl RecordingRenderer {
    pub fn handle(&self) -> std::sync::Arc<std::sync::Mutex<(usize, Option<MapFrame>)>> {
        self.state.clone()
    }
}

impl MapRenderer for RecordingRenderer {
    fn render(&mut self, frame: &MapFrame) {
        let mut state = self.state.lock().expect("frame state poisoned");
        state.0 += 1;
        state.1 = Some(frame.clone());
    }
}
