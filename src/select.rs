//! Vehicle selection and route derivation.

use serde::Serialize;

use crate::error::TrackingError;
use crate::fleet::{Fleet, Vehicle};
use crate::geo::{distance_km, Coordinate};

/// The route presented for a selected vehicle: a straight visual line from
/// the viewer to the vehicle plus a great-circle distance estimate.
#[derive(Debug, Clone, Serialize)]
pub struct RouteView {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
    pub vehicle: Vehicle,
}

/// Two-state machine: `Idle` or `Selected(id)`. The selection holds only the
/// vehicle id, resolved against the live fleet on every read, so the route
/// line keeps tracking the moving vehicle.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<u32>,
}

impl SelectionController {
    /// Selects a vehicle and returns the route snapshot taken at selection
    /// time. Replaces any existing selection; there is never a moment where
    /// two vehicles are selected. Fails without entering `Selected` when no
    /// user location has resolved or the id is unknown.
    pub fn select(
        &mut self,
        id: u32,
        user_location: Option<Coordinate>,
        fleet: &Fleet,
    ) -> Result<RouteView, TrackingError> {
        let from = user_location.ok_or(TrackingError::SelectionWithoutLocation)?;
        let vehicle = fleet.get(id).ok_or(TrackingError::UnknownVehicle(id))?;
        self.selected = Some(id);
        Ok(route_view(from, vehicle))
    }

    /// Idempotent; clearing an empty selection is a no-op.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
    }

    /// Re-derives the active route against the vehicle's current position.
    /// Returns `None` when idle.
    pub fn current(&self, user_location: Option<Coordinate>, fleet: &Fleet) -> Option<RouteView> {
        let id = self.selected?;
        let from = user_location?;
        fleet.get(id).map(|vehicle| route_view(from, vehicle))
    }
}

fn route_view(from: Coordinate, vehicle: &Vehicle) -> RouteView {
    RouteView {
        from,
        to: vehicle.position,
        distance_km: distance_km(from, vehicle.position),
        vehicle: vehicle.clone(),
    }
}
