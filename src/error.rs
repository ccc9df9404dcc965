use thiserror::Error;

/// Failures the tracking core can report.
///
/// Every variant is recovered at the boundary that detects it and surfaced
/// through the [`Notifier`](crate::notify::Notifier); none of them terminates
/// a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingError {
    /// Device capability missing, denied, or timed out. The session
    /// substitutes the configured fallback coordinate.
    #[error("geolocation unavailable: {0}")]
    LocationUnavailable(String),

    /// A vehicle was selected before the user location resolved; a route
    /// needs a fixed endpoint.
    #[error("cannot build a route before the user location is known")]
    SelectionWithoutLocation,

    /// A marker click referenced an id the fleet does not contain.
    #[error("unknown vehicle id {0}")]
    UnknownVehicle(u32),
}
