//! Geolocation: single-shot position acquisition with a bounded wait and a
//! deterministic fallback.

use std::time::Duration;

use crate::error::TrackingError;
use crate::geo::Coordinate;

/// The Moscow city center, used whenever the device cannot produce a fix.
pub const FALLBACK_COORDINATE: Coordinate = Coordinate { lat: 55.7558, lng: 37.6173 };

pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Device geolocation boundary: one "get current position" call per
/// invocation, no streaming mode.
pub trait LocationProvider {
    fn current_position(
        &self,
    ) -> impl std::future::Future<Output = Result<Coordinate, TrackingError>> + Send;
}

/// Always reports the given coordinate.
pub struct FixedLocationProvider(pub Coordinate);

impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> Result<Coordinate, TrackingError> {
        Ok(self.0)
    }
}

/// Models a viewer who declined the permission prompt.
pub struct DeniedLocationProvider;

impl LocationProvider for DeniedLocationProvider {
    async fn current_position(&self) -> Result<Coordinate, TrackingError> {
        Err(TrackingError::LocationUnavailable("permission denied".into()))
    }
}

/// Never resolves; exercises the timeout path.
pub struct PendingLocationProvider;

impl LocationProvider for PendingLocationProvider {
    async fn current_position(&self) -> Result<Coordinate, TrackingError> {
        std::future::pending().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixSource {
    Device,
    Fallback,
}

#[derive(Debug, Clone, Copy)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub source: FixSource,
}

pub struct GeoLocator {
    timeout: Duration,
    fallback: Coordinate,
}

impl GeoLocator {
    pub fn new(timeout: Duration, fallback: Coordinate) -> Self {
        Self { timeout, fallback }
    }

    /// Asks the provider for a position, waiting at most the configured
    /// timeout. Denial, absence, and timeout all degrade to the fallback
    /// coordinate; acquisition never fails outright.
    pub async fn acquire(&self, provider: &impl LocationProvider) -> LocationFix {
        match tokio::time::timeout(self.timeout, provider.current_position()).await {
            Ok(Ok(coordinate)) => LocationFix {
                coordinate,
                source: FixSource::Device,
            },
            Ok(Err(err)) => {
                log::warn!("geolocation failed, using fallback: {err}");
                LocationFix {
                    coordinate: self.fallback,
                    source: FixSource::Fallback,
                }
            }
            Err(_) => {
                log::warn!(
                    "geolocation timed out after {:?}, using fallback",
                    self.timeout
                );
                LocationFix {
                    coordinate: self.fallback,
                    source: FixSource::Fallback,
                }
            }
        }
    }
}

impl Default for GeoLocator {
    fn default() -> Self {
        Self::new(DEFAULT_ACQUIRE_TIMEOUT, FALLBACK_COORDINATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn device_fix_is_passed_through() {
        let position = Coordinate { lat: 48.8566, lng: 2.3522 };
        let locator = GeoLocator::default();
        let fix = locator.acquire(&FixedLocationProvider(position)).await;
        assert_eq!(fix.source, FixSource::Device);
        assert_eq!(fix.coordinate, position);
    }

    #[tokio::test]
    async fn denial_falls_back() {
        let locator = GeoLocator::default();
        let fix = locator.acquire(&DeniedLocationProvider).await;
        assert_eq!(fix.source, FixSource::Fallback);
        assert_eq!(fix.coordinate, FALLBACK_COORDINATE);
    }

    #[tokio::test]
    async fn timeout_falls_back() {
        let locator = GeoLocator::new(Duration::from_millis(10), FALLBACK_COORDINATE);
        let fix = locator.acquire(&PendingLocationProvider).await;
        assert_eq!(fix.source, FixSource::Fallback);
    }
}
