//! Congestion overlay: static segments generated around the user location.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    Severe,
}

impl CongestionLevel {
    /// Visual style consumed by the map renderer: (hex colour, line weight
    /// in px). Pure four-way lookup.
    pub fn style(self) -> (&'static str, u32) {
        match self {
            CongestionLevel::Low => ("#10B981", 6),
            CongestionLevel::Medium => ("#F59E0B", 6),
            CongestionLevel::High => ("#EF4444", 6),
            CongestionLevel::Severe => ("#991B1B", 6),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrafficSegment {
    pub path: Vec<Coordinate>,
    pub level: CongestionLevel,
}

/// A segment described as offsets from the session center, so the same
/// layout works wherever the viewer happens to be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// (lat_offset, lng_offset) pairs; at least two.
    pub offsets: Vec<(f64, f64)>,
    pub level: CongestionLevel,
}

/// Instantiates the congestion layout around `center`. Deterministic: fixed
/// offsets, no randomness. Specs with fewer than two points are skipped.
pub fn generate(center: Coordinate, layout: &[SegmentSpec]) -> Vec<TrafficSegment> {
    layout
        .iter()
        .filter(|spec| spec.offsets.len() >= 2)
        .map(|spec| TrafficSegment {
            path: spec
                .offsets
                .iter()
                .map(|&(dlat, dlng)| center.offset_deg(dlat, dlng))
                .collect(),
            level: spec.level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let center = Coordinate { lat: 55.7558, lng: 37.6173 };
        let layout = vec![SegmentSpec {
            offsets: vec![(0.01, 0.0), (0.01, 0.02)],
            level: CongestionLevel::High,
        }];
        let a = generate(center, &layout);
        let b = generate(center, &layout);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].path, b[0].path);
        assert!((a[0].path[0].lat - 55.7658).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segments_are_dropped() {
        let center = Coordinate { lat: 0.0, lng: 0.0 };
        let layout = vec![SegmentSpec {
            offsets: vec![(0.01, 0.0)],
            level: CongestionLevel::Low,
        }];
        assert!(generate(center, &layout).is_empty());
    }

    #[test]
    fn every_level_has_a_style() {
        for level in [
            CongestionLevel::Low,
            CongestionLevel::Medium,
            CongestionLevel::High,
            CongestionLevel::Severe,
        ] {
            let (colour, weight) = level.style();
            assert!(colour.starts_with('#'));
            assert!(weight > 0);
        }
    }
}
