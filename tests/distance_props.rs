use transitmap::geo::{distance_km, Coordinate};

fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("valid coordinate")
}

#[test]
fn identity_holds_across_the_globe() {
    for &(lat, lng) in &[
        (0.0, 0.0),
        (55.7558, 37.6173),
        (-33.8688, 151.2093),
        (90.0, 0.0),
        (-90.0, 180.0),
    ] {
        let a = coord(lat, lng);
        assert_eq!(distance_km(a, a), 0.0, "distance({lat},{lng} to itself)");
    }
}

#[test]
fn symmetry_holds_for_antipodal_ish_pairs() {
    let pairs = [
        (coord(55.7558, 37.6173), coord(59.9343, 30.3351)),
        (coord(51.5074, -0.1278), coord(-36.8485, 174.7633)),
        (coord(0.0, 179.9), coord(0.0, -179.9)),
    ];
    for (a, b) in pairs {
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }
}

#[test]
fn colinear_points_add_up() {
    // three points on the same meridian, b between a and c
    let a = coord(10.0, 20.0);
    let b = coord(10.5, 20.0);
    let c = coord(11.0, 20.0);
    let direct = distance_km(a, c);
    let via = distance_km(a, b) + distance_km(b, c);
    assert!((direct - via).abs() < 1e-9, "direct {direct} vs via {via}");

    // and on the equator, where lng degrees are full-sized
    let a = coord(0.0, 30.0);
    let b = coord(0.0, 31.0);
    let c = coord(0.0, 33.0);
    let direct = distance_km(a, c);
    let via = distance_km(a, b) + distance_km(b, c);
    assert!((direct - via).abs() < 1e-9, "direct {direct} vs via {via}");
}

#[test]
fn reference_pair_matches_haversine() {
    // the fallback center and the first catalogue vehicle (+0.01, +0.01)
    let user = coord(55.7558, 37.6173);
    let vehicle = coord(55.7658, 37.6273);
    let d = distance_km(user, vehicle);
    assert!((d - 1.2759).abs() < 1e-3, "got {d}");
}
