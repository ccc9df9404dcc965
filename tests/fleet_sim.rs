use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use transitmap::fleet::Fleet;
use transitmap::geo::Coordinate;
use transitmap::scenario::Scenario;

const CENTER: Coordinate = Coordinate { lat: 55.7558, lng: 37.6173 };

fn reference_fleet() -> (Fleet, Scenario) {
    let scenario = Scenario::default();
    let fleet = Fleet::seed(CENTER, &scenario.fleet, scenario.tuning());
    (fleet, scenario)
}

#[test]
fn seeding_produces_the_configured_fleet() {
    let (fleet, scenario) = reference_fleet();
    assert_eq!(fleet.len(), scenario.fleet.len());
    assert_eq!(fleet.len(), 7);

    // ids are 1..=n in catalogue order and resolvable
    for (index, vehicle) in fleet.vehicles().iter().enumerate() {
        assert_eq!(vehicle.id, index as u32 + 1);
        assert_eq!(fleet.get(vehicle.id).map(|v| v.id), Some(vehicle.id));
    }
    assert!(fleet.get(99).is_none());
}

#[test]
fn seeded_positions_stay_within_the_catalogue_offsets() {
    let (fleet, _) = reference_fleet();
    for vehicle in fleet.vehicles() {
        assert!(
            (vehicle.position.lat - CENTER.lat).abs() <= 0.02 + 1e-12,
            "vehicle {} lat offset too large",
            vehicle.id
        );
        assert!(
            (vehicle.position.lng - CENTER.lng).abs() <= 0.02 + 1e-12,
            "vehicle {} lng offset too large",
            vehicle.id
        );
    }
}

#[test]
fn speeds_stay_inside_the_band_forever() {
    let (mut fleet, scenario) = reference_fleet();
    let band = scenario.speed_band;
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        fleet.tick(&mut rng);
        for vehicle in fleet.vehicles() {
            assert!(
                vehicle.speed_kmh >= band.min_kmh && vehicle.speed_kmh <= band.max_kmh,
                "vehicle {} left the band at {} km/h",
                vehicle.id,
                vehicle.speed_kmh
            );
        }
    }
}

#[test]
fn per_tick_movement_is_bounded() {
    // regression guard: no tick may move a vehicle further than the jitter
    // amplitude on either axis
    let (mut fleet, scenario) = reference_fleet();
    let step = scenario.max_step_deg;
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    for tick in 0..10 {
        let before: Vec<Coordinate> = fleet.vehicles().iter().map(|v| v.position).collect();
        fleet.tick(&mut rng);
        for (vehicle, old) in fleet.vehicles().iter().zip(&before) {
            let d_lat = (vehicle.position.lat - old.lat).abs();
            let d_lng = (vehicle.position.lng - old.lng).abs();
            assert!(
                d_lat < step && d_lng < step,
                "tick {tick}: vehicle {} jumped ({d_lat}, {d_lng})",
                vehicle.id
            );
        }
    }
}

#[test]
fn same_seed_replays_the_same_trajectories() {
    let (mut a, _) = reference_fleet();
    let (mut b, _) = reference_fleet();
    let mut rng_a = ChaCha8Rng::seed_from_u64(9);
    let mut rng_b = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..20 {
        a.tick(&mut rng_a);
        b.tick(&mut rng_b);
    }
    for (va, vb) in a.vehicles().iter().zip(b.vehicles()) {
        assert_eq!(va.position, vb.position);
        assert_eq!(va.speed_kmh, vb.speed_kmh);
    }
}
