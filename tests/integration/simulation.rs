//! Simulated corridor world runs

use approx::assert_relative_eq;
use gali_map::building::CorridorIndex;
use gali_map::config::{AppConfig, ScriptedKey};
use gali_map::core::{Direction, Mode};
use gali_map::sim::{Scene, Simulation};

fn straight_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.simulation.drift_stddev = 0.0;
    config
}

#[test]
fn test_default_script_builds_expected_map() {
    let mut sim = Simulation::new(&straight_config()).unwrap();
    let summary = sim.run().unwrap();

    assert_eq!(summary.ticks, 1000);
    assert_eq!(summary.sim_time_ms, 2600 + 1000 * 20);
    assert_eq!(summary.pivots, 0);
    assert_eq!(summary.corridors, 3);
    assert_eq!(summary.rooms, 1);

    let map = sim.map();
    let root = map.corridor(CorridorIndex::ROOT).unwrap();
    assert_relative_eq!(root.approx_length(), 3000.0);
    assert_relative_eq!(root.rooms()[0].time_down_corridor, 1480.0);

    let left = map.corridor(CorridorIndex(1)).unwrap();
    assert_eq!(left.direction_from_parent(), Direction::Left);
    assert_eq!(left.parent(), Some(CorridorIndex::ROOT));
    assert_relative_eq!(left.approx_length(), 2000.0);

    let right = map.corridor(CorridorIndex(2)).unwrap();
    assert_eq!(right.direction_from_parent(), Direction::Right);
    assert_eq!(right.parent(), Some(CorridorIndex::ROOT));
    assert_relative_eq!(right.approx_length(), 780.0);

    assert_relative_eq!(summary.total_length_ms, 5780.0);
    assert_eq!(sim.mission().mode(), Mode::AwaitingOperator);
}

#[test]
fn test_root_wall_seen_at_corridor_end() {
    let mut sim = Simulation::new(&straight_config()).unwrap();
    while sim.mission().map().corridor_count() < 2 {
        sim.step().unwrap();
    }
    assert_eq!(sim.world().scene(CorridorIndex::ROOT), Scene::WallAhead);
    assert_eq!(sim.world().progress(CorridorIndex::ROOT), 3000);
}

#[test]
fn test_drift_causes_pivots() {
    let mut config = AppConfig::default();
    config.simulation.drift_stddev = 0.6;
    config.simulation.seed = 1234;

    let mut sim = Simulation::new(&config).unwrap();
    let summary = sim.run().unwrap();

    assert!(summary.pivots > 0);
    assert_eq!(
        summary.sim_time_ms,
        2600 + 1000 * 20 + summary.pivots as u64 * 150
    );
    assert!(summary.corridors >= 1);
}

#[test]
fn test_same_seed_same_run() {
    let mut config = AppConfig::default();
    config.simulation.drift_stddev = 0.3;
    config.simulation.seed = 99;
    config.simulation.max_ticks = 600;

    let a = Simulation::new(&config).unwrap().run().unwrap();
    let b = Simulation::new(&config).unwrap().run().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_reset_key_clears_world_progress() {
    let mut config = straight_config();
    config.simulation.script = vec![
        ScriptedKey::new(3000, 'g'),
        ScriptedKey::new(7000, 'x'),
        ScriptedKey::new(7200, 'g'),
        ScriptedKey::new(8000, ' '),
        ScriptedKey::new(8100, 'C'),
    ];
    config.simulation.max_ticks = 400;

    let mut sim = Simulation::new(&config).unwrap();
    sim.run().unwrap();

    // Second run down the root starts from zero progress
    let root = sim.map().current_corridor();
    assert_eq!(sim.map().corridor_count(), 1);
    assert_relative_eq!(root.approx_length(), 780.0);
}

#[test]
fn test_bundled_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/gali-map.toml");
    let config = AppConfig::from_file(path).unwrap();
    assert_eq!(config, AppConfig::default());
}
