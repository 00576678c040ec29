//! Hand-stepped mission scenarios

use approx::assert_relative_eq;
use gali_map::building::{CorridorIndex, MAX_CORRIDORS};
use gali_map::config::AppConfig;
use gali_map::core::{Direction, Mode, PivotDirection};
use gali_map::devices::mock::{
    MockClock, MockMotorDriver, MockReflectanceArray, MotorCommand, ScriptedInput,
};
use gali_map::drivers::ReflectanceSensor;
use gali_map::error::Error;
use gali_map::exploration::{CorridorPhase, Decision, ExitReason};
use gali_map::mission::{Mission, OperatorAction};

use crate::harness::{LEFT_WALL, MissionHarness, RIGHT_WALL};

#[test]
fn test_corridor_with_rooms_accumulates_length() {
    let mut h = MissionHarness::new();

    for (segment, expected_rooms) in [(1000, 1), (600, 2)] {
        h.tap('g');
        h.drive(segment);
        let step = h.pause_and_decide('R');
        assert_eq!(
            step.exploration.unwrap().exit_reason,
            Some(ExitReason::Decision(Decision::NewRoom))
        );
        assert_eq!(h.mission.mode(), Mode::AwaitingOperator);
        assert_eq!(h.mission.map().current_corridor().room_count(), expected_rooms);
    }

    h.tap('g');
    h.drive(1400);
    let step = h.hit_wall();
    assert_eq!(step.next_mode, Mode::AwaitingOperator);

    let corridor = h.mission.map().current_corridor();
    assert_relative_eq!(corridor.approx_length(), 3000.0);
    let times: Vec<f32> = corridor.rooms().iter().map(|r| r.time_down_corridor).collect();
    assert_eq!(times, vec![1000.0, 600.0]);
    let offsets: Vec<f32> = corridor.room_offsets().collect();
    assert_eq!(offsets, vec![1000.0, 1600.0]);
    assert!(h.motors.is_stopped());
}

#[test]
fn test_new_corridor_decision_then_branch() {
    let mut h = MissionHarness::new();

    h.tap('g');
    h.drive(800);
    let step = h.pause_and_decide('C');
    assert_eq!(
        step.exploration.unwrap().exit_reason,
        Some(ExitReason::Decision(Decision::NewCorridor))
    );
    assert_relative_eq!(h.mission.map().current_corridor().approx_length(), 800.0);

    let step = h.tap('l');
    assert_eq!(step.action, Some(OperatorAction::Branch(Direction::Left)));
    h.drive(500);
    h.hit_wall();

    let map = h.mission.map();
    assert_eq!(map.corridor_count(), 2);
    assert_eq!(map.current_index(), CorridorIndex(1));
    assert_eq!(map.parent_of(map.current_index()), Some(CorridorIndex::ROOT));
    assert_relative_eq!(map.current_corridor().approx_length(), 500.0);
    assert_relative_eq!(map.total_length(), 1300.0);
}

#[test]
fn test_back_to_parent_then_branch_straight() {
    let mut h = MissionHarness::new();

    h.tap('r');
    h.drive(400);
    h.hit_wall();
    h.tap('b');
    assert_eq!(h.mission.map().current_index(), CorridorIndex::ROOT);

    h.tap('f');
    h.drive(300);
    h.hit_wall();

    let map = h.mission.map();
    let children: Vec<_> = map.children(CorridorIndex::ROOT).map(|c| c.index()).collect();
    assert_eq!(children, vec![CorridorIndex(1), CorridorIndex(2)]);
    assert_eq!(map.corridor(CorridorIndex(1)).unwrap().direction_from_parent(), Direction::Right);
    assert_eq!(
        map.corridor(CorridorIndex(2)).unwrap().direction_from_parent(),
        Direction::Straight
    );
    assert_eq!(map.lineage(CorridorIndex(2)), vec![CorridorIndex(2), CorridorIndex::ROOT]);
}

#[test]
fn test_resumed_corridor_keeps_earlier_length() {
    let mut h = MissionHarness::new();

    h.tap('g');
    h.drive(3000);
    h.hit_wall();
    assert_relative_eq!(h.mission.map().current_corridor().approx_length(), 3000.0);

    h.tap('l');
    h.drive(400);
    h.hit_wall();
    h.tap('b');
    assert_eq!(h.mission.map().current_index(), CorridorIndex::ROOT);

    // Back on the root corridor: the extra 200 ms extends it
    h.tap('g');
    h.drive(200);
    h.hit_wall();

    let map = h.mission.map();
    assert_relative_eq!(map.current_corridor().approx_length(), 3200.0);
    assert_relative_eq!(map.corridor(CorridorIndex(1)).unwrap().approx_length(), 400.0);
    assert_relative_eq!(map.total_length(), 3600.0);
}

#[test]
fn test_full_map_keeps_exploring() {
    let mut h = MissionHarness::new();

    for _ in 1..MAX_CORRIDORS {
        h.tap('f');
        h.drive(100);
        h.hit_wall();
    }
    assert_eq!(h.mission.map().corridor_count(), MAX_CORRIDORS);
    let last = h.mission.map().current_index();

    // No room for an eleventh corridor: traversal continues on the current one
    h.tap('l');
    h.drive(200);
    assert_eq!(h.mission.mode(), Mode::Corridor);
    assert_eq!(h.motors.speeds(), (100, 100));
    h.hit_wall();

    let map = h.mission.map();
    assert_eq!(map.corridor_count(), MAX_CORRIDORS);
    assert_eq!(map.current_index(), last);
    // 100 ms before the wall, 200 ms more after the failed branch
    assert_relative_eq!(map.current_corridor().approx_length(), 300.0);
}

#[test]
fn test_side_clips_steer_away() {
    let mut h = MissionHarness::new();
    h.tap('g');
    h.drive(100);

    h.sensors.set_readings(&LEFT_WALL);
    let step = h.tick();
    assert_eq!(
        step.exploration.as_ref().and_then(|e| e.pivot),
        Some(PivotDirection::Clockwise)
    );

    h.sensors.set_readings(&RIGHT_WALL);
    let step = h.tick();
    assert_eq!(
        step.exploration.as_ref().and_then(|e| e.pivot),
        Some(PivotDirection::CounterClockwise)
    );

    h.drive(100);
    assert_eq!(h.mission.mode(), Mode::Corridor);
    assert_eq!(h.motors.pivot_count(), 2);
    assert_eq!(h.motors.speeds(), (100, 100));

    let pivots: Vec<_> = h
        .motors
        .commands()
        .into_iter()
        .filter(|c| matches!(c, MotorCommand::Pivot { .. }))
        .collect();
    assert_eq!(
        pivots,
        vec![
            MotorCommand::Pivot {
                direction: PivotDirection::Clockwise,
                speed: 30,
                blocking: true
            },
            MotorCommand::Pivot {
                direction: PivotDirection::CounterClockwise,
                speed: 30,
                blocking: true
            },
        ]
    );
}

#[test]
fn test_paused_robot_ignores_walls() {
    let mut h = MissionHarness::new();
    h.tap('g');
    h.drive(200);
    h.tap('s');

    h.sensors.set_readings(&LEFT_WALL);
    let step = h.tick();
    let exploration = step.exploration.unwrap();
    assert_eq!(exploration.phase, CorridorPhase::PausedAwaitingDecision);
    assert!(exploration.pivot.is_none());
    assert_eq!(h.motors.pivot_count(), 0);
}

#[test]
fn test_calibration_sweep_enables_reads() {
    let config = AppConfig::default();
    let mut h = MissionHarness::uncalibrated(&config);
    assert!(!h.sensors.is_calibrated());

    let step = h.tick();
    assert_eq!(step.mode, Mode::Calibrating);
    assert_eq!(step.next_mode, Mode::AwaitingOperator);
    assert!(h.sensors.is_calibrated());

    // Spin pattern: 80 sweep commands then a stop
    let commands = h.motors.commands();
    assert_eq!(commands.len(), 81);
    assert_eq!(commands[0], MotorCommand::SetSpeeds { left: 200, right: -200 });
    assert_eq!(commands[11], MotorCommand::SetSpeeds { left: -200, right: 200 });
    assert_eq!(commands[80], MotorCommand::SetSpeeds { left: 0, right: 0 });

    h.sensors.set_readings(&[240; 6]);
    h.tap('g');
    h.tick();
    let step = h.tick();
    assert_eq!(step.exploration.unwrap().hit.map(|hit| hit.hit), Some(false));
}

#[test]
fn test_uncalibrated_read_is_fatal() {
    let config = AppConfig::default();
    let input = ScriptedInput::new();
    let mut mission = Mission::new(
        &config,
        MockReflectanceArray::uncalibrated(6, 200, 2200),
        MockMotorDriver::default(),
        MockClock::new(0),
        input.clone(),
    )
    .unwrap()
    .skip_calibration();

    input.press('g');
    mission.tick().unwrap();
    mission.tick().unwrap();
    assert!(matches!(mission.tick(), Err(Error::NotCalibrated)));
}

#[test]
fn test_print_and_reset_map() {
    let mut h = MissionHarness::new();
    h.tap('l');
    h.drive(100);
    h.hit_wall();

    let step = h.tap('m');
    assert_eq!(step.action, Some(OperatorAction::PrintMap));
    let rendered = h.mission.map().to_string();
    assert!(rendered.contains("C0"));
    assert!(rendered.contains("C1 [L]"));

    let step = h.tap('x');
    assert_eq!(step.action, Some(OperatorAction::ResetMap));
    assert_eq!(h.mission.map().corridor_count(), 1);
    assert_eq!(h.mission.map().current_index(), CorridorIndex::ROOT);
}
