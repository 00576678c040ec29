//! # GaliMap: Corridor Exploration and Building Mapping
//!
//! Core of a two-wheeled robot that drives down corridors, reacts to walls
//! seen by a linear reflectance array, and builds a tree of the corridors and
//! rooms it has explored. Drive time stands in for distance.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gali_map::config::AppConfig;
//! use gali_map::sim::Simulation;
//!
//! let config = AppConfig::default();
//! let mut sim = Simulation::new(&config)?;
//! let summary = sim.run()?;
//! println!("{} corridors, {} rooms", summary.corridors, summary.rooms);
//! println!("{}", sim.map());
//! # Ok::<(), gali_map::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Shared value types (directions, wall hits, modes)
//! - [`drivers`]: Hardware traits (motors, reflectance array, clock, keys)
//! - [`reflectance`]: Calibration sweep and wall-hit classifier
//! - [`building`]: Bounded tree of corridors and rooms
//! - [`exploration`]: Corridor state machine
//! - [`mission`]: Top-level mode dispatcher owning hardware and map
//! - [`config`]: TOML configuration
//! - [`devices`]: Mock hardware
//! - [`sim`]: Hardware-free corridor world
//!
//! ## Data Flow
//!
//! ```text
//!  ReflectanceSensor ──▶ classify ──▶ CorridorExplorer ──▶ MotorDriver
//!                                        ▲        │
//!                  OperatorInput, Clock ─┘        ▼
//!                                            BuildingMap
//! ```

pub mod building;
pub mod config;
pub mod context;
pub mod core;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod exploration;
pub mod mission;
pub mod reflectance;
pub mod sim;

pub use building::{BuildingMap, CorridorIndex, MapError};
pub use config::AppConfig;
pub use context::TickContext;
pub use crate::core::{Direction, HitDirection, Mode, PivotDirection, WallHit};
pub use error::{Error, Result};
pub use exploration::{CorridorExplorer, ExplorationStep, ExplorerConfig};
pub use mission::{Mission, MissionStep, OperatorAction};
