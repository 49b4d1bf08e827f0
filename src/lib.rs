#![warn(missing_docs)]
//! Animated hexagonal life simulation.
//!
//! A flat-topped hex grid of ground, water and plant cells. Lakes are grown
//! once at generation time; plants then run a timed lifecycle
//! (seed → growing → mature → flowering → dying → dead) and dead plants revert
//! to ground. The core is plain data driven by an injected RNG; [`WorldPlugin`]
//! hosts it in a Bevy app.

pub mod adjacency;
pub mod control;
pub mod error;
pub mod math;
pub mod plant;
pub mod sim_rng;
pub mod world;

pub use control::{ControlAction, ControlPhase, SimulationControl};
pub use error::{Result, SimError};
pub use plant::{LifecycleTimings, PlantLifecycle, PlantState, Transition};
pub use sim_rng::SimRng;
pub use world::{
    CellKind, HexCell, TickReport, WorldConfig, WorldGrid, WorldPlugin, WorldSet, new_world,
};
