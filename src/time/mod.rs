//! Simulation time bookkeeping.

mod simulation_time;

pub use simulation_time::{SimulationTime, TIME_EPSILON};
