//! Types shared between the simulation and render sides.

pub mod snapshot;
