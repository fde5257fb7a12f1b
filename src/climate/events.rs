use bevy::prelude::*;

/// Any stimulus changed the simulation parameters; derived visual state
/// and warnings must be recomputed.
#[derive(Message)]
pub struct SimulationChanged;

/// Validated fast-forward request from the control panel.
#[derive(Message)]
pub struct AccelerateTime {
    pub years: u32,
}
