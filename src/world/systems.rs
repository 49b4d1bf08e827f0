use bevy::prelude::*;

use super::{WorldConfig, WorldGrid};
use crate::control::SimulationControl;
use crate::sim_rng::SimRng;

// ── Startup ────────────────────────────────────────────────────────

/// Generates the [`WorldGrid`] resource from [`WorldConfig`].
///
/// A rejected configuration is logged and leaves the app without a world;
/// the tick system is gated on the resource existing.
pub fn generate_world(mut commands: Commands, config: Res<WorldConfig>, mut rng: ResMut<SimRng>) {
    match config.build_world(&mut rng.0) {
        Ok(grid) => commands.insert_resource(grid),
        Err(err) => error!("world generation failed: {err}"),
    }
}

// ── Update ─────────────────────────────────────────────────────────

/// Advances every plant by the frame delta scaled by the simulation speed.
pub fn tick_world(
    time: Res<Time>,
    control: Res<SimulationControl>,
    mut grid: ResMut<WorldGrid>,
    mut rng: ResMut<SimRng>,
) {
    let Some(dt) = control.scaled_delta(time.delta_secs()) else {
        return;
    };
    if let Err(err) = grid.update(dt, &mut rng.0) {
        error!("world tick skipped: {err}");
    }
}
