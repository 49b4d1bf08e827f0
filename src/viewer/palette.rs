use bevy::prelude::*;

use hex_life::{CellKind, PlantState};

/// Bare soil; also the starting point of the plant blend.
pub const GROUND: Srgba = Srgba::rgb(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0);
/// Lakes.
pub const WATER: Srgba = Srgba::rgb(30.0 / 255.0, 144.0 / 255.0, 255.0 / 255.0);
/// Fully grown plant fill.
pub const PLANT_GREEN: Srgba = Srgba::rgb(34.0 / 255.0, 139.0 / 255.0, 34.0 / 255.0);
/// Cell outlines.
pub const GRID_LINE: Srgba = Srgba::rgb(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);

/// Face colour of a cell.
///
/// Plants blend from [`GROUND`] to [`PLANT_GREEN`] by their colour factor.
pub fn cell_color(kind: &CellKind) -> Color {
    match kind {
        CellKind::Ground => GROUND.into(),
        CellKind::Water => WATER.into(),
        CellKind::Plant(p) => GROUND.mix(&PLANT_GREEN, p.color_factor().clamp(0.0, 1.0)).into(),
    }
}

/// Detail dot colour and radius (as a fraction of the side length) for a
/// plant state; dead plants have no dot.
pub fn detail_dot(state: PlantState) -> Option<(Color, f32)> {
    let (rgb, radius) = match state {
        PlantState::Seed => ((255, 255, 0), 0.15),
        PlantState::Growing => ((154, 205, 50), 0.25),
        PlantState::Mature => ((34, 139, 34), 0.3),
        PlantState::Flowering => ((255, 215, 0), 0.4),
        PlantState::Dying => ((205, 133, 63), 0.25),
        PlantState::Dead => return None,
    };
    let (r, g, b) = rgb;
    Some((Color::srgb_u8(r, g, b), radius))
}
