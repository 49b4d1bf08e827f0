//! Top-down renderer for the hex world.
//!
//! One unlit face per cell plus a detail dot for plant cells, gizmo outlines
//! when the grid is shown, an egui HUD, and the keyboard controls that drive
//! [`SimulationControl`](hex_life::SimulationControl).

mod entities;
mod palette;
mod systems;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;
use hex_life::{WorldGrid, WorldSet};

/// Visual parameters for the viewer.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ViewerConfig {
    /// Background clear color.
    pub clear_color: Color,
    /// Extra room around the canvas as a factor of its height.
    pub camera_margin: f32,
    /// Height of detail dots above the faces.
    pub dot_lift: f32,
    /// Height of grid outlines above the faces.
    pub grid_lift: f32,
    /// HUD font size in points.
    pub hud_font_size: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            camera_margin: 1.05,
            dot_lift: 0.1,
            grid_lift: 0.2,
            hud_font_size: 16.0,
        }
    }
}

/// Maps a pixel-space point onto the ground plane, canvas centred on the origin.
///
/// Pixel `y` grows downwards, which the top-down camera shows as world `+z`.
pub fn to_world(pixel: Vec2, canvas: Vec2, height: f32) -> Vec3 {
    Vec3::new(pixel.x - canvas.x / 2.0, height, pixel.y - canvas.y / 2.0)
}

/// Viewer plugin: spawns cell visuals once the world exists and keeps them in sync.
pub struct ViewerPlugin(pub ViewerConfig);

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ViewerConfig>()
            .register_type::<entities::CellFace>()
            .register_type::<entities::DetailDot>()
            .register_type::<entities::ViewerCamera>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(
                Startup,
                (systems::spawn_camera, systems::spawn_cells).after(WorldSet::Generate),
            )
            .add_systems(Update, systems::handle_keys.before(WorldSet::Tick))
            .add_systems(
                Update,
                (systems::sync_faces, systems::sync_dots)
                    .after(WorldSet::Tick)
                    .run_if(resource_exists_and_changed::<WorldGrid>),
            )
            .add_systems(
                Update,
                systems::draw_grid_lines.run_if(resource_exists::<WorldGrid>),
            )
            .add_systems(EguiPrimaryContextPass, systems::draw_hud);
    }
}
