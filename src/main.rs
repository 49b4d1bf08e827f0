#![warn(missing_docs)]
//! Hex Life viewer.
//!
//! Generates a hex world of ground, lakes and plants and animates the plant
//! lifecycles from above. P pauses, G toggles the grid, +/- change speed,
//! H shows help, Tab opens the world inspector, Q quits.

mod viewer;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use hex_life::{WorldConfig, WorldPlugin};

/// Application-wide view state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum ViewState {
    /// Plain simulation view.
    #[default]
    Viewing,
    /// World inspector open (Tab to toggle).
    Inspecting,
}

/// Command-line overrides for the default [`WorldConfig`].
#[cfg(feature = "native")]
#[derive(clap::Parser, Debug)]
#[command(name = "hex-life", about = "Animated hexagonal life simulation")]
struct Args {
    /// Number of hex columns.
    #[arg(long)]
    columns: Option<usize>,
    /// Number of hex rows.
    #[arg(long)]
    rows: Option<usize>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<f32>,
    /// RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Chance each non-water cell starts as a plant.
    #[arg(long)]
    plant_spawn_probability: Option<f32>,
    /// Chance the world gets lakes.
    #[arg(long)]
    water_spawn_probability: Option<f32>,
    /// Upper bound on the water share of the grid.
    #[arg(long)]
    max_water_fraction: Option<f32>,
    /// Chance a seed survives.
    #[arg(long)]
    seed_survival_probability: Option<f32>,
    /// Chance a mature plant flowers.
    #[arg(long)]
    flowering_probability: Option<f32>,
}

#[cfg(feature = "native")]
impl Args {
    fn apply(self, cfg: &mut WorldConfig) {
        let set = |slot: &mut f32, value: Option<f32>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        cfg.grid.columns = self.columns.unwrap_or(cfg.grid.columns);
        cfg.grid.rows = self.rows.unwrap_or(cfg.grid.rows);
        set(&mut cfg.grid.display_width, self.width);
        set(&mut cfg.grid.display_height, self.height);
        cfg.seed = self.seed.unwrap_or(cfg.seed);
        set(&mut cfg.terrain.plant_spawn_probability, self.plant_spawn_probability);
        set(&mut cfg.terrain.water_spawn_probability, self.water_spawn_probability);
        set(&mut cfg.terrain.max_water_fraction, self.max_water_fraction);
        set(&mut cfg.plant.seed_survival_probability, self.seed_survival_probability);
        set(&mut cfg.plant.flowering_probability, self.flowering_probability);
    }
}

#[cfg(feature = "native")]
fn world_config() -> WorldConfig {
    use clap::Parser;
    let mut cfg = WorldConfig::default();
    Args::parse().apply(&mut cfg);
    cfg
}

#[cfg(not(feature = "native"))]
fn world_config() -> WorldConfig {
    WorldConfig::default()
}

fn main() {
    let cfg = world_config();
    if let Err(err) = cfg.validate() {
        eprintln!("hex-life: {err}");
        std::process::exit(2);
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Life".into(),
            resolution: WindowResolution::new(
                cfg.grid.display_width as u32,
                cfg.grid.display_height as u32,
            ),
            ..default()
        }),
        ..default()
    }))
    .register_type::<ViewState>()
    .init_state::<ViewState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(WorldPlugin(cfg))
    .add_plugins(viewer::ViewerPlugin(viewer::ViewerConfig::default()))
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(ViewState::Inspecting)));

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<ViewState>>,
    mut next: ResMut<NextState<ViewState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            ViewState::Viewing => ViewState::Inspecting,
            ViewState::Inspecting => ViewState::Viewing,
        });
    }
}
