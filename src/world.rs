//! The hex world: cells, grid, terrain generation and the Bevy plugin that
//! owns them.
//!
//! The core types ([`WorldGrid`], [`HexCell`], [`TerrainGenerator`]) are plain
//! data driven by an injected RNG; [`WorldPlugin`] wires them into an app as a
//! `WorldGrid` resource generated at startup and ticked every frame.

mod cell;
mod generator;
mod grid;
mod systems;

pub use cell::{CellKind, HexCell};
pub use generator::{TerrainGenerator, water_regions};
pub use grid::{Census, TickReport, WorldGrid};

use bevy::prelude::*;
use rand::Rng;

use crate::control::SimulationControl;
use crate::error::{Result, SimError, check_probability};
use crate::math::GridLayout;
use crate::plant::{LifecycleTimings, PlantLifecycle};
use crate::sim_rng::{DEFAULT_SEED, SimRng};

/// Nested configuration for world generation and plant behaviour.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct WorldConfig {
    /// Grid dimensions and target canvas.
    pub grid: GridSettings,
    /// Lake and plant placement.
    pub terrain: TerrainSettings,
    /// Lifecycle parameters handed to every new plant.
    pub plant: PlantSettings,
    /// Seed for the simulation RNG.
    pub seed: u64,
}

/// Logical grid size and the pixel canvas it is fitted to.
#[derive(Clone, Debug, Reflect)]
pub struct GridSettings {
    /// Number of hex columns.
    pub columns: usize,
    /// Number of hex rows per column.
    pub rows: usize,
    /// Canvas width in pixels.
    pub display_width: f32,
    /// Canvas height in pixels; the grid fills it exactly.
    pub display_height: f32,
}

/// Lake growth and initial plant density.
#[derive(Clone, Debug, Reflect)]
pub struct TerrainSettings {
    /// Chance each non-water cell starts as a plant.
    pub plant_spawn_probability: f32,
    /// Chance the world gets any lakes at all.
    pub water_spawn_probability: f32,
    /// Upper bound on the share of cells that are water.
    pub max_water_fraction: f32,
    /// Smallest lake that is kept.
    pub lake_min_size: usize,
    /// Largest lake target size.
    pub lake_max_size: usize,
    /// Number of lake seeds tried.
    pub max_lake_attempts: usize,
    /// Expansion tries allowed per cell of a lake's target size.
    pub expansion_attempts_per_cell: usize,
}

/// Parameters shared by every plant the generator places.
#[derive(Clone, Debug, Reflect)]
pub struct PlantSettings {
    /// Chance a seed survives into a growing plant.
    pub seed_survival_probability: f32,
    /// Chance a mature plant flowers.
    pub flowering_probability: f32,
    /// State durations.
    pub timings: LifecycleTimings,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                columns: 16,
                rows: 12,
                display_width: 800.0,
                display_height: 600.0,
            },
            terrain: TerrainSettings {
                plant_spawn_probability: 0.5,
                water_spawn_probability: 0.8,
                max_water_fraction: 0.15,
                lake_min_size: 4,
                lake_max_size: 8,
                max_lake_attempts: 20,
                expansion_attempts_per_cell: 10,
            },
            plant: PlantSettings {
                seed_survival_probability: PlantLifecycle::DEFAULT_SEED_SURVIVAL,
                flowering_probability: PlantLifecycle::DEFAULT_FLOWERING,
                timings: LifecycleTimings::default(),
            },
            seed: DEFAULT_SEED,
        }
    }
}

impl WorldConfig {
    /// Checks every option, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.terrain.validate()?;
        self.plant.validate()
    }

    /// Generates a world from these settings.
    pub fn build_world<R: Rng>(&self, rng: &mut R) -> Result<WorldGrid> {
        new_world(
            self.grid.columns,
            self.grid.rows,
            self.grid.display_width,
            self.grid.display_height,
            self,
            rng,
        )
    }
}

impl GridSettings {
    /// Rejects empty grids and degenerate canvases.
    pub fn validate(&self) -> Result<()> {
        at_least_one("columns", self.columns)?;
        at_least_one("rows", self.rows)?;
        positive("display_width", self.display_width)?;
        positive("display_height", self.display_height)
    }
}

impl TerrainSettings {
    /// Checks probabilities and the lake size range.
    pub fn validate(&self) -> Result<()> {
        check_probability("plant_spawn_probability", self.plant_spawn_probability)?;
        check_probability("water_spawn_probability", self.water_spawn_probability)?;
        check_probability("max_water_fraction", self.max_water_fraction)?;
        at_least_one("lake_min_size", self.lake_min_size)?;
        if self.lake_max_size < self.lake_min_size {
            return Err(SimError::InvalidConfiguration {
                field: "lake_max_size",
                value: self.lake_max_size as f64,
                reason: "must not be below lake_min_size",
            });
        }
        at_least_one("expansion_attempts_per_cell", self.expansion_attempts_per_cell)?;
        Ok(())
    }
}

impl PlantSettings {
    /// Checks probabilities and that every duration is positive.
    pub fn validate(&self) -> Result<()> {
        check_probability("seed_survival_probability", self.seed_survival_probability)?;
        check_probability("flowering_probability", self.flowering_probability)?;
        let t = &self.timings;
        positive("seed_duration", t.seed_duration)?;
        positive("growth_threshold", t.growth_threshold)?;
        positive("mature_max_time", t.mature_max_time)?;
        positive("flowering_duration", t.flowering_duration)?;
        positive("dying_duration", t.dying_duration)
    }

    /// A fresh seed carrying these settings.
    pub fn lifecycle(&self) -> Result<PlantLifecycle> {
        PlantLifecycle::with_probabilities(
            self.timings,
            self.seed_survival_probability,
            self.flowering_probability,
        )
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfiguration {
            field,
            value: f64::from(value),
            reason: "must be positive",
        })
    }
}

fn at_least_one(field: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        Err(SimError::InvalidConfiguration {
            field,
            value: 0.0,
            reason: "must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Builds a world of `num_columns × num_rows` hexes fitted to the given canvas.
///
/// The grid settings inside `config` are ignored in favour of the explicit
/// dimensions; terrain and plant settings apply as configured.
pub fn new_world<R: Rng>(
    num_columns: usize,
    num_rows: usize,
    display_width: f32,
    display_height: f32,
    config: &WorldConfig,
    rng: &mut R,
) -> Result<WorldGrid> {
    GridSettings {
        columns: num_columns,
        rows: num_rows,
        display_width,
        display_height,
    }
    .validate()?;
    let layout = GridLayout::fit(num_columns, num_rows, display_width, display_height);
    TerrainGenerator::new(layout, &config.terrain, &config.plant)?.generate(rng)
}

/// Ordering labels for the world systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorldSet {
    /// Startup generation of the [`WorldGrid`] resource.
    Generate,
    /// Per-frame lifecycle update.
    Tick,
}

/// World plugin: generates the grid at startup and ticks it every frame.
pub struct WorldPlugin(pub WorldConfig);

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<WorldConfig>()
            .register_type::<SimulationControl>()
            .insert_resource(self.0.clone())
            .insert_resource(SimRng::from_seed_u64(self.0.seed))
            .init_resource::<SimulationControl>()
            .add_systems(Startup, systems::generate_world.in_set(WorldSet::Generate))
            .add_systems(
                Update,
                systems::tick_world
                    .in_set(WorldSet::Tick)
                    .run_if(resource_exists::<WorldGrid>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlAction;
    use crate::plant::PlantState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // ── configuration ───────────────────────────────────────────────

    #[test]
    fn defaults_are_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = WorldConfig::default();
        cfg.terrain.max_water_fraction = 1.2;
        assert!(matches!(
            cfg.validate(),
            Err(SimError::InvalidConfiguration {
                field: "max_water_fraction",
                ..
            })
        ));

        let mut cfg = WorldConfig::default();
        cfg.plant.seed_survival_probability = -0.1;
        assert!(cfg.validate().is_err());

        let mut cfg = WorldConfig::default();
        cfg.grid.rows = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = WorldConfig::default();
        cfg.terrain.lake_max_size = 3;
        assert!(cfg.validate().is_err());

        let mut cfg = WorldConfig::default();
        cfg.plant.timings.dying_duration = 0.0;
        assert!(cfg.validate().is_err());
    }

    // ── new_world ───────────────────────────────────────────────────

    #[test]
    fn new_world_uses_explicit_dimensions() {
        let cfg = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let grid = new_world(6, 4, 300.0, 200.0, &cfg, &mut rng).unwrap();
        assert_eq!(grid.num_columns(), 6);
        assert_eq!(grid.num_rows(), 4);
        assert_eq!(grid.cells().len(), 24);
        let bounds = grid.grid_bounds();
        assert!(bounds.top.abs() < 1e-3);
        assert!((grid.cell_side_length() - crate::math::side_length_for(200.0, 4)).abs() < 1e-6);
        assert!(bounds.left >= 0.0 && bounds.right <= 300.0);
    }

    #[test]
    fn new_world_rejects_empty_grid() {
        let cfg = WorldConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(new_world(0, 4, 300.0, 200.0, &cfg, &mut rng).is_err());
    }

    #[test]
    fn generated_world_advances_and_recycles_plants() {
        let mut cfg = WorldConfig::default();
        cfg.terrain.plant_spawn_probability = 1.0;
        cfg.plant.seed_survival_probability = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        let mut grid = cfg.build_world(&mut rng).unwrap();
        let plants = grid.census().plant_total();
        assert!(plants > 0);

        let t = cfg.plant.timings;
        grid.update(t.seed_duration, &mut rng).unwrap();
        assert_eq!(grid.census().plants_in(PlantState::Dying), plants);
        let report = grid.update(t.dying_duration, &mut rng).unwrap();
        assert_eq!(report.converted.len(), plants);
        assert_eq!(grid.census().plant_total(), 0);
    }

    // ── plugin ──────────────────────────────────────────────────────

    fn headless_app(cfg: WorldConfig) -> App {
        let mut app = App::new();
        app.init_resource::<Time>().add_plugins(WorldPlugin(cfg));
        app
    }

    #[test]
    fn plugin_generates_world_at_startup() {
        let mut cfg = WorldConfig::default();
        cfg.grid.columns = 5;
        cfg.grid.rows = 3;
        let mut app = headless_app(cfg);
        app.update();
        let grid = app.world().resource::<WorldGrid>();
        assert_eq!(grid.cells().len(), 15);
    }

    #[test]
    fn plugin_is_deterministic_per_seed() {
        let mut a = headless_app(WorldConfig::default());
        let mut b = headless_app(WorldConfig::default());
        a.update();
        b.update();
        assert_eq!(
            a.world().resource::<WorldGrid>().cells(),
            b.world().resource::<WorldGrid>().cells()
        );
    }

    #[test]
    fn invalid_config_leaves_no_world() {
        let mut cfg = WorldConfig::default();
        cfg.terrain.plant_spawn_probability = 2.0;
        let mut app = headless_app(cfg);
        app.update();
        assert!(app.world().get_resource::<WorldGrid>().is_none());
    }

    #[test]
    fn paused_world_does_not_tick() {
        let mut app = headless_app(WorldConfig::default());
        app.update();
        app.world_mut()
            .resource_mut::<SimulationControl>()
            .apply(ControlAction::TogglePause);
        let before = app.world().resource::<WorldGrid>().cells().to_vec();
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(std::time::Duration::from_secs(3));
        app.update();
        assert_eq!(app.world().resource::<WorldGrid>().cells(), &before[..]);
    }
}
