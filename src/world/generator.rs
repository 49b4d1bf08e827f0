use std::collections::VecDeque;

use bevy::prelude::*;
use rand::Rng;

use super::cell::{CellKind, HexCell};
use super::grid::WorldGrid;
use super::{PlantSettings, TerrainSettings};
use crate::adjacency::{cell_index, neighbors};
use crate::error::Result;
use crate::math::GridLayout;

/// Result of one lake-growing attempt.
enum Growth {
    /// Connected group of at least the minimum size, ready to flood.
    Grown(Vec<usize>),
    /// Cells that were examined but did not form a lake.
    Discarded(Vec<usize>),
}

/// Builds the initial world: lakes first, then plants on the remaining ground.
pub struct TerrainGenerator<'a> {
    layout: GridLayout,
    terrain: &'a TerrainSettings,
    plant: &'a PlantSettings,
}

impl<'a> TerrainGenerator<'a> {
    /// Validates the settings and binds them to a layout.
    pub fn new(
        layout: GridLayout,
        terrain: &'a TerrainSettings,
        plant: &'a PlantSettings,
    ) -> Result<Self> {
        terrain.validate()?;
        plant.validate()?;
        Ok(Self {
            layout,
            terrain,
            plant,
        })
    }

    /// Generates a complete grid.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<WorldGrid> {
        let GridLayout {
            num_columns,
            num_rows,
            side_length,
            ..
        } = self.layout;
        let seedling = self.plant.lifecycle()?;

        let water = if rng.random::<f32>() < self.terrain.water_spawn_probability {
            self.carve_lakes(rng)
        } else {
            vec![false; self.layout.cell_count()]
        };

        let mut cells = Vec::with_capacity(self.layout.cell_count());
        for col in 0..num_columns {
            for row in 0..num_rows {
                let center = self.layout.center(col, row);
                let kind = if water[cell_index(col, row, num_rows)] {
                    CellKind::Water
                } else if rng.random::<f32>() < self.terrain.plant_spawn_probability {
                    CellKind::Plant(seedling.clone())
                } else {
                    CellKind::Ground
                };
                cells.push(HexCell::new(center, side_length, kind));
            }
        }

        let grid = WorldGrid::from_cells(cells, num_columns, num_rows)?;
        let census = grid.census();
        info!(
            "generated {num_columns}x{num_rows} world: {} lakes ({} water), {} plants, {} ground",
            water_regions(&grid).len(),
            census.water,
            census.plant_total(),
            census.ground
        );
        Ok(grid)
    }

    /// Grows lakes until the water budget or the attempt limit runs out.
    ///
    /// Returns a column-major mask of water cells. Every lake is connected,
    /// holds at least `lake_min_size` cells and never touches another lake;
    /// the total never exceeds `max_water_fraction` of the grid.
    pub fn carve_lakes<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        let total = self.layout.cell_count();
        let min_size = self.terrain.lake_min_size;
        let budget = (self.terrain.max_water_fraction * total as f32).floor() as usize;

        let mut water = vec![false; total];
        let mut water_count = 0;
        let mut pool: Vec<usize> = (0..total).collect();

        if budget < min_size {
            warn!(
                "water budget of {budget} cells is below the minimum lake size {min_size}; no lakes"
            );
            return water;
        }

        for _ in 0..self.terrain.max_lake_attempts {
            let remaining = budget - water_count;
            if remaining < min_size || pool.is_empty() {
                break;
            }
            let seed = pool.swap_remove(rng.random_range(0..pool.len()));
            let target = rng
                .random_range(min_size..=self.terrain.lake_max_size)
                .min(remaining);

            match self.grow_region(seed, target, &water, rng) {
                Growth::Grown(lake) => {
                    pool.retain(|i| !lake.contains(i));
                    for &i in &lake {
                        water[i] = true;
                    }
                    water_count += lake.len();
                }
                Growth::Discarded(examined) => {
                    debug!(
                        "lake attempt from cell {seed} discarded after {} cells",
                        examined.len()
                    );
                    pool.retain(|i| !examined.contains(i));
                }
            }
        }
        water
    }

    /// Randomly expands a connected group from `seed` towards `target` cells.
    fn grow_region<R: Rng>(
        &self,
        seed: usize,
        target: usize,
        water: &[bool],
        rng: &mut R,
    ) -> Growth {
        let (cols, rows) = (self.layout.num_columns, self.layout.num_rows);
        let touches_water =
            |i: usize| water[i] || neighbors(i, cols, rows).into_iter().any(|n| water[n]);

        if touches_water(seed) {
            return Growth::Discarded(vec![seed]);
        }

        let mut group = vec![seed];
        let max_tries = target * self.terrain.expansion_attempts_per_cell;
        for _ in 0..max_tries {
            if group.len() >= target {
                break;
            }
            let from = group[rng.random_range(0..group.len())];
            let around = neighbors(from, cols, rows);
            if around.is_empty() {
                break;
            }
            let next = around[rng.random_range(0..around.len())];
            if !group.contains(&next) && !touches_water(next) {
                group.push(next);
            }
        }

        if group.len() >= self.terrain.lake_min_size {
            Growth::Grown(group)
        } else {
            Growth::Discarded(group)
        }
    }
}

/// Connected groups of water cells, each in discovery order.
pub fn water_regions(grid: &WorldGrid) -> Vec<Vec<usize>> {
    let cells = grid.cells();
    let mut seen = vec![false; cells.len()];
    let mut regions = Vec::new();

    for start in 0..cells.len() {
        if seen[start] || !cells[start].kind().is_water() {
            continue;
        }
        seen[start] = true;
        let mut region = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(i) = queue.pop_front() {
            region.push(i);
            for n in grid.neighbors(i) {
                if !seen[n] && cells[n].kind().is_water() {
                    seen[n] = true;
                    queue.push_back(n);
                }
            }
        }
        regions.push(region);
    }
    regions
}
