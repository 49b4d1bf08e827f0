use bevy::prelude::*;
use rand::Rng;

use super::cell::{CellKind, HexCell};
use crate::adjacency;
use crate::error::{Result, SimError};
use crate::math::Bounds;
use crate::plant::PlantState;

/// Outcome of one [`WorldGrid::update`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Lifecycle transitions applied this tick.
    pub transitions: usize,
    /// Cells that reverted from dead plant to ground, in storage order.
    pub converted: Vec<usize>,
}

/// Cell counts by kind and plant state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    /// Ground cells.
    pub ground: usize,
    /// Water cells.
    pub water: usize,
    /// Plant cells per state, indexed by [`PlantState::ordinal`].
    pub plants: [usize; 6],
}

impl Census {
    /// Plant cells in `state`.
    pub fn plants_in(&self, state: PlantState) -> usize {
        self.plants[state.ordinal()]
    }

    /// Plant cells in any state.
    pub fn plant_total(&self) -> usize {
        self.plants.iter().sum()
    }

    /// All cells.
    pub fn total(&self) -> usize {
        self.ground + self.water + self.plant_total()
    }

    /// Share of cells that are water.
    pub fn water_fraction(&self) -> f32 {
        match self.total() {
            0 => 0.0,
            total => self.water as f32 / total as f32,
        }
    }
}

/// The whole world: cells in column-major order plus grid geometry.
#[derive(Resource, Clone, Debug)]
pub struct WorldGrid {
    cells: Vec<HexCell>,
    num_columns: usize,
    num_rows: usize,
    cell_side_length: f32,
    grid_bounds: Bounds,
}

impl WorldGrid {
    /// Assembles a grid whose bounds enclose every cell vertex.
    pub fn from_cells(cells: Vec<HexCell>, num_columns: usize, num_rows: usize) -> Result<Self> {
        let bounds = Bounds::enclosing(cells.iter().flat_map(|c| c.vertices().iter().copied()))
            .ok_or(SimError::InvalidConfiguration {
                field: "cells",
                value: 0.0,
                reason: "a grid needs at least one cell",
            })?;
        Self::from_parts(cells, num_columns, num_rows, bounds)
    }

    /// Assembles a grid with explicit pixel bounds.
    ///
    /// `cells` must hold exactly `num_columns × num_rows` cells in column-major
    /// order, all sharing one side length.
    pub fn from_parts(
        cells: Vec<HexCell>,
        num_columns: usize,
        num_rows: usize,
        grid_bounds: Bounds,
    ) -> Result<Self> {
        if cells.is_empty() || cells.len() != num_columns * num_rows {
            return Err(SimError::InvalidConfiguration {
                field: "cells",
                value: cells.len() as f64,
                reason: "must hold num_columns × num_rows cells",
            });
        }
        let cell_side_length = cells[0].side_length();
        Ok(Self {
            cells,
            num_columns,
            num_rows,
            cell_side_length,
            grid_bounds,
        })
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// Cell at storage `index`.
    pub fn cell(&self, index: usize) -> Option<&HexCell> {
        self.cells.get(index)
    }

    /// Mutable cell at storage `index`.
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut HexCell> {
        self.cells.get_mut(index)
    }

    /// Cell at logical `(col, row)`.
    pub fn cell_at(&self, col: usize, row: usize) -> Option<&HexCell> {
        if col >= self.num_columns || row >= self.num_rows {
            return None;
        }
        self.cell(adjacency::cell_index(col, row, self.num_rows))
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Side length shared by every cell.
    pub fn cell_side_length(&self) -> f32 {
        self.cell_side_length
    }

    /// Pixel bounds of the grid.
    pub fn grid_bounds(&self) -> Bounds {
        self.grid_bounds
    }

    /// In-bounds neighbours of `index`.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        adjacency::neighbors(index, self.num_columns, self.num_rows)
    }

    /// Whether `(x, y)` lies within the grid bounds grown by half a side.
    pub fn is_position_valid(&self, x: f32, y: f32) -> bool {
        self.grid_bounds
            .expanded(self.cell_side_length / 2.0)
            .contains(Vec2::new(x, y))
    }

    /// Counts cells by kind and plant state.
    pub fn census(&self) -> Census {
        self.cells
            .iter()
            .fold(Census::default(), |mut census, cell| {
                match cell.kind() {
                    CellKind::Ground => census.ground += 1,
                    CellKind::Water => census.water += 1,
                    CellKind::Plant(p) => census.plants[p.state().ordinal()] += 1,
                }
                census
            })
    }

    /// Advances every plant by `dt`, then reverts all dead plants to ground.
    ///
    /// The reversion is all-or-nothing: if any dead plant's center fails
    /// [`WorldGrid::is_position_valid`], no cell is converted and the first
    /// offender is reported. Lifecycle progress made this tick is kept either way.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Result<TickReport> {
        let transitions = self
            .cells
            .iter_mut()
            .filter_map(|cell| cell.update(dt, rng))
            .count();

        let dead: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.kind().plant_state() == Some(PlantState::Dead))
            .map(|(i, _)| i)
            .collect();

        if let Some(&index) = dead.iter().find(|&&i| {
            let c = self.cells[i].center();
            !self.is_position_valid(c.x, c.y)
        }) {
            return Err(SimError::OutOfBoundsConversion {
                index,
                position: self.cells[index].center(),
                bounds: self.grid_bounds,
            });
        }

        for &i in &dead {
            self.cells[i].set_kind(CellKind::Ground);
        }

        if transitions > 0 || !dead.is_empty() {
            debug!(
                "tick dt={dt:.3}: {transitions} transitions, {} plants returned to ground",
                dead.len()
            );
        }

        Ok(TickReport {
            transitions,
            converted: dead,
        })
    }
}
