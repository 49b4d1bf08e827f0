use bevy::prelude::*;
use rand::Rng;

use crate::math::vertices_of;
use crate::plant::{PlantLifecycle, PlantState, Transition};

/// What occupies a cell.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub enum CellKind {
    /// Bare soil; static.
    Ground,
    /// Part of a lake; static.
    Water,
    /// A living (or dead) plant with its own lifecycle.
    Plant(PlantLifecycle),
}

impl CellKind {
    /// The plant lifecycle, if this is a plant cell.
    pub fn plant(&self) -> Option<&PlantLifecycle> {
        match self {
            Self::Plant(lifecycle) => Some(lifecycle),
            Self::Ground | Self::Water => None,
        }
    }

    /// The plant state, if this is a plant cell.
    pub fn plant_state(&self) -> Option<PlantState> {
        self.plant().map(PlantLifecycle::state)
    }

    /// True for water cells.
    pub fn is_water(&self) -> bool {
        matches!(self, Self::Water)
    }

    /// True for ground cells.
    pub fn is_ground(&self) -> bool {
        matches!(self, Self::Ground)
    }
}

/// One hexagon of the world: fixed geometry plus a replaceable kind.
#[derive(Clone, Debug, PartialEq)]
pub struct HexCell {
    center: Vec2,
    side_length: f32,
    vertices: [Vec2; 6],
    kind: CellKind,
}

impl HexCell {
    /// Places a cell; vertices are derived once from `center` and `side_length`.
    pub fn new(center: Vec2, side_length: f32, kind: CellKind) -> Self {
        Self {
            center,
            side_length,
            vertices: vertices_of(center, side_length),
            kind,
        }
    }

    /// A ground cell.
    pub fn ground(center: Vec2, side_length: f32) -> Self {
        Self::new(center, side_length, CellKind::Ground)
    }

    /// A water cell.
    pub fn water(center: Vec2, side_length: f32) -> Self {
        Self::new(center, side_length, CellKind::Water)
    }

    /// A plant cell driven by `lifecycle`.
    pub fn plant(center: Vec2, side_length: f32, lifecycle: PlantLifecycle) -> Self {
        Self::new(center, side_length, CellKind::Plant(lifecycle))
    }

    /// Pixel center.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Side length in pixels.
    pub fn side_length(&self) -> f32 {
        self.side_length
    }

    /// Corners, rightmost first.
    pub fn vertices(&self) -> &[Vec2; 6] {
        &self.vertices
    }

    /// Current kind.
    pub fn kind(&self) -> &CellKind {
        &self.kind
    }

    /// Mutable access to the kind, e.g. to steer a plant's lifecycle.
    pub fn kind_mut(&mut self) -> &mut CellKind {
        &mut self.kind
    }

    /// Replaces the kind in place; geometry is untouched.
    pub fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    /// Advances a plant's lifecycle; ground and water never change.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<Transition> {
        match &mut self.kind {
            CellKind::Plant(lifecycle) => lifecycle.update(dt, rng),
            CellKind::Ground | CellKind::Water => None,
        }
    }
}
