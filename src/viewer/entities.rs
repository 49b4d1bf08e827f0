use bevy::prelude::*;

/// Hex face of the cell at storage `index`.
#[derive(Component, Reflect)]
pub struct CellFace {
    /// Storage index into the world grid.
    pub index: usize,
    /// Colour last written to this face's material.
    pub color: Color,
}

/// State marker dot drawn on top of the cell at storage `index`.
#[derive(Component, Reflect)]
pub struct DetailDot {
    /// Storage index into the world grid.
    pub index: usize,
    /// Colour and radius fraction last applied; `None` while hidden.
    pub shown: Option<(Color, f32)>,
}

/// Marker for the top-down viewer camera.
#[derive(Component, Reflect)]
pub struct ViewerCamera;
