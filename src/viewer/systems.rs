use std::f32::consts::FRAC_PI_4;

use bevy::app::AppExit;
use bevy::asset::RenderAssetUsages;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy_egui::egui;

use hex_life::math::{compute_normal, vertices_of};
use hex_life::{ControlAction, ControlPhase, PlantState, SimulationControl, WorldConfig, WorldGrid};

use super::entities::{CellFace, DetailDot, ViewerCamera};
use super::{ViewerConfig, palette, to_world};

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns a perspective camera looking straight down at the canvas.
///
/// Screen-up is world `-z`, so pixel rows run top to bottom as on a 2D canvas.
pub fn spawn_camera(mut commands: Commands, world: Res<WorldConfig>, cfg: Res<ViewerConfig>) {
    let fov = FRAC_PI_4;
    let half_height = world.grid.display_height / 2.0 * cfg.camera_margin;
    let distance = half_height / (fov / 2.0).tan();
    commands.spawn((
        Name::new("ViewerCamera"),
        Camera3d::default(),
        Tonemapping::None,
        Projection::Perspective(PerspectiveProjection {
            fov,
            far: distance * 2.0,
            ..default()
        }),
        Transform::from_xyz(0.0, distance, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        ViewerCamera,
    ));
}

/// Unit flat-topped hexagon on the ground plane, facing `+y`.
pub fn hex_face_mesh() -> Mesh {
    let corners: Vec<[f32; 3]> = vertices_of(Vec2::ZERO, 1.0)
        .iter()
        .map(|v| [v.x, 0.0, v.y])
        .collect();
    let p = |i: usize| Vec3::from(corners[i]);
    let normal = compute_normal(p(0), p(2), p(1)).to_array();
    let uvs: Vec<[f32; 2]> = corners
        .iter()
        .map(|c| [(c[0] + 1.0) / 2.0, (c[2] + 1.0) / 2.0])
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, corners)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![normal; 6])
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U16(vec![0, 2, 1, 0, 3, 2, 0, 4, 3, 0, 5, 4]))
}

/// Spawns one face and one detail dot per cell of the generated world.
pub fn spawn_cells(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    grid: Option<Res<WorldGrid>>,
    world: Res<WorldConfig>,
    cfg: Res<ViewerConfig>,
) {
    let Some(grid) = grid else {
        warn!("no world to display");
        return;
    };
    let canvas = Vec2::new(world.grid.display_width, world.grid.display_height);
    let side = grid.cell_side_length();
    let face_mesh = meshes.add(hex_face_mesh());
    let dot_mesh = meshes.add(Cylinder::new(1.0, 0.01));

    let root = commands
        .spawn((
            Name::new("HexWorld"),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    for (index, cell) in grid.cells().iter().enumerate() {
        let color = palette::cell_color(cell.kind());
        let face = commands
            .spawn((
                CellFace { index, color },
                Name::new(format!("Cell({index})")),
                Mesh3d(face_mesh.clone()),
                MeshMaterial3d(materials.add(unlit(color))),
                Transform::from_translation(to_world(cell.center(), canvas, 0.0))
                    .with_scale(Vec3::new(side, 1.0, side)),
            ))
            .id();

        let shown = cell.kind().plant_state().and_then(palette::detail_dot);
        let (dot_color, radius) = shown.unwrap_or((Color::NONE, 0.0));
        let dot = commands
            .spawn((
                DetailDot { index, shown },
                Name::new(format!("Dot({index})")),
                Mesh3d(dot_mesh.clone()),
                MeshMaterial3d(materials.add(unlit(dot_color))),
                Transform::from_translation(to_world(cell.center(), canvas, cfg.dot_lift))
                    .with_scale(dot_scale(radius * side)),
                if shown.is_some() {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                },
            ))
            .id();
        commands.entity(root).add_children(&[face, dot]);
    }
    info!("spawned visuals for {} cells", grid.cells().len());
}

fn unlit(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

fn dot_scale(radius: f32) -> Vec3 {
    Vec3::new(radius, 1.0, radius)
}

// ── Update: input ───────────────────────────────────────────────────

/// Control bound to `key`, if any.
pub fn action_for(key: KeyCode) -> Option<ControlAction> {
    match key {
        KeyCode::KeyQ => Some(ControlAction::Quit),
        KeyCode::KeyH => Some(ControlAction::ToggleHelp),
        KeyCode::Escape => Some(ControlAction::Escape),
        KeyCode::KeyP => Some(ControlAction::TogglePause),
        KeyCode::KeyG => Some(ControlAction::ToggleGrid),
        KeyCode::Equal | KeyCode::NumpadAdd => Some(ControlAction::SpeedUp),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(ControlAction::SlowDown),
        _ => None,
    }
}

/// Feeds key presses to [`SimulationControl`]; `Q` exits.
pub fn handle_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut control: ResMut<SimulationControl>,
    mut exit: MessageWriter<AppExit>,
) {
    for action in keys.get_just_pressed().filter_map(|&k| action_for(k)) {
        debug!("control: {action:?}");
        if control.apply(action) {
            exit.write(AppExit::Success);
        }
    }
}

// ── Update: visuals ─────────────────────────────────────────────────

/// Recolours faces whose cell changed colour since the last sync.
pub fn sync_faces(
    grid: Res<WorldGrid>,
    mut faces: Query<(&mut CellFace, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut face, mat_handle) in &mut faces {
        let Some(cell) = grid.cell(face.index) else {
            continue;
        };
        let color = palette::cell_color(cell.kind());
        if color == face.color {
            continue;
        }
        face.color = color;
        if let Some(mat) = materials.get_mut(&mat_handle.0) {
            mat.base_color = color;
        }
    }
}

/// Shows, hides, recolours and resizes detail dots to match plant states.
pub fn sync_dots(
    grid: Res<WorldGrid>,
    mut dots: Query<(
        &mut DetailDot,
        &MeshMaterial3d<StandardMaterial>,
        &mut Transform,
        &mut Visibility,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let side = grid.cell_side_length();
    for (mut dot, mat_handle, mut transform, mut visibility) in &mut dots {
        let Some(cell) = grid.cell(dot.index) else {
            continue;
        };
        let shown = cell.kind().plant_state().and_then(palette::detail_dot);
        if shown == dot.shown {
            continue;
        }
        dot.shown = shown;
        match shown {
            Some((color, radius)) => {
                *visibility = Visibility::Inherited;
                transform.scale = dot_scale(radius * side);
                if let Some(mat) = materials.get_mut(&mat_handle.0) {
                    mat.base_color = color;
                }
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Outlines every cell while the grid is shown.
pub fn draw_grid_lines(
    mut gizmos: Gizmos,
    grid: Res<WorldGrid>,
    control: Res<SimulationControl>,
    world: Res<WorldConfig>,
    cfg: Res<ViewerConfig>,
) {
    if !control.show_grid {
        return;
    }
    let canvas = Vec2::new(world.grid.display_width, world.grid.display_height);
    for cell in grid.cells() {
        let corners = cell.vertices();
        gizmos.linestrip(
            corners
                .iter()
                .chain(corners.first())
                .map(|&v| to_world(v, canvas, cfg.grid_lift)),
            palette::GRID_LINE,
        );
    }
}

// ── EGUI HUD ────────────────────────────────────────────────────────

/// Status line, census, and the pause and help overlays.
pub fn draw_hud(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    control: Res<SimulationControl>,
    grid: Option<Res<WorldGrid>>,
    cfg: Res<ViewerConfig>,
) {
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };
    let ctx = ctx.get_mut();
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("hex_life_hud"),
    ));
    let font = egui::FontId::proportional(cfg.hud_font_size);
    let line = cfg.hud_font_size * 1.4;
    let screen = ctx.screen_rect();

    let mut lines = vec![format!(
        "Speed: {:.1}x | Grid: {}",
        control.speed,
        if control.show_grid { "on" } else { "off" }
    )];
    if let Some(grid) = grid {
        let census = grid.census();
        lines.push(format!(
            "Ground {} | Water {} | Plants {}",
            census.ground,
            census.water,
            census.plant_total()
        ));
        lines.push(
            PlantState::ALL
                .iter()
                .map(|&s| format!("{} {}", s.label(), census.plants_in(s)))
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    for (i, text) in lines.into_iter().enumerate() {
        painter.text(
            egui::pos2(10.0, 10.0 + i as f32 * line),
            egui::Align2::LEFT_TOP,
            text,
            font.clone(),
            egui::Color32::WHITE,
        );
    }

    match control.phase {
        ControlPhase::Running => {}
        ControlPhase::Paused => {
            painter.text(
                screen.center(),
                egui::Align2::CENTER_CENTER,
                "PAUSED (P to resume)",
                egui::FontId::proportional(cfg.hud_font_size * 2.0),
                egui::Color32::WHITE,
            );
        }
        ControlPhase::Help => {
            painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(180));
            let top = screen.center().y - SimulationControl::CONTROLS.len() as f32 * line / 2.0;
            for (i, (keys, what)) in SimulationControl::CONTROLS.iter().enumerate() {
                painter.text(
                    egui::pos2(screen.center().x, top + i as f32 * line),
                    egui::Align2::CENTER_TOP,
                    format!("{keys:>6}  {what}"),
                    font.clone(),
                    egui::Color32::WHITE,
                );
            }
        }
    }
}
