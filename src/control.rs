//! Driver-side simulation controls: pause, help overlay, grid toggle and speed.

use bevy::prelude::*;

/// What the driver is doing with the simulation clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum ControlPhase {
    /// Time advances at `speed`.
    #[default]
    Running,
    /// Time is frozen.
    Paused,
    /// Help overlay shown; time is frozen and most controls are inert.
    Help,
}

/// A user command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Leave the application.
    Quit,
    /// Open or close the help overlay.
    ToggleHelp,
    /// Close the help overlay or resume from pause.
    Escape,
    /// Pause or resume.
    TogglePause,
    /// Show or hide the grid outline.
    ToggleGrid,
    /// Increase speed by one step.
    SpeedUp,
    /// Decrease speed by one step.
    SlowDown,
}

/// Simulation clock and display toggles.
#[derive(Resource, Clone, Debug, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SimulationControl {
    /// Current phase.
    pub phase: ControlPhase,
    /// Time multiplier, kept within [`Self::MIN_SPEED`]..=[`Self::MAX_SPEED`].
    pub speed: f32,
    /// Whether cell outlines are drawn.
    pub show_grid: bool,
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self {
            phase: ControlPhase::Running,
            speed: 1.0,
            show_grid: true,
        }
    }
}

impl SimulationControl {
    /// Slowest allowed speed.
    pub const MIN_SPEED: f32 = 0.1;
    /// Fastest allowed speed.
    pub const MAX_SPEED: f32 = 5.0;
    /// Speed change per step.
    pub const SPEED_STEP: f32 = 0.1;

    /// Key bindings for the help overlay, as `(keys, description)`.
    pub const CONTROLS: [(&'static str, &'static str); 7] = [
        ("P", "pause / resume"),
        ("G", "toggle grid"),
        ("+ / -", "speed up / slow down"),
        ("H", "toggle help"),
        ("Esc", "close help / resume"),
        ("Tab", "toggle inspector"),
        ("Q", "quit"),
    ];

    /// Applies `action`; returns `true` when the application should quit.
    pub fn apply(&mut self, action: ControlAction) -> bool {
        match (action, self.phase) {
            (ControlAction::Quit, _) => return true,
            (ControlAction::ToggleHelp, ControlPhase::Help) => self.phase = ControlPhase::Running,
            (ControlAction::ToggleHelp, _) => self.phase = ControlPhase::Help,
            (ControlAction::Escape, ControlPhase::Help | ControlPhase::Paused) => {
                self.phase = ControlPhase::Running;
            }
            (ControlAction::Escape, ControlPhase::Running) => {}
            (_, ControlPhase::Help) => {}
            (ControlAction::TogglePause, ControlPhase::Running) => {
                self.phase = ControlPhase::Paused;
            }
            (ControlAction::TogglePause, ControlPhase::Paused) => {
                self.phase = ControlPhase::Running;
            }
            (ControlAction::ToggleGrid, _) => self.show_grid = !self.show_grid,
            (ControlAction::SpeedUp, _) => self.adjust_speed(Self::SPEED_STEP),
            (ControlAction::SlowDown, _) => self.adjust_speed(-Self::SPEED_STEP),
        }
        false
    }

    /// Shifts `speed` by `delta`, clamped to the allowed range.
    pub fn adjust_speed(&mut self, delta: f32) {
        let stepped = ((self.speed + delta) * 10.0).round() / 10.0;
        self.speed = stepped.clamp(Self::MIN_SPEED, Self::MAX_SPEED);
    }

    /// Simulation time for a frame of `dt` seconds, or `None` unless running.
    pub fn scaled_delta(&self, dt: f32) -> Option<f32> {
        (self.phase == ControlPhase::Running).then(|| dt * self.speed)
    }

    /// True while the clock is frozen by pause or help.
    pub fn is_frozen(&self) -> bool {
        self.phase != ControlPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn defaults() {
        let c = SimulationControl::default();
        assert_eq!(c.phase, ControlPhase::Running);
        assert_eq!(c.speed, 1.0);
        assert!(c.show_grid);
    }

    // ── phase transitions ───────────────────────────────────────────

    #[test]
    fn pause_toggles_and_escape_resumes() {
        let mut c = SimulationControl::default();
        c.apply(ControlAction::TogglePause);
        assert_eq!(c.phase, ControlPhase::Paused);
        c.apply(ControlAction::TogglePause);
        assert_eq!(c.phase, ControlPhase::Running);
        c.apply(ControlAction::TogglePause);
        c.apply(ControlAction::Escape);
        assert_eq!(c.phase, ControlPhase::Running);
    }

    #[test]
    fn help_overrides_pause_and_freezes_controls() {
        let mut c = SimulationControl::default();
        c.apply(ControlAction::TogglePause);
        c.apply(ControlAction::ToggleHelp);
        assert_eq!(c.phase, ControlPhase::Help);

        for action in [
            ControlAction::TogglePause,
            ControlAction::ToggleGrid,
            ControlAction::SpeedUp,
            ControlAction::SlowDown,
        ] {
            assert!(!c.apply(action));
        }
        assert_eq!(c.phase, ControlPhase::Help);
        assert!(c.show_grid);
        assert_eq!(c.speed, 1.0);

        c.apply(ControlAction::Escape);
        assert_eq!(c.phase, ControlPhase::Running);
        c.apply(ControlAction::ToggleHelp);
        c.apply(ControlAction::ToggleHelp);
        assert_eq!(c.phase, ControlPhase::Running);
    }

    #[test]
    fn quit_works_in_every_phase() {
        for phase in [
            ControlPhase::Running,
            ControlPhase::Paused,
            ControlPhase::Help,
        ] {
            let mut c = SimulationControl {
                phase,
                ..default()
            };
            assert!(c.apply(ControlAction::Quit));
        }
    }

    #[test]
    fn grid_toggles_while_paused() {
        let mut c = SimulationControl::default();
        c.apply(ControlAction::TogglePause);
        c.apply(ControlAction::ToggleGrid);
        assert!(!c.show_grid);
    }

    // ── speed ───────────────────────────────────────────────────────

    #[test]
    fn speed_steps_and_clamps() {
        let mut c = SimulationControl::default();
        c.apply(ControlAction::SpeedUp);
        assert!((c.speed - 1.1).abs() < EPS);
        for _ in 0..100 {
            c.apply(ControlAction::SpeedUp);
        }
        assert_eq!(c.speed, SimulationControl::MAX_SPEED);
        for _ in 0..100 {
            c.apply(ControlAction::SlowDown);
        }
        assert!((c.speed - SimulationControl::MIN_SPEED).abs() < EPS);
    }

    #[test]
    fn scaled_delta_only_while_running() {
        let mut c = SimulationControl::default();
        c.adjust_speed(1.0);
        assert!((c.scaled_delta(0.5).unwrap() - 1.0).abs() < EPS);
        c.apply(ControlAction::TogglePause);
        assert_eq!(c.scaled_delta(0.5), None);
        assert!(c.is_frozen());
        c.apply(ControlAction::ToggleHelp);
        assert_eq!(c.scaled_delta(0.5), None);
    }
}
