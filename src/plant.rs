//! Plant lifecycle: a timed state machine with two coin flips.
//!
//! `Seed → Growing → Mature → (Flowering) → Dying → Dead`. A seed may fail and
//! go straight to `Dying`; a mature plant gets exactly one chance to flower per
//! mature episode. `Dead` is absorbing and signals the owning grid to revert
//! the cell to ground.

use bevy::prelude::*;
use rand::Rng;

use crate::error::{Result, check_probability};

/// Discrete lifecycle state, in progression order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum PlantState {
    /// Freshly placed; waits for the survival roll.
    #[default]
    Seed,
    /// Growth ramps from 0 to 1.
    Growing,
    /// Fully grown; may flower once.
    Mature,
    /// Optional blooming episode before dying.
    Flowering,
    /// Health decays to zero.
    Dying,
    /// Terminal.
    Dead,
}

impl PlantState {
    /// Every state, in progression order.
    pub const ALL: [PlantState; 6] = [
        PlantState::Seed,
        PlantState::Growing,
        PlantState::Mature,
        PlantState::Flowering,
        PlantState::Dying,
        PlantState::Dead,
    ];

    /// Position in [`PlantState::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Growing => "growing",
            Self::Mature => "mature",
            Self::Flowering => "flowering",
            Self::Dying => "dying",
            Self::Dead => "dead",
        }
    }
}

/// State durations, in seconds of simulation time.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct LifecycleTimings {
    /// Time a seed waits before its survival roll.
    pub seed_duration: f32,
    /// Time to go from zero growth to fully grown.
    pub growth_threshold: f32,
    /// Longest a plant stays mature without flowering.
    pub mature_max_time: f32,
    /// Length of a flowering episode.
    pub flowering_duration: f32,
    /// Time for health to drain from 1 to 0.
    pub dying_duration: f32,
}

impl LifecycleTimings {
    /// Fraction of `mature_max_time` at which the flowering roll happens.
    pub const FLOWERING_CHECK_FRACTION: f32 = 0.75;

    /// Mature time at which the flowering roll happens.
    pub fn flowering_check_time(&self) -> f32 {
        self.mature_max_time * Self::FLOWERING_CHECK_FRACTION
    }
}

impl Default for LifecycleTimings {
    fn default() -> Self {
        Self {
            seed_duration: 2.0,
            growth_threshold: 3.0,
            mature_max_time: 5.0,
            flowering_duration: 5.0,
            dying_duration: 8.0,
        }
    }
}

/// A state change reported by [`PlantLifecycle::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State before the update.
    pub from: PlantState,
    /// State after the update.
    pub to: PlantState,
}

/// Per-plant lifecycle state, owned by a plant cell.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct PlantLifecycle {
    state: PlantState,
    time_in_state: f32,
    health: f32,
    growth: f32,
    seed_survival_probability: f32,
    flowering_probability: f32,
    flowering_checked: bool,
    timings: LifecycleTimings,
}

impl Default for PlantLifecycle {
    fn default() -> Self {
        Self::new(LifecycleTimings::default())
    }
}

impl PlantLifecycle {
    /// Default seed survival chance.
    pub const DEFAULT_SEED_SURVIVAL: f32 = 0.7;
    /// Default flowering chance.
    pub const DEFAULT_FLOWERING: f32 = 0.3;

    /// A fresh seed with default probabilities.
    pub fn new(timings: LifecycleTimings) -> Self {
        Self {
            state: PlantState::Seed,
            time_in_state: 0.0,
            health: 1.0,
            growth: 0.0,
            seed_survival_probability: Self::DEFAULT_SEED_SURVIVAL,
            flowering_probability: Self::DEFAULT_FLOWERING,
            flowering_checked: false,
            timings,
        }
    }

    /// A fresh seed with the given probabilities, both validated.
    pub fn with_probabilities(
        timings: LifecycleTimings,
        seed_survival_probability: f32,
        flowering_probability: f32,
    ) -> Result<Self> {
        let mut lifecycle = Self::new(timings);
        lifecycle.set_seed_survival_probability(seed_survival_probability)?;
        lifecycle.set_flowering_probability(flowering_probability)?;
        Ok(lifecycle)
    }

    /// Current state.
    pub fn state(&self) -> PlantState {
        self.state
    }

    /// Seconds since the last transition.
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Health in `[0, 1]`; drains while dying.
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Growth in `[0, 1]`; ramps while growing.
    pub fn growth(&self) -> f32 {
        self.growth
    }

    /// Whether this mature episode already had its flowering roll.
    pub fn flowering_checked(&self) -> bool {
        self.flowering_checked
    }

    /// Chance a seed becomes a growing plant.
    pub fn seed_survival_probability(&self) -> f32 {
        self.seed_survival_probability
    }

    /// Chance a mature plant flowers.
    pub fn flowering_probability(&self) -> f32 {
        self.flowering_probability
    }

    /// Durations driving this plant.
    pub fn timings(&self) -> &LifecycleTimings {
        &self.timings
    }

    /// Sets the seed survival chance; values outside `[0, 1]` are rejected and
    /// the previous value is kept.
    pub fn set_seed_survival_probability(&mut self, p: f32) -> Result<()> {
        self.seed_survival_probability = check_probability("seed_survival_probability", p)?;
        Ok(())
    }

    /// Sets the flowering chance; values outside `[0, 1]` are rejected and the
    /// previous value is kept.
    pub fn set_flowering_probability(&mut self, p: f32) -> Result<()> {
        self.flowering_probability = check_probability("flowering_probability", p)?;
        Ok(())
    }

    /// True once the plant has died.
    pub fn is_dead(&self) -> bool {
        self.state == PlantState::Dead
    }

    /// Colour interpolation factor for renderers: 0 is bare soil, 1 is full green.
    pub fn color_factor(&self) -> f32 {
        match self.state {
            PlantState::Seed | PlantState::Dead => 0.0,
            PlantState::Growing => self.growth,
            PlantState::Mature | PlantState::Flowering => 1.0,
            PlantState::Dying => self.health,
        }
    }

    /// Advances the clock by `dt` and applies at most one transition.
    ///
    /// Within `Mature`, the one-shot flowering roll takes precedence: an update
    /// that performs the roll never also starts dying, even if `dt` jumps past
    /// `mature_max_time`.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<Transition> {
        self.time_in_state += dt;
        let t = self.time_in_state;
        let timings = self.timings;

        let next = match self.state {
            PlantState::Seed if t >= timings.seed_duration => {
                if rng.random::<f32>() < self.seed_survival_probability {
                    Some(PlantState::Growing)
                } else {
                    Some(PlantState::Dying)
                }
            }
            PlantState::Seed => None,
            PlantState::Growing => {
                self.growth = (t / timings.growth_threshold).min(1.0);
                (self.growth >= 1.0).then_some(PlantState::Mature)
            }
            PlantState::Mature
                if !self.flowering_checked && t >= timings.flowering_check_time() =>
            {
                self.flowering_checked = true;
                (rng.random::<f32>() < self.flowering_probability)
                    .then_some(PlantState::Flowering)
            }
            PlantState::Mature => (t >= timings.mature_max_time).then_some(PlantState::Dying),
            PlantState::Flowering => {
                (t >= timings.flowering_duration).then_some(PlantState::Dying)
            }
            PlantState::Dying => {
                self.health = (1.0 - t / timings.dying_duration).max(0.0);
                (self.health <= 0.0).then_some(PlantState::Dead)
            }
            PlantState::Dead => None,
        };

        next.map(|to| self.enter(to))
    }

    fn enter(&mut self, to: PlantState) -> Transition {
        let from = self.state;
        self.state = to;
        self.time_in_state = 0.0;
        if to == PlantState::Mature {
            self.flowering_checked = false;
        }
        Transition { from, to }
    }

    /// Jumps straight to `state`, resetting the clock.
    ///
    /// For callers that seed a grid mid-lifecycle or cull plants externally;
    /// the regular path is [`PlantLifecycle::update`].
    pub fn force_state(&mut self, state: PlantState) {
        self.enter(state);
        match state {
            PlantState::Seed => {
                self.growth = 0.0;
                self.health = 1.0;
            }
            PlantState::Mature | PlantState::Flowering => self.growth = 1.0,
            PlantState::Dead => self.health = 0.0,
            PlantState::Growing | PlantState::Dying => {}
        }
    }
}
