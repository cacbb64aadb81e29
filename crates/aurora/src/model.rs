//! Aurora band model.

use mdsurround_core::{scoped_rng, SimTick};
use rand::Rng;
use std::f32::consts::TAU;
use std::fmt;

const AURORA_SALT: u64 = 0xA0B0_5A17;
const ALPHA_STEP: u32 = 2;
const MAX_ALPHA_RANGE: (u32, u32) = (96, 160);
const NODE_COUNT_RANGE: (usize, usize) = (48, 96);
const NODE_SPACING: f32 = 8.0;
const BAND_WIDTH: f32 = 6.0;
const BASE_HEIGHT: f32 = 12.0;

/// Base and fade colour pairs, RGB in [0, 1].
pub const AURORA_PALETTE: [([f32; 3], [f32; 3]); 4] = [
    ([0.26, 1.0, 0.52], [0.1, 0.35, 1.0]),
    ([0.0, 0.9, 0.65], [0.55, 0.15, 0.9]),
    ([0.55, 1.0, 0.3], [0.1, 0.8, 0.9]),
    ([0.9, 0.3, 0.5], [0.3, 0.2, 1.0]),
];

/// Lifecycle of an aurora.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuroraState {
    FadingIn,
    Steady,
    FadingOut,
    /// Fully faded out; the handler drops it.
    Complete,
}

/// One point along the band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuroraNode {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    /// Heading of the band at this node, radians.
    pub angle: f32,
    /// Front edge.
    pub tet_x: f32,
    pub tet_z: f32,
    /// Back edge.
    pub tet_x2: f32,
    pub tet_z2: f32,
    sway: f32,
    phase: f32,
}

impl AuroraNode {
    fn new(pos_x: f32, pos_y: f32, pos_z: f32, angle: f32, sway: f32) -> Self {
        let mut node = Self {
            pos_x,
            pos_y,
            pos_z,
            angle,
            tet_x: 0.0,
            tet_z: 0.0,
            tet_x2: 0.0,
            tet_z2: 0.0,
            sway,
            phase: 0.0,
        };
        node.place_edges();
        node
    }

    /// Height after the ripple is applied.
    pub fn modded_y(&self) -> f32 {
        self.pos_y * (0.75 + 0.25 * self.phase.cos())
    }

    /// Depth after sway is applied.
    pub fn modded_z(&self) -> f32 {
        self.pos_z + self.sway * self.phase.sin()
    }

    fn place_edges(&mut self) {
        let (sin, cos) = (self.angle + TAU / 4.0).sin_cos();
        let z = self.modded_z();
        self.tet_x = self.pos_x + cos * BAND_WIDTH;
        self.tet_z = z + sin * BAND_WIDTH;
        self.tet_x2 = self.pos_x - cos * BAND_WIDTH;
        self.tet_z2 = z - sin * BAND_WIDTH;
    }
}

/// An animated band of light.
#[derive(Debug, Clone)]
pub struct Aurora {
    seed: u64,
    nodes: Vec<AuroraNode>,
    base_color: [f32; 3],
    fade_color: [f32; 3],
    alpha: u32,
    max_alpha: u32,
    state: AuroraState,
    cycle: u64,
    speed: f32,
}

impl Aurora {
    /// Deterministic aurora for `seed` on night `day`.
    pub fn new(seed: u64, day: u64) -> Self {
        let mut rng = scoped_rng(seed, AURORA_SALT, SimTick(day));
        let count = rng.gen_range(NODE_COUNT_RANGE.0..=NODE_COUNT_RANGE.1);
        let (base_color, fade_color) = AURORA_PALETTE[rng.gen_range(0..AURORA_PALETTE.len())];
        let max_alpha = rng.gen_range(MAX_ALPHA_RANGE.0..=MAX_ALPHA_RANGE.1);
        let speed = rng.gen_range(0.02..0.08);

        let mut angle: f32 = rng.gen_range(-0.4..0.4);
        let mut x = -(count as f32) * NODE_SPACING / 2.0;
        let mut z = 0.0f32;
        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            angle += rng.gen_range(-0.15..0.15);
            x += angle.cos() * NODE_SPACING;
            z += angle.sin() * NODE_SPACING;
            let height = BASE_HEIGHT * rng.gen_range(0.6..1.0);
            let sway = rng.gen_range(0.5..2.0);
            nodes.push(AuroraNode::new(x, height, z, angle, sway));
        }

        Self {
            seed,
            nodes,
            base_color,
            fade_color,
            alpha: 0,
            max_alpha,
            state: AuroraState::FadingIn,
            cycle: 0,
            speed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn nodes(&self) -> &[AuroraNode] {
        &self.nodes
    }

    pub fn base_color(&self) -> [f32; 3] {
        self.base_color
    }

    pub fn fade_color(&self) -> [f32; 3] {
        self.fade_color
    }

    pub fn state(&self) -> AuroraState {
        self.state
    }

    /// Opacity in [0, 1].
    pub fn alpha(&self) -> f32 {
        self.alpha as f32 / 255.0
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, AuroraState::FadingOut | AuroraState::Complete)
    }

    pub fn is_complete(&self) -> bool {
        self.state == AuroraState::Complete
    }

    /// Begin fading out.
    pub fn die(&mut self) {
        if !self.is_dying() {
            self.state = AuroraState::FadingOut;
        }
    }

    /// Advance fade state by one tick.
    pub fn update(&mut self) {
        self.cycle += 1;
        match self.state {
            AuroraState::FadingIn => {
                self.alpha = (self.alpha + ALPHA_STEP).min(self.max_alpha);
                if self.alpha >= self.max_alpha {
                    self.state = AuroraState::Steady;
                }
            }
            AuroraState::FadingOut => {
                self.alpha = self.alpha.saturating_sub(ALPHA_STEP);
                if self.alpha == 0 {
                    self.state = AuroraState::Complete;
                }
            }
            AuroraState::Steady | AuroraState::Complete => {}
        }
    }

    /// Move the ripple to its position at `partial_tick` into the current tick.
    pub fn translate(&mut self, partial_tick: f32) {
        let t = (self.cycle as f32 + partial_tick) * self.speed;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.phase = t + i as f32 * 0.3;
            node.place_edges();
        }
    }
}

impl fmt::Display for Aurora {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}> nodes: {}, alpha: {}/{}, {:?}",
            self.seed,
            self.nodes.len(),
            self.alpha,
            self.max_alpha,
            self.state
        )
    }
}
