//! Aurora lifecycle driven by the environment snapshot.

use crate::model::Aurora;
use crate::renderer::{AuroraMesh, AuroraRenderer};
use anyhow::Result;
use mdsurround_environ::{EffectHandler, TickContext};
use mdsurround_world::PlayerView;
use tracing::debug;

/// Spawns an aurora on cold nights in eligible dimensions and fades it out
/// when conditions no longer hold.
#[derive(Debug)]
pub struct AuroraEffectHandler {
    seed: u64,
    current: Option<Aurora>,
    renderer: AuroraRenderer,
    sea_level: i32,
}

impl AuroraEffectHandler {
    /// `seed` makes each night's aurora reproducible per world.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            current: None,
            renderer: AuroraRenderer::new(8),
            sea_level: 63,
        }
    }

    pub fn current(&self) -> Option<&Aurora> {
        self.current.as_ref()
    }

    fn eligible(ctx: &TickContext<'_>) -> bool {
        let snapshot = ctx.snapshot;
        ctx.config.enable_auroras
            && snapshot.dimension_info().has_auroras
            && snapshot.clock().is_night()
            && snapshot.is_freezing()
    }

    /// Frame geometry for the current aurora, if one is visible.
    pub fn render(&mut self, player: &dyn PlayerView, partial_tick: f32) -> Option<AuroraMesh> {
        let aurora = self.current.as_mut()?;
        self.renderer.build(
            aurora,
            self.sea_level,
            player.position(),
            player.last_tick_position(),
            partial_tick,
        )
    }
}

impl<S> EffectHandler<S> for AuroraEffectHandler {
    fn name(&self) -> &str {
        "aurora"
    }

    fn process(&mut self, ctx: &TickContext<'_>, _services: &mut S) -> Result<()> {
        self.renderer.render_distance_chunks = ctx.world.client_settings().render_distance_chunks;
        self.sea_level = ctx.snapshot.dimension_info().sea_level;

        let eligible = Self::eligible(ctx);
        match self.current.as_mut() {
            None if eligible => {
                let aurora = Aurora::new(self.seed, ctx.snapshot.clock().day());
                debug!(%aurora, "Aurora spawned");
                self.current = Some(aurora);
            }
            Some(aurora) if !eligible && !aurora.is_dying() => {
                debug!(%aurora, "Aurora fading out");
                aurora.die();
            }
            _ => {}
        }

        if let Some(aurora) = self.current.as_mut() {
            aurora.update();
            if aurora.is_complete() {
                debug!("Aurora complete");
                self.current = None;
            }
        }
        Ok(())
    }

    fn on_disconnect(&mut self) {
        self.current = None;
    }

    fn diagnostics(&self, _ctx: &TickContext<'_>, _services: &S, out: &mut Vec<String>) {
        match &self.current {
            Some(aurora) => out.push(format!("Aurora: {aurora}")),
            None => out.push("Aurora: NONE".to_string()),
        }
    }
}
