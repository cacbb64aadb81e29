//! Headless session driver.
//!
//! Runs a scripted world through the full tick pipeline with a headless
//! sound backend: snapshot rebuild, every registered effect handler, sound
//! bookkeeping, and the diagnostics overlay. Events and a metrics report
//! are written when paths are given.

use crate::ambient::AmbientSoundHandler;
use crate::scenario::Scenario;
use anyhow::{Context, Result};
use mdsurround_audio::{HeadlessBackend, SoundEngine};
use mdsurround_aurora::AuroraEffectHandler;
use mdsurround_core::{RegistryKey, SimTick, SurroundConfig};
use mdsurround_environ::{EffectHandler, EffectManager, TickContext};
use mdsurround_hud::{
    BlockDescription, BlockInfoHelper, BlockInspector, DiagnosticsOverlay, DiagnosticsSink,
    DimensionTickTime, EnvironmentDiagnostics, ServerDataReport, SoundDiagnostics,
    INSPECTION_TOOL, INSPECTION_TOOL_COUNT,
};
use mdsurround_testkit::{
    EnvironmentMetrics, EventRecord, ExecutionMetrics, FlatWorld, JsonlSink, MetricsReport,
    MetricsReportBuilder, MetricsSink, SessionResult, SoundMetrics, TestPlayer,
};
use mdsurround_world::{BlockPos, Registries};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};

/// Scripted sounds last this long in the headless backend.
const HEADLESS_SOUND_TICKS: u32 = 60;
const SERVER_REPORT_INTERVAL: u64 = 20;
const DEFAULT_WORLD_SEED: u64 = 0x00d5_a11d;

pub struct SessionConfig {
    pub config: SurroundConfig,
    pub scenario: Option<PathBuf>,
    pub world_seed: Option<u64>,
    pub hardware_channels: Option<u32>,
    /// Stop early after this many ticks.
    pub max_ticks: Option<u64>,
    pub events: Option<PathBuf>,
    pub metrics: Option<PathBuf>,
    /// Show the debug overlay for the whole session.
    pub diagnostics: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            config: SurroundConfig::default(),
            scenario: None,
            world_seed: None,
            hardware_channels: Some(128),
            max_ticks: None,
            events: None,
            metrics: None,
            diagnostics: false,
        }
    }
}

/// What a finished session leaves behind.
#[derive(Debug)]
pub struct SessionSummary {
    pub report: MetricsReport,
    pub overlay_left: Vec<String>,
    pub overlay_right: Vec<String>,
    pub block_panel: Vec<String>,
    /// Ticks on which an aurora mesh was produced.
    pub aurora_frames: u64,
}

/// Lets the session keep a handle to a handler the manager also drives.
struct Shared<H> {
    name: &'static str,
    inner: Rc<RefCell<H>>,
}

impl<S, H: EffectHandler<S>> EffectHandler<S> for Shared<H> {
    fn name(&self) -> &str {
        self.name
    }

    fn process(&mut self, ctx: &TickContext<'_>, services: &mut S) -> Result<()> {
        self.inner.borrow_mut().process(ctx, services)
    }

    fn on_connect(&mut self) {
        EffectHandler::<S>::on_connect(&mut *self.inner.borrow_mut());
    }

    fn on_disconnect(&mut self) {
        EffectHandler::<S>::on_disconnect(&mut *self.inner.borrow_mut());
    }

    fn diagnostics(&self, ctx: &TickContext<'_>, services: &S, out: &mut Vec<String>) {
        self.inner.borrow().diagnostics(ctx, services, out);
    }
}

/// Targets the same grass block for the whole session.
struct FixedTarget;

impl BlockInspector for FixedTarget {
    fn targeted_block(&self) -> Option<BlockDescription> {
        Some(BlockDescription {
            pos: BlockPos::new(0, 63, 0),
            display_name: Some("Grass Block".into()),
            item_name: Some("minecraft:grass".into()),
            block_name: "minecraft:grass".into(),
            material: "GRASS".into(),
            footstep_acoustics: vec!["grass".into()],
            step_sounds: vec!["dsurround:crunch".into()],
            step_sound_chance: 40,
            dictionary_names: vec!["grass".into()],
            ..BlockDescription::default()
        })
    }
}

#[derive(Default)]
struct Tracked {
    biome: String,
    in_battle: bool,
    inside: bool,
    aurora: bool,
    battle_ticks: u64,
    inside_ticks: u64,
    biomes: BTreeSet<String>,
}

pub fn run(cfg: SessionConfig) -> Result<SessionSummary> {
    let started = Instant::now();
    let mut config = cfg.config;
    if cfg.diagnostics {
        config.enable_debug_logging = true;
    }
    let seed = cfg.world_seed.unwrap_or(DEFAULT_WORLD_SEED);

    let mut scenario = match &cfg.scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::builtin(),
    };
    let total = cfg
        .max_ticks
        .map_or(scenario.total_ticks(), |max| max.min(scenario.total_ticks()));

    let backend = HeadlessBackend::new(cfg.hardware_channels).with_sound_length(HEADLESS_SOUND_TICKS);
    let mut engine = SoundEngine::new(Box::new(backend), &config);

    let aurora = Rc::new(RefCell::new(AuroraEffectHandler::new(seed)));
    let block_info = Rc::new(RefCell::new(BlockInfoHelper::new(Box::new(FixedTarget))));

    let registries = Registries::vanilla(config.season_length_days);
    let mut manager: EffectManager<SoundEngine> = EffectManager::new(config, registries);
    manager.register(Box::new(EnvironmentDiagnostics));
    manager.register(Box::new(SoundDiagnostics));
    manager.register(Box::new(AmbientSoundHandler::new(seed)));
    manager.register(Box::new(Shared {
        name: "aurora",
        inner: Rc::clone(&aurora),
    }));
    manager.register(Box::new(Shared {
        name: "block-info",
        inner: Rc::clone(&block_info),
    }));

    let mut events = cfg.events.as_ref().map(JsonlSink::create).transpose()?;
    let mut emit = |tick: u64, kind: &str, payload: &str| -> Result<()> {
        if let Some(sink) = events.as_mut() {
            sink.write(&EventRecord {
                tick: SimTick(tick),
                kind,
                payload,
            })?;
        }
        Ok(())
    };

    let mut world = FlatWorld::new();
    world.settings.show_debug_info = cfg.diagnostics;
    let mut player = TestPlayer::new();
    player.creative = true;
    player.held_item = RegistryKey::parse(INSPECTION_TOOL)
        .ok()
        .map(|key| (key, INSPECTION_TOOL_COUNT));

    manager.connect();
    manager.on_player_join(&world, &player);
    info!(
        handlers = ?manager.handler_names(),
        ticks = total,
        seed,
        "Session started"
    );
    emit(0, "session_start", &format!("ticks={total} seed={seed}"))?;

    let mut overlay = DiagnosticsOverlay::new();
    let mut tracked = Tracked::default();
    let mut aurora_frames = 0;
    let mut tick_time_total = 0.0;
    let mut ticks = 0;

    while ticks < total && scenario.advance(&mut world, &mut player) {
        ticks += 1;
        let tick_started = Instant::now();
        manager.tick(&world, &player, &mut engine);
        engine.update();
        tick_time_total += tick_started.elapsed().as_secs_f64() * 1000.0;

        match manager.diagnostics() {
            Some(lines) => overlay.accept(lines),
            None => overlay.clear_diagnostics(),
        }
        if ticks % SERVER_REPORT_INTERVAL == 0 {
            let mean_tick_ms = tick_time_total / ticks as f64;
            let report = ServerDataReport {
                total_mb: 0,
                free_mb: 0,
                max_mb: 0,
                mean_tick_ms,
                dimensions: vec![DimensionTickTime {
                    dimension: world.dimension_id,
                    name: world.dimension_name.clone(),
                    mean_tick_ms,
                }],
            };
            overlay.set_server_report(report.lines());
        }

        if aurora.borrow_mut().render(&player, 0.0).is_some() {
            aurora_frames += 1;
        }

        let snapshot = manager.snapshot();
        let biome = snapshot.biome_name().to_string();
        if biome != tracked.biome {
            emit(ticks, "biome", &biome)?;
            tracked.biomes.insert(biome.clone());
            tracked.biome = biome;
        }
        let in_battle = snapshot.battle().in_battle();
        if in_battle != tracked.in_battle {
            let kind = if in_battle { "battle_start" } else { "battle_end" };
            emit(ticks, kind, &format!("{:?}", snapshot.battle().intensity()))?;
            tracked.in_battle = in_battle;
        }
        if snapshot.is_inside() != tracked.inside {
            tracked.inside = snapshot.is_inside();
            emit(ticks, "inside", &tracked.inside.to_string())?;
        }
        let has_aurora = aurora.borrow().current().is_some();
        if has_aurora != tracked.aurora {
            let kind = if has_aurora { "aurora_spawn" } else { "aurora_gone" };
            emit(ticks, kind, &manager.snapshot().clock().to_string())?;
            tracked.aurora = has_aurora;
        }
        if in_battle {
            tracked.battle_ticks += 1;
        }
        if tracked.inside {
            tracked.inside_ticks += 1;
        }
    }

    let block_panel = block_info.borrow().panel().lines().to_vec();
    let environment = EnvironmentMetrics {
        ticks,
        tick_counter: manager.snapshot().tick_counter(),
        battle_ticks: tracked.battle_ticks,
        inside_ticks: tracked.inside_ticks,
        biomes_seen: tracked.biomes.len(),
    };
    let stats = *engine.stats();
    let sound = SoundMetrics {
        requested: stats.requested,
        admitted: stats.admitted,
        rejected_no_room: stats.rejected_no_room,
        rejected_backend: stats.rejected_backend,
        normal_channels: engine.budget().normal,
        peak_live: stats.peak_live,
    };

    let overlay_left = overlay.left();
    let overlay_right = overlay.right();

    engine.stop_all_sounds();
    manager.disconnect();
    emit(ticks, "session_end", &format!("admitted={}", stats.admitted))?;
    if let Some(sink) = events.as_mut() {
        sink.flush()?;
        info!(events = sink.events_written(), "Event log written");
    }

    let report = MetricsReportBuilder::new(format!("session-{seed}"))
        .result(SessionResult::Pass)
        .environment(environment)
        .sound(sound)
        .execution(ExecutionMetrics {
            duration_seconds: started.elapsed().as_secs_f64(),
        })
        .build();
    if let Some(path) = &cfg.metrics {
        if let Err(err) = MetricsSink::create(path).and_then(|sink| sink.write(&report)) {
            warn!(%err, path = %path.display(), "Failed to write metrics report");
        }
    }
    info!(ticks, aurora_frames, "Session finished");

    Ok(SessionSummary {
        report,
        overlay_left,
        overlay_right,
        block_panel,
        aurora_frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_session_exercises_every_handler() {
        let summary = run(SessionConfig {
            config: SurroundConfig {
                enable_battle_music: true,
                ..SurroundConfig::default()
            },
            diagnostics: true,
            ..SessionConfig::default()
        })
        .unwrap();
        let env = summary.report.environment.as_ref().unwrap();
        assert_eq!(env.ticks, Scenario::builtin().total_ticks());
        // The join rebuild counts once; the final paused step not at all.
        assert_eq!(env.tick_counter, env.ticks - 20 + 1);
        assert!(env.battle_ticks >= 60);
        assert!(env.inside_ticks >= 100);
        assert!(env.biomes_seen >= 3);

        let sound = summary.report.sound.as_ref().unwrap();
        assert!(sound.admitted > 0);
        assert_eq!(sound.rejected_backend, 0);
        assert!(summary.aurora_frames > 0);

        assert_eq!(summary.overlay_left.first().map(String::as_str), Some(""));
        assert!(summary.overlay_left.iter().any(|l| l.starts_with("SoundSystem:")));
        assert!(summary.overlay_left.iter().any(|l| l.starts_with("Aurora:")));
        assert!(summary.overlay_right.iter().any(|l| l.contains("Server Information")));
        assert!(summary.block_panel.iter().any(|l| l.contains("<Footstep Accoustics>")));
    }

    #[test]
    fn overlay_stays_empty_without_diagnostics() {
        let summary = run(SessionConfig {
            max_ticks: Some(40),
            ..SessionConfig::default()
        })
        .unwrap();
        assert!(summary.overlay_left.is_empty());
        assert_eq!(summary.report.environment.unwrap().ticks, 40);
    }
}
