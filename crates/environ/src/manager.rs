//! Tick dispatch.
//!
//! The [`EffectManager`] owns the session's [`EnvironmentSnapshot`] and an
//! ordered list of [`EffectHandler`]s. Each world tick it rebuilds the
//! snapshot first, then runs every handler in registration order, so a
//! handler never sees a half-built snapshot.
//!
//! `S` is whatever shared services handlers need mutable access to during a
//! tick (the sound engine, for instance). Sessions without any use `()`.

use crate::snapshot::EnvironmentSnapshot;
use crate::status::PlayerStatus;
use anyhow::Result;
use mdsurround_core::SurroundConfig;
use mdsurround_world::{PlayerView, Registries, WorldView};
use tracing::{debug, warn};

/// Everything a handler can read during a tick.
pub struct TickContext<'a> {
    /// Snapshot rebuilt for this tick.
    pub snapshot: &'a EnvironmentSnapshot,
    /// Host world.
    pub world: &'a dyn WorldView,
    /// Local player.
    pub player: &'a dyn PlayerView,
    /// Session configuration.
    pub config: &'a SurroundConfig,
    /// Lookup tables.
    pub registries: &'a Registries,
}

impl<'a> TickContext<'a> {
    /// Live predicates over the tick's player.
    pub fn status(&self) -> PlayerStatus<'a, dyn PlayerView + 'a> {
        PlayerStatus::new(Some(self.player), self.config)
    }
}

/// An independent effect producer driven by the world tick.
pub trait EffectHandler<S> {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Run once per world tick after the snapshot is rebuilt.
    fn process(&mut self, ctx: &TickContext<'_>, services: &mut S) -> Result<()>;

    /// Called when the client connects to a server.
    fn on_connect(&mut self) {}

    /// Called when the client disconnects.
    fn on_disconnect(&mut self) {}

    /// Contribute lines to the debug overlay.
    fn diagnostics(&self, _ctx: &TickContext<'_>, _services: &S, _out: &mut Vec<String>) {}
}

/// Owns the snapshot and drives every registered handler.
pub struct EffectManager<S> {
    config: SurroundConfig,
    registries: Registries,
    snapshot: EnvironmentSnapshot,
    handlers: Vec<Box<dyn EffectHandler<S>>>,
    diagnostics: Option<Vec<String>>,
    connected: bool,
}

impl<S> EffectManager<S> {
    /// Create a manager with a neutral snapshot and no handlers.
    pub fn new(config: SurroundConfig, registries: Registries) -> Self {
        let snapshot = EnvironmentSnapshot::new(&registries);
        Self {
            config,
            registries,
            snapshot,
            handlers: Vec::new(),
            diagnostics: None,
            connected: false,
        }
    }

    /// Append a handler; handlers run in registration order.
    pub fn register(&mut self, handler: Box<dyn EffectHandler<S>>) {
        debug!(handler = handler.name(), "Registered effect handler");
        self.handlers.push(handler);
    }

    /// Registered handler names, in dispatch order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Session start: reset the snapshot and notify handlers.
    pub fn connect(&mut self) {
        self.diagnostics = None;
        self.snapshot.reset();
        for handler in &mut self.handlers {
            handler.on_connect();
        }
        self.connected = true;
    }

    /// Session end: reset the snapshot and notify handlers.
    pub fn disconnect(&mut self) {
        self.diagnostics = None;
        self.snapshot.reset();
        for handler in &mut self.handlers {
            handler.on_disconnect();
        }
        self.connected = false;
    }

    /// Whether [`Self::connect`] has been called without a matching disconnect.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The local player joined a world; rebuild immediately so first-frame
    /// consumers see valid data before the first tick.
    pub fn on_player_join(&mut self, world: &dyn WorldView, player: &dyn PlayerView) {
        self.snapshot
            .rebuild(&self.registries, &self.config, world, player);
    }

    /// Server village report.
    pub fn set_in_village(&mut self, in_village: bool) {
        self.snapshot.set_in_village(in_village);
    }

    /// One world tick: rebuild, dispatch, then gather diagnostics if the overlay is up.
    pub fn tick(&mut self, world: &dyn WorldView, player: &dyn PlayerView, services: &mut S) {
        self.snapshot
            .rebuild(&self.registries, &self.config, world, player);

        let ctx = TickContext {
            snapshot: &self.snapshot,
            world,
            player,
            config: &self.config,
            registries: &self.registries,
        };

        for handler in &mut self.handlers {
            if let Err(err) = handler.process(&ctx, services) {
                warn!(handler = handler.name(), "Effect handler failed: {err:#}");
            }
        }

        self.diagnostics = if world.client_settings().show_debug_info
            && self.config.enable_debug_logging
        {
            let mut lines = Vec::new();
            for handler in &self.handlers {
                handler.diagnostics(&ctx, services, &mut lines);
            }
            Some(lines)
        } else {
            None
        };
    }

    /// Lines gathered on the last tick, if the overlay was visible.
    pub fn diagnostics(&self) -> Option<&[String]> {
        self.diagnostics.as_deref()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &EnvironmentSnapshot {
        &self.snapshot
    }

    /// Session configuration.
    pub fn config(&self) -> &SurroundConfig {
        &self.config
    }

    /// Lookup tables.
    pub fn registries(&self) -> &Registries {
        &self.registries
    }
}
