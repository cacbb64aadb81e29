//! Sound admission engine.

use crate::backend::{AudioBackend, BackendError};
use crate::budget::ChannelBudget;
use crate::request::{SoundCategory, SoundRequest};
use mdsurround_core::{RegistryKey, SurroundConfig};
use mdsurround_world::BlockPos;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

const LOG_TARGET: &str = "mdsurround::sound";

/// Why a request was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Live census reached the admission limit.
    #[error("no room: {live} live channels, limit {limit}")]
    NoRoom { live: usize, limit: usize },
    /// The backend failed to start the sound.
    #[error("backend refused sound: {0}")]
    BackendRefused(#[from] BackendError),
}

/// Running admission counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SoundStats {
    pub requested: u64,
    pub admitted: u64,
    pub rejected_no_room: u64,
    pub rejected_backend: u64,
    /// Highest census seen after an admission.
    pub peak_live: usize,
}

/// Gates every play request against the live channel census.
///
/// The census is queried from the backend on every call and never cached,
/// so sounds that finish between calls free their channel immediately.
pub struct SoundEngine {
    backend: Box<dyn AudioBackend>,
    budget: ChannelBudget,
    debug_logging: bool,
    trace_volume: bool,
    stats: SoundStats,
}

impl SoundEngine {
    /// Wrap `backend` and configure its channels from `config`.
    pub fn new(backend: Box<dyn AudioBackend>, config: &SurroundConfig) -> Self {
        let mut engine = Self {
            backend,
            budget: ChannelBudget::configure(config, None),
            debug_logging: config.enable_debug_logging,
            trace_volume: config.trace_sound_volume,
            stats: SoundStats::default(),
        };
        engine.configure(config);
        engine
    }

    /// Query hardware, derive the channel split and push it, plus any stream
    /// buffer overrides, to the backend. A failed hardware query falls back
    /// to the configured counts.
    pub fn configure(&mut self, config: &SurroundConfig) {
        self.debug_logging = config.enable_debug_logging;
        self.trace_volume = config.trace_sound_volume;

        let hardware = match self.backend.hardware_mono_sources() {
            Ok(count) => Some(count),
            Err(err) => {
                warn!(%err, "Unable to query hardware sound channels; using configured counts");
                None
            }
        };

        self.budget = ChannelBudget::configure(config, hardware);
        info!(
            "Sound channels: {} normal, {} streaming (total avail: {})",
            self.budget.normal,
            self.budget.streaming,
            self.budget.total_label()
        );
        self.backend
            .configure_channels(self.budget.normal, self.budget.streaming);

        if config.stream_buffer_count != 0 {
            self.backend.set_stream_buffer_count(config.stream_buffer_count);
        }
        if config.stream_buffer_size != 0 {
            self.backend
                .set_stream_buffer_size(config.stream_buffer_size.saturating_mul(1024));
        }
        let (count, size) = self.backend.stream_buffers();
        info!("Stream buffers: {} x {}", count, size);
    }

    pub fn budget(&self) -> &ChannelBudget {
        &self.budget
    }

    pub fn stats(&self) -> &SoundStats {
        &self.stats
    }

    pub fn backend(&self) -> &dyn AudioBackend {
        self.backend.as_ref()
    }

    /// Distinct sounds across the backend's tracking sets.
    pub fn current_sound_count(&self) -> usize {
        self.backend.live_channels().census()
    }

    /// Normal plus streaming channels.
    pub fn max_sound_count(&self) -> u32 {
        self.budget.max_sound_count()
    }

    pub fn can_fit_sound(&self) -> bool {
        self.current_sound_count() < self.budget.admission_limit()
    }

    /// Admit `request` if there is room, replacing any live sound with the
    /// same identity. Returns the identity the sound is tracked under.
    pub fn admit(&mut self, request: &SoundRequest) -> Result<String, Rejection> {
        self.stats.requested += 1;

        let channels = self.backend.live_channels();
        let live = channels.census();
        let replaces = request.has_id() && channels.contains(&request.id);
        let limit = self.budget.admission_limit();
        if live >= limit {
            self.stats.rejected_no_room += 1;
            if self.debug_logging {
                debug!(target: LOG_TARGET, live, limit, "> NO ROOM: [{}]", request);
            }
            return Err(Rejection::NoRoom { live, limit });
        }

        if request.has_id() {
            self.backend.stop(&request.id);
        }

        let id = match self.backend.play(request) {
            Ok(id) => id,
            Err(err) => {
                self.stats.rejected_backend += 1;
                if self.debug_logging {
                    debug!(target: LOG_TARGET, %err, "> NOT QUEUED: [{}]", request);
                }
                return Err(Rejection::BackendRefused(err));
            }
        };

        self.stats.admitted += 1;
        let after = if replaces { live } else { live + 1 };
        self.stats.peak_live = self.stats.peak_live.max(after);

        if self.debug_logging {
            let mut line = format!("> QUEUED: [{}]", request);
            if self.trace_volume {
                if let Some((volume, pitch)) = self.backend.effective_volume_pitch(&id) {
                    line.push_str(&format!("; v: {volume}, p: {pitch}"));
                }
            }
            debug!(target: LOG_TARGET, %id, "{}", line);
        }

        Ok(id)
    }

    /// [`Self::admit`] with the rejection reason discarded.
    pub fn play_sound(&mut self, request: &SoundRequest) -> Option<String> {
        self.admit(request).ok()
    }

    /// Fire-and-forget sound centered on `pos`.
    pub fn play_sound_at(
        &mut self,
        pos: BlockPos,
        sound: RegistryKey,
        category: SoundCategory,
        volume: f32,
        pitch: f32,
    ) -> Option<String> {
        let request = SoundRequest::new(sound, category)
            .at_block(pos)
            .with_volume(volume)
            .with_pitch(pitch);
        self.play_sound(&request)
    }

    /// Stop the sound tracked under `id`; absent identities are ignored.
    pub fn stop_sound(&mut self, id: &str) {
        if !id.is_empty() {
            self.backend.stop(id);
        }
    }

    /// Stop `request` by its identity. Fire-and-forget requests cannot be stopped.
    pub fn stop_request(&mut self, request: &SoundRequest) {
        self.stop_sound(&request.id);
    }

    pub fn stop_all_sounds(&mut self) {
        self.backend.stop_all();
    }

    /// `request`'s identity is tracked in any of the backend's sets.
    pub fn is_sound_playing(&self, request: &SoundRequest) -> bool {
        request.has_id() && self.backend.live_channels().contains(&request.id)
    }

    /// `id` is in the backend's playing set. Empty ids are never playing.
    pub fn is_id_playing(&self, id: &str) -> bool {
        !id.is_empty() && self.backend.live_channels().is_playing(id)
    }

    /// Advance backend bookkeeping by one tick.
    pub fn update(&mut self) {
        self.backend.update();
    }
}
