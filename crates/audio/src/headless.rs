//! In-memory audio backend.
//!
//! Tracks sounds exactly as a mixer would (playing, delayed, and a lazily
//! cleaned inverse table) without producing any output. Sounds last a fixed
//! number of ticks, or forever when no length is set.

use crate::backend::{AudioBackend, BackendError, LiveChannels};
use crate::request::SoundRequest;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

const DEFAULT_STREAM_BUFFER_COUNT: u32 = 3;
const DEFAULT_STREAM_BUFFER_SIZE: u32 = 128 * 1024;

#[derive(Debug, Clone)]
struct Voice {
    request: SoundRequest,
    /// Ticks left before the voice finishes; `None` loops forever.
    remaining: Option<u32>,
}

/// Backend that keeps all channel bookkeeping in memory.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    hardware_sources: Option<u32>,
    sound_length: Option<u32>,
    normal_channels: u32,
    streaming_channels: u32,
    stream_buffer_count: u32,
    stream_buffer_size: u32,
    playing: BTreeMap<String, Voice>,
    delayed: BTreeMap<String, (SoundRequest, u32)>,
    inverse: BTreeSet<String>,
    next_id: u64,
    refuse_playback: bool,
}

impl HeadlessBackend {
    /// Backend reporting `hardware_sources`; `None` makes the hardware query fail.
    pub fn new(hardware_sources: Option<u32>) -> Self {
        Self {
            hardware_sources,
            sound_length: None,
            normal_channels: 0,
            streaming_channels: 0,
            stream_buffer_count: DEFAULT_STREAM_BUFFER_COUNT,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
            playing: BTreeMap::new(),
            delayed: BTreeMap::new(),
            inverse: BTreeSet::new(),
            next_id: 0,
            refuse_playback: false,
        }
    }

    /// Every sound finishes after `ticks` calls to [`AudioBackend::update`].
    pub fn with_sound_length(mut self, ticks: u32) -> Self {
        self.sound_length = Some(ticks);
        self
    }

    /// Make every subsequent `play` fail, as a device in a bad state would.
    pub fn set_refuse_playback(&mut self, refuse: bool) {
        self.refuse_playback = refuse;
    }

    /// Channel split last applied.
    pub fn channels(&self) -> (u32, u32) {
        (self.normal_channels, self.streaming_channels)
    }

    /// Request currently playing under `id`.
    pub fn playing_request(&self, id: &str) -> Option<&SoundRequest> {
        self.playing.get(id).map(|voice| &voice.request)
    }

    fn start(&mut self, id: String, request: SoundRequest) {
        self.inverse.insert(id.clone());
        self.playing.insert(
            id,
            Voice {
                request,
                remaining: self.sound_length,
            },
        );
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioBackend for HeadlessBackend {
    fn hardware_mono_sources(&mut self) -> Result<u32, BackendError> {
        self.hardware_sources
            .ok_or_else(|| BackendError::Unavailable("headless backend has no device".into()))
    }

    fn configure_channels(&mut self, normal: u32, streaming: u32) {
        self.normal_channels = normal;
        self.streaming_channels = streaming;
    }

    fn set_stream_buffer_count(&mut self, count: u32) {
        self.stream_buffer_count = count;
    }

    fn set_stream_buffer_size(&mut self, bytes: u32) {
        self.stream_buffer_size = bytes;
    }

    fn stream_buffers(&self) -> (u32, u32) {
        (self.stream_buffer_count, self.stream_buffer_size)
    }

    fn play(&mut self, request: &SoundRequest) -> Result<String, BackendError> {
        if self.refuse_playback {
            return Err(BackendError::Device("playback refused".into()));
        }

        let id = if request.has_id() {
            request.id.clone()
        } else {
            self.next_id += 1;
            format!("headless-{}", self.next_id)
        };

        if self.playing.contains_key(&id) || self.delayed.contains_key(&id) {
            return Err(BackendError::Device(format!("identity {id} already in use")));
        }

        if request.delay_ticks > 0 {
            self.delayed
                .insert(id.clone(), (request.clone(), request.delay_ticks));
        } else {
            self.start(id.clone(), request.clone());
        }
        Ok(id)
    }

    fn stop(&mut self, id: &str) {
        self.playing.remove(id);
        self.delayed.remove(id);
        self.inverse.remove(id);
    }

    fn stop_all(&mut self) {
        self.playing.clear();
        self.delayed.clear();
        self.inverse.clear();
    }

    fn live_channels(&self) -> LiveChannels {
        LiveChannels {
            playing: self.playing.keys().cloned().collect(),
            delayed: self.delayed.keys().cloned().collect(),
            inverse: self.inverse.iter().cloned().collect(),
        }
    }

    fn effective_volume_pitch(&self, id: &str) -> Option<(f32, f32)> {
        self.playing.get(id).map(|voice| {
            (
                voice.request.volume.clamp(0.0, 1.0),
                voice.request.pitch.clamp(0.5, 2.0),
            )
        })
    }

    fn update(&mut self) {
        // Entries for voices that finished last tick are reaped one tick late.
        let playing = &self.playing;
        self.inverse.retain(|id| playing.contains_key(id));

        let mut finished = Vec::new();
        for (id, voice) in &mut self.playing {
            if let Some(remaining) = voice.remaining.as_mut() {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    finished.push(id.clone());
                }
            }
        }
        for id in finished {
            self.playing.remove(&id);
        }

        let mut ready = Vec::new();
        for (id, (_, wait)) in &mut self.delayed {
            *wait = wait.saturating_sub(1);
            if *wait == 0 {
                ready.push(id.clone());
            }
        }
        for id in ready {
            if let Some((request, _)) = self.delayed.remove(&id) {
                debug!(%id, "Delayed sound started");
                self.start(id, request);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SoundCategory;
    use mdsurround_core::RegistryKey;

    fn request() -> SoundRequest {
        SoundRequest::new(
            RegistryKey::parse("dsurround:bird").unwrap(),
            SoundCategory::Ambient,
        )
    }

    #[test]
    fn anonymous_requests_get_generated_ids() {
        let mut backend = HeadlessBackend::new(Some(32));
        let a = backend.play(&request()).unwrap();
        let b = backend.play(&request()).unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.live_channels().census(), 2);
    }

    #[test]
    fn duplicate_identity_is_refused() {
        let mut backend = HeadlessBackend::default();
        backend.play(&request().with_id("x")).unwrap();
        assert!(backend.play(&request().with_id("x")).is_err());
    }

    #[test]
    fn delayed_sounds_start_after_their_delay() {
        let mut backend = HeadlessBackend::default();
        backend.play(&request().with_id("later").delayed(2)).unwrap();
        let live = backend.live_channels();
        assert_eq!(live.delayed, vec!["later".to_string()]);
        assert!(!live.is_playing("later"));

        backend.update();
        assert!(!backend.live_channels().is_playing("later"));
        backend.update();
        let live = backend.live_channels();
        assert!(live.is_playing("later"));
        assert!(live.delayed.is_empty());
    }

    #[test]
    fn finished_sounds_linger_in_inverse_table_for_one_tick() {
        let mut backend = HeadlessBackend::new(Some(32)).with_sound_length(1);
        backend.play(&request().with_id("short")).unwrap();

        backend.update();
        let live = backend.live_channels();
        assert!(!live.is_playing("short"));
        assert!(live.contains("short"));
        assert_eq!(live.census(), 1);

        backend.update();
        assert_eq!(backend.live_channels().census(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut backend = HeadlessBackend::default();
        backend.play(&request().with_id("x")).unwrap();
        backend.stop("x");
        let once = backend.live_channels();
        backend.stop("x");
        assert_eq!(backend.live_channels(), once);
        assert_eq!(once.census(), 0);
    }

    #[test]
    fn hardware_query_fails_without_device() {
        let mut backend = HeadlessBackend::new(None);
        assert!(matches!(
            backend.hardware_mono_sources(),
            Err(BackendError::Unavailable(_))
        ));
    }
}
