//! Audio output through rodio.
//!
//! Each admitted sound gets its own [`Sink`]. Sound data is registered up
//! front by key; a request for an unregistered key is refused. Rodio has no
//! notion of hardware mono sources, so that query reports
//! [`BackendError::Unsupported`] and the engine falls back to configured counts.

use crate::backend::{AudioBackend, BackendError, LiveChannels};
use crate::request::SoundRequest;
use mdsurround_core::RegistryKey;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const TICK: Duration = Duration::from_millis(50);

struct Channel {
    sink: Sink,
    /// Ticks until the delayed start has elapsed; 0 once audible.
    pending: u32,
}

/// Backend state for rodio audio.
pub struct RodioBackend {
    /// Output stream (must be kept alive)
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sounds: HashMap<RegistryKey, Arc<Vec<u8>>>,
    channels: HashMap<String, Channel>,
    max_channels: u32,
    stream_buffer_count: u32,
    stream_buffer_size: u32,
    next_id: u64,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn new() -> Result<Self, BackendError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|err| BackendError::Unavailable(err.to_string()))?;
        debug!("Audio backend: rodio");
        Ok(Self {
            _stream: stream,
            stream_handle,
            sounds: HashMap::new(),
            channels: HashMap::new(),
            max_channels: u32::MAX,
            stream_buffer_count: 3,
            stream_buffer_size: 128 * 1024,
            next_id: 0,
        })
    }

    /// Register encoded audio (wav or vorbis) for `key`.
    pub fn load_sound(&mut self, key: RegistryKey, data: Vec<u8>) {
        debug!(%key, bytes = data.len(), "Loaded sound");
        self.sounds.insert(key, Arc::new(data));
    }
}

impl AudioBackend for RodioBackend {
    fn hardware_mono_sources(&mut self) -> Result<u32, BackendError> {
        Err(BackendError::Unsupported)
    }

    fn configure_channels(&mut self, normal: u32, streaming: u32) {
        self.max_channels = normal.saturating_add(streaming);
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
        if self.channels.len() >= self.max_channels as usize {
            return Err(BackendError::Device("all sinks in use".into()));
        }
        let data = self
            .sounds
            .get(&request.sound)
            .ok_or_else(|| BackendError::Device(format!("sound not loaded: {}", request.sound)))?;

        let source = rodio::Decoder::new(Cursor::new(data.to_vec()))
            .map_err(|err| BackendError::Device(err.to_string()))?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|err| BackendError::Device(err.to_string()))?;
        sink.set_volume(request.volume.clamp(0.0, 1.0));
        sink.set_speed(request.pitch.clamp(0.5, 2.0));
        sink.append(source.delay(TICK * request.delay_ticks));

        let id = if request.has_id() {
            request.id.clone()
        } else {
            self.next_id += 1;
            format!("rodio-{}", self.next_id)
        };
        self.channels.insert(
            id.clone(),
            Channel {
                sink,
                pending: request.delay_ticks,
            },
        );
        Ok(id)
    }

    fn stop(&mut self, id: &str) {
        if let Some(channel) = self.channels.remove(id) {
            channel.sink.stop();
        }
    }

    fn stop_all(&mut self) {
        for (_, channel) in self.channels.drain() {
            channel.sink.stop();
        }
    }

    fn live_channels(&self) -> LiveChannels {
        let mut live = LiveChannels::default();
        for (id, channel) in &self.channels {
            if channel.pending > 0 {
                live.delayed.push(id.clone());
            } else if !channel.sink.empty() {
                live.playing.push(id.clone());
            }
            live.inverse.push(id.clone());
        }
        live
    }

    fn effective_volume_pitch(&self, id: &str) -> Option<(f32, f32)> {
        self.channels
            .get(id)
            .map(|channel| (channel.sink.volume(), channel.sink.speed()))
    }

    fn update(&mut self) {
        self.channels.retain(|_, channel| {
            if channel.pending > 0 {
                channel.pending -= 1;
                return true;
            }
            !channel.sink.empty()
        });
    }
}
