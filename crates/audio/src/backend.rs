//! Capability contract for the host audio system.

use crate::request::SoundRequest;
use std::collections::HashSet;
use thiserror::Error;

/// Failures reported by an audio backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No output device, or the device could not be opened.
    #[error("audio backend unavailable: {0}")]
    Unavailable(String),
    /// The backend cannot answer this query.
    #[error("operation not supported by this audio backend")]
    Unsupported,
    /// The device refused the operation.
    #[error("audio device error: {0}")]
    Device(String),
}

/// The backend's three independent tracking sets, by identity.
///
/// A sound may be tracked in more than one set at once (a playing sound is
/// usually also in the inverse table), so the census counts the union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveChannels {
    /// Sounds currently assigned to a source.
    pub playing: Vec<String>,
    /// Sounds queued to start after a delay.
    pub delayed: Vec<String>,
    /// Reverse source-to-sound table; may lag behind `playing`.
    pub inverse: Vec<String>,
}

impl LiveChannels {
    /// Number of distinct identities across all three sets.
    pub fn census(&self) -> usize {
        self.all()
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether `id` is tracked in any set.
    pub fn contains(&self, id: &str) -> bool {
        self.all().any(|live| live == id)
    }

    /// Whether `id` is in the playing set.
    pub fn is_playing(&self, id: &str) -> bool {
        self.playing.iter().any(|live| live == id)
    }

    fn all(&self) -> impl Iterator<Item = &str> {
        self.playing
            .iter()
            .chain(&self.delayed)
            .chain(&self.inverse)
            .map(String::as_str)
    }
}

/// What the admission engine needs from the host audio system.
///
/// Implementations never panic on unknown identities: stopping a sound that
/// is not playing is a no-op.
pub trait AudioBackend {
    /// Hardware mono source count. May fail when no device is present.
    fn hardware_mono_sources(&mut self) -> Result<u32, BackendError>;

    /// Apply the normal/streaming channel split.
    fn configure_channels(&mut self, normal: u32, streaming: u32);

    fn set_stream_buffer_count(&mut self, count: u32);

    /// Size of each stream buffer in bytes.
    fn set_stream_buffer_size(&mut self, bytes: u32);

    /// Current `(count, size_bytes)` of stream buffers.
    fn stream_buffers(&self) -> (u32, u32);

    /// Start (or queue) a sound. Returns the identity it is tracked under,
    /// generated by the backend when the request carries none.
    fn play(&mut self, request: &SoundRequest) -> Result<String, BackendError>;

    fn stop(&mut self, id: &str);

    fn stop_all(&mut self);

    /// Snapshot of the three tracking sets.
    fn live_channels(&self) -> LiveChannels;

    /// Volume and pitch the mixer actually applied to `id`, if it can tell.
    fn effective_volume_pitch(&self, _id: &str) -> Option<(f32, f32)> {
        None
    }

    /// Advance backend bookkeeping by one tick (start delayed sounds, reap finished ones).
    fn update(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn census_counts_union_not_sum() {
        let live = LiveChannels {
            playing: ids(&["a", "b"]),
            delayed: ids(&["c"]),
            inverse: ids(&["a", "b", "d"]),
        };
        assert_eq!(live.census(), 4);
        assert!(live.contains("d"));
        assert!(!live.is_playing("d"));
        assert!(live.is_playing("a"));
        assert!(!live.contains("e"));
    }

    #[test]
    fn empty_census_is_zero() {
        assert_eq!(LiveChannels::default().census(), 0);
    }
}
