//! Normal/streaming channel split.

use mdsurround_core::SurroundConfig;
use serde::Serialize;

/// Cap on auto-configured streaming channels.
pub const MAX_STREAM_CHANNELS: u32 = 16;

/// Headroom kept below the normal channel count to absorb backend admission jitter.
pub const SOUND_QUEUE_SLACK: u32 = 6;

/// Auto-configuration only kicks in above this many hardware sources.
pub const AUTO_CONFIGURE_THRESHOLD: u32 = 64;

/// How many channels of each kind the backend is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelBudget {
    /// Usable total: three quarters of hardware when auto-configured, raw
    /// hardware otherwise, `None` when the hardware query failed.
    pub total: Option<u32>,
    /// Positional, short sounds.
    pub normal: u32,
    /// Music and ambient loops.
    pub streaming: u32,
}

impl ChannelBudget {
    /// Derive the split from configuration and the hardware mono source count.
    ///
    /// With auto-configuration on and more than [`AUTO_CONFIGURE_THRESHOLD`]
    /// hardware sources, total = 3/4 of (hardware + 1), streaming =
    /// min(total / 5, [`MAX_STREAM_CHANNELS`]) and normal takes the rest.
    /// Otherwise the configured counts are used as-is.
    pub fn configure(config: &SurroundConfig, hardware: Option<u32>) -> Self {
        let mut budget = Self {
            total: hardware,
            normal: config.normal_channel_count,
            streaming: config.streaming_channel_count,
        };

        if let Some(hw) = hardware {
            if config.auto_configure_channels && hw > AUTO_CONFIGURE_THRESHOLD {
                let total = u32::try_from((u64::from(hw) + 1) * 3 / 4).unwrap_or(u32::MAX);
                let streaming = (total / 5).min(MAX_STREAM_CHANNELS);
                budget = Self {
                    total: Some(total),
                    normal: total - streaming,
                    streaming,
                };
            }
        }

        budget
    }

    /// Census at or above which new sounds are rejected.
    pub fn admission_limit(&self) -> usize {
        self.normal.saturating_sub(SOUND_QUEUE_SLACK) as usize
    }

    /// Normal plus streaming.
    pub fn max_sound_count(&self) -> u32 {
        self.normal.saturating_add(self.streaming)
    }

    /// Total for diagnostics; `UNKNOWN` when hardware could not be queried.
    pub fn total_label(&self) -> String {
        match self.total {
            Some(total) => total.to_string(),
            None => "UNKNOWN".to_string(),
        }
    }
}
