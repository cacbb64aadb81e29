//! World clock derived from the host's day time.
//!
//! The host reports a cumulative day-time tick count; 0 is 6:00 AM of day 0
//! and each day is [`TICKS_PER_DAY`] ticks long.

use crate::season::TICKS_PER_DAY;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticks after sunrise at which night begins.
const NIGHT_START: u64 = 13_000;
/// Ticks after sunrise at which night ends.
const NIGHT_END: u64 = 23_000;

/// Snapshot of the world clock, refreshed once per environment rebuild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    day: u64,
    day_time: u64,
    hour: u32,
    minute: u32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the host's cumulative day-time ticks.
    pub fn update(&mut self, world_time: u64) {
        self.day = world_time / TICKS_PER_DAY;
        self.day_time = world_time % TICKS_PER_DAY;
        // Tick 0 is 06:00.
        self.hour = ((self.day_time / 1000 + 6) % 24) as u32;
        self.minute = ((self.day_time % 1000) * 60 / 1000) as u32;
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Fraction of the day elapsed since sunrise (0.0..1.0).
    pub fn time_of_day(&self) -> f64 {
        self.day_time as f64 / TICKS_PER_DAY as f64
    }

    pub fn is_night(&self) -> bool {
        (NIGHT_START..NIGHT_END).contains(&self.day_time)
    }

    pub fn is_day(&self) -> bool {
        !self.is_night()
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour12, suffix) = match self.hour {
            0 => (12, "AM"),
            1..=11 => (self.hour, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "Day {}, {}:{:02} {}", self.day, hour12, self.minute, suffix)
    }
}
