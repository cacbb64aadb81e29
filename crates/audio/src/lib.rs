//! Sound admission for Surround.
//!
//! Every sound-play request passes through [`SoundEngine::admit`], which
//! checks a live channel census against a [`ChannelBudget`] before handing
//! the request to an [`AudioBackend`]. The backend owns mixing and decoding;
//! this crate only decides what is allowed to reach it.
//!
//! # Architecture
//!
//! - [`SoundEngine`] - admission, dedupe by identity, stop/stop-all
//! - [`ChannelBudget`] - normal/streaming split derived from hardware and config
//! - [`AudioBackend`] - capability trait the host audio system implements
//! - [`HeadlessBackend`] - in-memory backend for tests and headless sessions
//! - [`SoundRequest`] - one playback attempt
//!
//! # Example
//!
//! ```ignore
//! let mut engine = SoundEngine::new(Box::new(HeadlessBackend::new(Some(100))), &config);
//! let id = engine.play_sound(&SoundRequest::new(key, SoundCategory::Ambient).with_id("wind"));
//! ```

mod backend;
mod budget;
mod engine;
mod headless;
mod request;

#[cfg(feature = "rodio_backend")]
mod rodio_backend;

pub use backend::{AudioBackend, BackendError, LiveChannels};
pub use budget::{ChannelBudget, AUTO_CONFIGURE_THRESHOLD, MAX_STREAM_CHANNELS, SOUND_QUEUE_SLACK};
pub use engine::{Rejection, SoundEngine, SoundStats};
pub use headless::HeadlessBackend;
pub use request::{SoundCategory, SoundRequest};

#[cfg(feature = "rodio_backend")]
pub use rodio_backend::RodioBackend;
