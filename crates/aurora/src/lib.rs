//! Auroras over cold nights.
//!
//! [`Aurora`] is the animated band model, [`AuroraRenderer`] turns it into
//! camera-relative vertex data, and [`AuroraEffectHandler`] decides when one
//! should be in the sky. No GPU calls happen here; the host uploads the
//! [`AuroraMesh`] however it draws translucent sky geometry.

mod handler;
mod model;
mod renderer;

pub use handler::AuroraEffectHandler;
pub use model::{Aurora, AuroraNode, AuroraState, AURORA_PALETTE};
pub use renderer::{AuroraMesh, AuroraRenderer, AuroraVertex};
