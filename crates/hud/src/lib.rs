//! Diagnostic text for the host's debug overlay.
//!
//! Nothing here lays out or draws text. Handlers contribute ordered lines
//! during the tick's diagnostics gather; [`DiagnosticsOverlay`] arranges
//! them into the left and right columns the host renders.

mod block_info;
mod color;
mod environment;
mod overlay;
mod server;
mod sound;

pub use block_info::{
    BlockDescription, BlockInfoHelper, BlockInspector, TextPanel, INSPECTION_TOOL,
    INSPECTION_TOOL_COUNT,
};
pub use color::{strip_formatting, TextColor};
pub use environment::{environment_lines, EnvironmentDiagnostics};
pub use overlay::{DiagnosticsOverlay, DiagnosticsSink};
pub use server::{tps_color, DimensionTickTime, ServerDataReport};
pub use sound::{sound_lines, SoundDiagnostics};
