//! Sound engine lines.

use anyhow::Result;
use mdsurround_audio::SoundEngine;
use mdsurround_environ::{EffectHandler, TickContext};

/// Channel usage and admission counters.
pub fn sound_lines(engine: &SoundEngine) -> Vec<String> {
    let budget = engine.budget();
    let stats = engine.stats();
    vec![
        format!(
            "SoundSystem: {}/{}",
            engine.current_sound_count(),
            engine.max_sound_count()
        ),
        format!(
            "Channels: {} normal, {} streaming (total avail: {})",
            budget.normal,
            budget.streaming,
            budget.total_label()
        ),
        format!(
            "Sounds: {} queued, {} no room, {} refused (peak {})",
            stats.admitted, stats.rejected_no_room, stats.rejected_backend, stats.peak_live
        ),
    ]
}

/// Contributes [`sound_lines`] during the diagnostics gather.
#[derive(Debug, Default)]
pub struct SoundDiagnostics;

impl EffectHandler<SoundEngine> for SoundDiagnostics {
    fn name(&self) -> &str {
        "sound-diagnostics"
    }

    fn process(&mut self, _ctx: &TickContext<'_>, _engine: &mut SoundEngine) -> Result<()> {
        Ok(())
    }

    fn diagnostics(&self, _ctx: &TickContext<'_>, engine: &SoundEngine, out: &mut Vec<String>) {
        out.extend(sound_lines(engine));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsurround_audio::{HeadlessBackend, SoundCategory, SoundRequest};
    use mdsurround_core::{RegistryKey, SurroundConfig};

    #[test]
    fn lines_track_engine_state() {
        let mut engine = SoundEngine::new(
            Box::new(HeadlessBackend::new(None)),
            &SurroundConfig::default(),
        );
        let key = RegistryKey::parse("dsurround:wind").unwrap();
        engine.play_sound(&SoundRequest::new(key, SoundCategory::Ambient).with_id("wind"));

        let lines = sound_lines(&engine);
        assert_eq!(lines[0], "SoundSystem: 1/32");
        assert_eq!(
            lines[1],
            "Channels: 28 normal, 4 streaming (total avail: UNKNOWN)"
        );
        assert_eq!(lines[2], "Sounds: 1 queued, 0 no room, 0 refused (peak 1)");
    }
}
