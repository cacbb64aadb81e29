//! Weather as reported by the host, plus its diagnostic rendering.

use serde::{Deserialize, Serialize};

/// Coarse precipitation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeatherState {
    #[default]
    Clear,
    /// Rain in warm biomes, snow in cold ones.
    Precipitation,
    Thunderstorm,
}

/// Weather properties for the current world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherProperties {
    pub state: WeatherState,
    /// Rain strength in [0.0, 1.0].
    pub rain_strength: f32,
}

impl WeatherProperties {
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn is_raining(&self) -> bool {
        matches!(
            self.state,
            WeatherState::Precipitation | WeatherState::Thunderstorm
        )
    }

    pub fn is_thundering(&self) -> bool {
        self.state == WeatherState::Thunderstorm
    }

    /// HUD line describing precipitation.
    pub fn diagnostic(&self) -> String {
        let mut line = if self.is_raining() {
            format!("Weather: rainfall: {:.2}", self.rain_strength)
        } else {
            "Weather: not raining".to_string()
        };
        if self.is_thundering() {
            line.push_str(" thundering");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_lines() {
        assert_eq!(WeatherProperties::clear().diagnostic(), "Weather: not raining");
        let storm = WeatherProperties {
            state: WeatherState::Thunderstorm,
            rain_strength: 0.75,
        };
        assert_eq!(storm.diagnostic(), "Weather: rainfall: 0.75 thundering");
    }
}
