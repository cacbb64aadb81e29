//! Server performance report for the right-hand overlay column.

use crate::color::TextColor;
use mdsurround_core::DimensionId;
use serde::{Deserialize, Serialize};

/// Mean tick time of one loaded dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionTickTime {
    pub dimension: DimensionId,
    /// Display name; vanilla names are filled in when empty.
    pub name: String,
    pub mean_tick_ms: f64,
}

/// Performance numbers reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerDataReport {
    /// Allocated heap, MB.
    pub total_mb: u64,
    /// Free portion of the allocation, MB.
    pub free_mb: u64,
    /// Heap ceiling, MB.
    pub max_mb: u64,
    pub mean_tick_ms: f64,
    pub dimensions: Vec<DimensionTickTime>,
}

/// Ticks per second implied by a mean tick time, capped at 20.
fn tps(mean_tick_ms: f64) -> u32 {
    if mean_tick_ms <= 0.0 {
        return 20;
    }
    (1000.0 / mean_tick_ms).min(20.0) as u32
}

/// Red at 10 TPS or below, yellow at 15 or below, green otherwise.
pub fn tps_color(tps: u32) -> TextColor {
    if tps <= 10 {
        TextColor::Red
    } else if tps <= 15 {
        TextColor::Yellow
    } else {
        TextColor::Green
    }
}

impl ServerDataReport {
    /// Overlay lines: header, memory, allocation, overall tick time, then one
    /// line per dimension sorted alphabetically.
    pub fn lines(&self) -> Vec<String> {
        let max = self.max_mb.max(1);
        let used = self.total_mb.saturating_sub(self.free_mb);
        let overall = tps(self.mean_tick_ms);

        let mut lines = vec![
            format!("{}Server Information", TextColor::Gold),
            format!("Mem: {}% {:03}/{:3}MB", used * 100 / max, used, self.max_mb),
            format!("Allocated: {}% {:3}MB", self.total_mb * 100 / max, self.total_mb),
            format!(
                "Ticktime Overall:{} {:5.3}ms ({} TPS)",
                tps_color(overall),
                self.mean_tick_ms,
                overall
            ),
        ];

        let mut dims: Vec<String> = self
            .dimensions
            .iter()
            .map(|dim| {
                let name = if dim.name.is_empty() {
                    dim.dimension.vanilla_name().unwrap_or("unknown")
                } else {
                    dim.name.as_str()
                };
                let tps = tps(dim.mean_tick_ms);
                format!(
                    "{} ({}):{} {:7.3}ms ({} TPS)",
                    name,
                    dim.dimension,
                    tps_color(tps),
                    dim.mean_tick_ms,
                    tps
                )
            })
            .collect();
        dims.sort();
        lines.extend(dims);
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::strip_formatting;

    fn report() -> ServerDataReport {
        ServerDataReport {
            total_mb: 1024,
            free_mb: 512,
            max_mb: 2048,
            mean_tick_ms: 40.0,
            dimensions: vec![
                DimensionTickTime {
                    dimension: DimensionId::OVERWORLD,
                    name: String::new(),
                    mean_tick_ms: 30.0,
                },
                DimensionTickTime {
                    dimension: DimensionId::NETHER,
                    name: "Nether".into(),
                    mean_tick_ms: 120.0,
                },
                DimensionTickTime {
                    dimension: DimensionId::END,
                    name: String::new(),
                    mean_tick_ms: 80.0,
                },
            ],
        }
    }

    #[test]
    fn tps_colour_thresholds() {
        assert_eq!(tps_color(10), TextColor::Red);
        assert_eq!(tps_color(11), TextColor::Yellow);
        assert_eq!(tps_color(15), TextColor::Yellow);
        assert_eq!(tps_color(16), TextColor::Green);
        assert_eq!(tps(10.0), 20);
        assert_eq!(tps(0.0), 20);
        assert_eq!(tps(200.0), 5);
    }

    #[test]
    fn report_lines_are_formatted_and_dimensions_sorted() {
        let lines = report().lines();
        let plain: Vec<String> = lines.iter().map(|l| strip_formatting(l)).collect();
        assert_eq!(plain[0], "Server Information");
        assert_eq!(plain[1], "Mem: 25% 512/2048MB");
        assert_eq!(plain[2], "Allocated: 50% 1024MB");
        assert_eq!(plain[3], "Ticktime Overall: 40.000ms (20 TPS)");
        assert!(lines[3].contains(&TextColor::Green.to_string()));
        assert_eq!(
            &plain[4..],
            &[
                "Nether (-1): 120.000ms (8 TPS)".to_string(),
                "overworld (0):  30.000ms (20 TPS)".to_string(),
                "the_end (1):  80.000ms (12 TPS)".to_string(),
            ]
        );
    }
}
