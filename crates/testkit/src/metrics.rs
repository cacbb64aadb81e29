//! Session metrics exported as JSON for CI artifacts.
//!
//! A headless session fills one [`MetricsReport`] per run; regressions in
//! admission behaviour or snapshot churn show up as diffs between reports.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Top-level report for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Session identifier
    pub session_name: String,

    /// Collection timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall result
    pub result: SessionResult,

    /// Environment snapshot metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentMetrics>,

    /// Sound admission metrics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundMetrics>,

    /// Wall-clock execution metrics
    pub execution: ExecutionMetrics,
}

/// Overall session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionResult {
    /// Ran to completion
    Pass,
    /// Aborted or failed a check
    Fail,
}

/// Snapshot and battle counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentMetrics {
    /// World ticks driven
    pub ticks: u64,

    /// Final snapshot tick counter (excludes paused ticks)
    pub tick_counter: u64,

    /// Ticks spent with the battle flag raised
    pub battle_ticks: u64,

    /// Ticks spent flagged inside
    pub inside_ticks: u64,

    /// Distinct apparent biome names seen
    pub biomes_seen: usize,
}

/// Admission counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundMetrics {
    /// Requests submitted
    pub requested: u64,

    /// Requests admitted by the backend
    pub admitted: u64,

    /// Requests rejected for lack of channels
    pub rejected_no_room: u64,

    /// Requests the backend refused
    pub rejected_backend: u64,

    /// Normal channel limit in effect
    pub normal_channels: u32,

    /// Highest live census observed
    pub peak_live: usize,
}

/// Wall-clock execution data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    /// Total duration (seconds)
    pub duration_seconds: f64,
}

/// Builder for constructing metrics reports
pub struct MetricsReportBuilder {
    report: MetricsReport,
}

impl MetricsReportBuilder {
    /// Create a new builder for `session_name`
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            report: MetricsReport {
                session_name: session_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                result: SessionResult::Pass,
                environment: None,
                sound: None,
                execution: ExecutionMetrics::default(),
            },
        }
    }

    /// Set result
    pub fn result(mut self, result: SessionResult) -> Self {
        self.report.result = result;
        self
    }

    /// Set environment metrics
    pub fn environment(mut self, metrics: EnvironmentMetrics) -> Self {
        self.report.environment = Some(metrics);
        self
    }

    /// Set sound metrics
    pub fn sound(mut self, metrics: SoundMetrics) -> Self {
        self.report.sound = Some(metrics);
        self
    }

    /// Set execution metrics
    pub fn execution(mut self, metrics: ExecutionMetrics) -> Self {
        self.report.execution = metrics;
        self
    }

    /// Build the report
    pub fn build(self) -> MetricsReport {
        self.report
    }
}

/// Writes metrics reports to a JSON file
pub struct MetricsSink {
    path: std::path::PathBuf,
}

impl MetricsSink {
    /// Create a sink at `path`, creating parent dirs if needed
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// Write the report as pretty JSON
    pub fn write(&self, report: &MetricsReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
