//! Overlay composition.

use tracing::debug;

/// Receives the ordered diagnostic lines gathered each tick.
pub trait DiagnosticsSink {
    fn accept(&mut self, lines: &[String]);
}

/// Holds the latest diagnostics and server report and arranges them into
/// the host overlay's two columns.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticsOverlay {
    diagnostics: Option<Vec<String>>,
    server_report: Option<Vec<String>>,
}

impl DiagnosticsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the server report (already formatted).
    pub fn set_server_report(&mut self, lines: Vec<String>) {
        self.server_report = Some(lines);
    }

    /// Gathered lines went stale (overlay hidden, or debug logging off).
    pub fn clear_diagnostics(&mut self) {
        self.diagnostics = None;
    }

    /// Drop everything; used on connect and disconnect.
    pub fn clear(&mut self) {
        self.diagnostics = None;
        self.server_report = None;
    }

    /// Left column: a blank separator then the gathered lines.
    pub fn left(&self) -> Vec<String> {
        match &self.diagnostics {
            Some(lines) if !lines.is_empty() => {
                let mut out = Vec::with_capacity(lines.len() + 1);
                out.push(String::new());
                out.extend(lines.iter().cloned());
                out
            }
            _ => Vec::new(),
        }
    }

    /// Right column: a spacer then the server report.
    pub fn right(&self) -> Vec<String> {
        match &self.server_report {
            Some(lines) if !lines.is_empty() => {
                let mut out = Vec::with_capacity(lines.len() + 1);
                out.push(" ".to_string());
                out.extend(lines.iter().cloned());
                out
            }
            _ => Vec::new(),
        }
    }
}

impl DiagnosticsSink for DiagnosticsOverlay {
    fn accept(&mut self, lines: &[String]) {
        debug!(count = lines.len(), "Diagnostics gathered");
        self.diagnostics = Some(lines.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_get_separators_only_when_populated() {
        let mut overlay = DiagnosticsOverlay::new();
        assert!(overlay.left().is_empty());
        assert!(overlay.right().is_empty());

        overlay.accept(&["Dim: 0/overworld".to_string()]);
        overlay.set_server_report(vec!["Server Information".to_string()]);
        assert_eq!(overlay.left(), vec!["", "Dim: 0/overworld"]);
        assert_eq!(overlay.right(), vec![" ", "Server Information"]);

        overlay.accept(&[]);
        assert!(overlay.left().is_empty());

        overlay.clear();
        assert!(overlay.right().is_empty());
    }
}
