//! Presentation sink: narration of the game for whatever front end is
//! attached. The engine calls it at phase and round boundaries and after
//! every executed action; it never reads anything back.

use std::sync::Mutex;

use tracing::info;

/// How a message should be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Plain,
    Emphasis,
    Warning,
}

/// Receiver of game narration.
pub trait PresentationSink: Send + Sync {
    fn notify(&self, channel: &str, message: &str, style: Style);
    fn update_phase(&self, label: &str);
    fn update_round(&self, round: u8);
}

/// Forwards narration to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn notify(&self, channel: &str, message: &str, style: Style) {
        info!(channel, ?style, "{message}");
    }

    fn update_phase(&self, label: &str) {
        info!(phase = label, "phase changed");
    }

    fn update_round(&self, round: u8) {
        info!(round, "round started");
    }
}

/// Discards everything. Used by look-ahead clones.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn notify(&self, _channel: &str, _message: &str, _style: Style) {}
    fn update_phase(&self, _label: &str) {}
    fn update_round(&self, _round: u8) {}
}

/// Keeps every call as a line of text.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded lines so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn record(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl PresentationSink for RecordingSink {
    fn notify(&self, channel: &str, message: &str, style: Style) {
        self.record(format!("[{channel}] {style:?}: {message}"));
    }

    fn update_phase(&self, label: &str) {
        self.record(format!("phase {label}"));
    }

    fn update_round(&self, round: u8) {
        self.record(format!("round {round}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        sink.update_round(2);
        sink.update_phase("income");
        sink.notify("action", "P1 built", Style::Plain);
        assert_eq!(
            sink.lines(),
            vec!["round 2", "phase income", "[action] Plain: P1 built"]
        );
    }
}
