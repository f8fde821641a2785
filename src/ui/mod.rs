//! Progress reporting for downloads and conversions.
//!
//! [`Dashboard`] is the full-screen view (`--tui`); [`LogUi`] sends the same
//! events to tracing and [`SilentUi`] drops them.

mod view;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::writer::ConvertSummary;
pub use view::{table_counts, DashboardState, TableCounts, TableProgress};

/// Application phases shown in the header
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Checking,
    Downloading,
    Loading,
    Converting,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Checking => write!(f, "Checking data cache"),
            Phase::Downloading => write!(f, "Downloading game data"),
            Phase::Loading => write!(f, "Loading source tables"),
            Phase::Converting => write!(f, "Writing lore database"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Receives progress from downloads and conversions
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
    /// Running totals after each record
    fn set_counts(&mut self, _counts: &ConvertSummary) {}
}

/// Full-screen view of a run
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: DashboardState,
}

impl Dashboard {
    /// Enter the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            state: DashboardState::default(),
        })
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        self.terminal.draw(|frame| view::render(frame, state))?;
        Ok(())
    }

    /// Show the final counts, wait for a key, then restore the terminal
    pub fn finish(mut self, summary: &ConvertSummary) -> Result<()> {
        self.state.phase = Phase::Complete;
        self.state.progress = None;
        self.state.counts = *summary;
        self.state.push_message(summary.to_string());
        self.state.push_message("Press any key to exit...");
        self.draw()?;

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        self.restore()
    }

    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Ui for Dashboard {
    fn set_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.draw().ok();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.state.location = info.into();
        self.draw().ok();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.state.progress = Some(TableProgress {
            table: label.into(),
            done: current,
            total,
        });
        self.draw().ok();
    }

    fn clear_progress(&mut self) {
        self.state.progress = None;
        self.draw().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.state.push_message(message);
        self.draw().ok();
    }

    // drawn with the next progress step
    fn set_counts(&mut self, counts: &ConvertSummary) {
        self.state.counts = *counts;
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Non-interactive UI: activity goes to the tracing subscriber
#[derive(Default)]
pub struct LogUi {
    last_label: String,
}

impl LogUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ui for LogUi {
    fn set_phase(&mut self, phase: Phase) {
        tracing::info!("{}", phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        tracing::info!("{}", info.into());
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let label = label.into();
        // One line per label change; per-item progress only at trace level
        if label != self.last_label {
            tracing::debug!(total, "{}", label);
            self.last_label = label;
        } else {
            tracing::trace!(current, total, "{}", label);
        }
    }

    fn clear_progress(&mut self) {
        self.last_label.clear();
    }

    fn log(&mut self, message: impl Into<String>) {
        tracing::info!("{}", message.into());
    }
}

/// Silent UI implementation for testing
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_ui_tracks_label_changes() {
        let mut ui = LogUi::new();
        ui.set_progress(1, 10, "operators");
        assert_eq!(ui.last_label, "operators");
        ui.clear_progress();
        assert!(ui.last_label.is_empty());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::default(), Phase::Checking);
        assert_eq!(Phase::Converting.to_string(), "Writing lore database");
    }
}
