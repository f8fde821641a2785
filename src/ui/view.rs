//! What the dashboard shows, and how it is laid out.

use std::collections::VecDeque;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, List, ListItem, Paragraph, Row, Table};
use ratatui::Frame;

use super::Phase;
use crate::writer::ConvertSummary;

/// Messages kept for the bottom panel
const MESSAGE_LIMIT: usize = 200;

/// Position inside the table (or vendor file) being processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProgress {
    pub table: String,
    pub done: u64,
    pub total: u64,
}

impl TableProgress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        }
    }
}

/// One line of the counts table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub table: &'static str,
    pub written: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Per-table counts of a conversion, in write order
pub fn table_counts(summary: &ConvertSummary) -> [TableCounts; 2] {
    [
        TableCounts {
            table: "organizations",
            written: summary.organizations,
            skipped: summary.organizations_skipped,
            failed: summary.organizations_failed,
        },
        TableCounts {
            table: "operators",
            written: summary.operators,
            skipped: summary.skipped,
            failed: summary.failed,
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub phase: Phase,
    /// Data directory, download origin or output database
    pub location: String,
    pub progress: Option<TableProgress>,
    pub counts: ConvertSummary,
    messages: VecDeque<String>,
}

impl DashboardState {
    pub fn push_message(&mut self, message: impl Into<String>) {
        if self.messages.len() == MESSAGE_LIMIT {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.messages.iter().map(String::as_str)
    }

    /// Name of the lore table currently being written, if any
    pub fn active_table(&self) -> Option<&str> {
        self.progress
            .as_ref()
            .map(|p| p.table.as_str())
            .filter(|t| table_counts(&self.counts).iter().any(|c| c.table == *t))
    }
}

pub fn render(frame: &mut Frame, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(frame.area());

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(20)])
        .split(rows[1]);

    render_header(frame, rows[0], state);
    render_counts(frame, middle[0], state);
    render_progress(frame, middle[1], state);
    render_messages(frame, rows[2], state);
}

fn border() -> Style {
    Style::default().fg(Color::Blue)
}

fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let phase_style = match state.phase {
        Phase::Complete => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::Cyan),
    }
    .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(Span::styled(format!(" {}", state.phase), phase_style)),
        Line::from(Span::styled(
            format!(" {}", state.location),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Arknights lore to SQLite ")
        .border_style(border());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_counts(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let active = state.active_table();
    let rows = table_counts(&state.counts).map(|c| {
        let style = if Some(c.table) == active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let failed = Cell::from(c.failed.to_string()).style(if c.failed > 0 {
            Style::default().fg(Color::Red)
        } else {
            style
        });
        Row::new(vec![
            Cell::from(c.table),
            Cell::from(c.written.to_string()),
            Cell::from(c.skipped.to_string()),
            failed,
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["table", "written", "skipped", "failed"])
            .style(Style::default().fg(Color::Cyan)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Rows ").border_style(border()));

    frame.render_widget(table, area);
}

fn render_progress(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Current ")
        .border_style(border());

    let Some(progress) = &state.progress else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let label = format!(
        "{} {}/{} ({:.0}%)",
        progress.table,
        progress.done,
        progress.total,
        progress.ratio() * 100.0
    );
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(progress.ratio())
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_messages(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.messages.len().saturating_sub(visible);

    let items: Vec<ListItem> = state
        .messages()
        .skip(start)
        .map(|m| {
            let style = if m.starts_with("Skipped") || m.starts_with("Failed") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Span::styled(format!(" {}", m), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Messages ")
        .border_style(border());
    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_counts_follow_summary() {
        let summary = ConvertSummary {
            organizations: 3,
            organizations_skipped: 1,
            organizations_failed: 0,
            operators: 40,
            skipped: 12,
            failed: 2,
        };
        let [orgs, ops] = table_counts(&summary);
        assert_eq!((orgs.table, orgs.written, orgs.skipped), ("organizations", 3, 1));
        assert_eq!((ops.table, ops.written, ops.failed), ("operators", 40, 2));
    }

    #[test]
    fn test_messages_are_bounded() {
        let mut state = DashboardState::default();
        for i in 0..MESSAGE_LIMIT + 5 {
            state.push_message(format!("Skipped char_{}", i));
        }
        assert_eq!(state.messages().len(), MESSAGE_LIMIT);
        assert_eq!(state.messages().next(), Some("Skipped char_5"));
    }

    #[test]
    fn test_active_table_ignores_downloads() {
        let mut state = DashboardState::default();
        state.progress = Some(TableProgress {
            table: "character_table.json".into(),
            done: 10,
            total: 100,
        });
        assert_eq!(state.active_table(), None);

        state.progress = Some(TableProgress {
            table: "operators".into(),
            done: 0,
            total: 0,
        });
        assert_eq!(state.active_table(), Some("operators"));
        assert_eq!(state.progress.as_ref().map(TableProgress::ratio), Some(0.0));
    }
}
