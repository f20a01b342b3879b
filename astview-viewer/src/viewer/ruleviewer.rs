//! Rule viewer - displays the rule text with a movable cursor
//!
//! The rule text is edited in an external editor and reloaded when the file
//! changes. The cursor here only decides which node kind is active: when it
//! moves, the viewer emits a MoveRuleCursor event with the character offset.

use super::model::Model;
use super::viewer::{Viewer, ViewerEvent};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Rule viewer - cursor over the rule text held by the session
#[derive(Debug, Default)]
pub struct RuleViewer {
    /// Current cursor row (0-indexed)
    cursor_row: usize,
    /// Current cursor column in characters (0-indexed)
    cursor_col: usize,
}

impl RuleViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current cursor position
    pub fn cursor_position(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Character offset of the cursor in `text`
    pub fn cursor_offset(&self, text: &str) -> usize {
        let before: usize = text
            .split('\n')
            .take(self.cursor_row)
            .map(|line| line.chars().count() + 1)
            .sum();
        before + self.cursor_col
    }

    /// Keep the cursor inside new text after a reload
    pub fn clamp_to(&mut self, text: &str) {
        let lines = lines(text);
        self.cursor_row = self.cursor_row.min(lines.len().saturating_sub(1));
        self.clamp_cursor_column(&lines);
    }

    fn move_cursor(&mut self, code: KeyCode, text: &str) {
        let lines = lines(text);
        match code {
            KeyCode::Up => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
                self.clamp_cursor_column(&lines);
            }
            KeyCode::Down => {
                if self.cursor_row + 1 < lines.len() {
                    self.cursor_row += 1;
                    self.clamp_cursor_column(&lines);
                }
            }
            KeyCode::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_len(&lines, self.cursor_row);
                }
            }
            KeyCode::Right => {
                if self.cursor_col < line_len(&lines, self.cursor_row) {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            KeyCode::Home => self.cursor_col = 0,
            KeyCode::End => self.cursor_col = line_len(&lines, self.cursor_row),
            _ => {}
        }
    }

    /// Clamp cursor column to valid range for current line
    fn clamp_cursor_column(&mut self, lines: &[&str]) {
        self.cursor_col = self.cursor_col.min(line_len(lines, self.cursor_row));
    }
}

fn lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

fn line_len(lines: &[&str], row: usize) -> usize {
    lines.get(row).map(|line| line.chars().count()).unwrap_or(0)
}

impl Viewer for RuleViewer {
    fn render(&self, frame: &mut Frame, area: Rect, model: &Model) {
        let text = model.session().rule();
        let height = area.height as usize;
        let scroll = self.cursor_row.saturating_sub(height.saturating_sub(1));
        let cursor_style = Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);

        let lines: Vec<Line> = text
            .split('\n')
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(row_idx, line_text)| {
                if row_idx != self.cursor_row {
                    return Line::from(line_text.to_string());
                }
                let chars: Vec<char> = line_text.chars().collect();
                let mut spans = Vec::new();
                let before: String = chars.iter().take(self.cursor_col).collect();
                spans.push(Span::raw(before));
                match chars.get(self.cursor_col) {
                    Some(ch) => {
                        spans.push(Span::styled(ch.to_string(), cursor_style));
                        let after: String = chars.iter().skip(self.cursor_col + 1).collect();
                        spans.push(Span::raw(after));
                    }
                    // Cursor at end of line
                    None => spans.push(Span::styled(" ", cursor_style)),
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_key(&mut self, key: KeyEvent, model: &Model) -> Option<ViewerEvent> {
        let text = model.session().rule();
        match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => {
                let before = self.cursor_position();
                self.move_cursor(key.code, text);
                if self.cursor_position() == before {
                    Some(ViewerEvent::NoChange)
                } else {
                    Some(ViewerEvent::MoveRuleCursor(self.cursor_offset(text)))
                }
            }
            _ => Some(ViewerEvent::NoChange),
        }
    }
}
