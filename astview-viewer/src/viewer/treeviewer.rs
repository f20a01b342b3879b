//! Tree viewer - displays and navigates the rendered tree
//!
//! The tree viewer shows one line per visible label of the latest render.
//! Users move the selection with Up/Down and open or close the selected label
//! with Left/Right/Enter. Toggling emits an event; the model owns the state.

use super::model::Model;
use super::viewer::{Viewer, ViewerEvent};
use astview_tree::formats::row_text;
use astview_tree::render::ExpansionKey;
use astview_tree::{Row, Toggle};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Tree viewer - displays and navigates the rendered tree
///
/// The selection is remembered by key, so it stays on the same label when the
/// tree is rebuilt; if that label disappears the selection falls back to the
/// row at the same position.
#[derive(Debug, Default)]
pub struct TreeViewer {
    selected: Option<ExpansionKey>,
    /// Row index of the selection at the last key press
    last_index: usize,
}

impl TreeViewer {
    /// Create a new tree viewer
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected key, if it is still rendered
    pub fn selected_key(&self) -> Option<&ExpansionKey> {
        self.selected.as_ref()
    }

    /// Row index of the selection within the model's current rows
    pub fn selected_index(&self, model: &Model) -> Option<usize> {
        let rows = model.rows();
        if rows.is_empty() {
            return None;
        }
        self.selected
            .as_ref()
            .and_then(|key| model.row_index(key))
            .or(Some(self.last_index.min(rows.len() - 1)))
    }

    /// Sync selection with the row the model reports it at
    pub fn select(&mut self, key: ExpansionKey, model: &Model) {
        if let Some(index) = model.row_index(&key) {
            self.last_index = index;
        }
        self.selected = Some(key);
    }

    fn select_index(&mut self, index: usize, model: &Model) -> Option<ViewerEvent> {
        let row = model.rows().get(index)?;
        self.last_index = index;
        self.selected = Some(row.key.clone());
        Some(ViewerEvent::SelectRow(row.key.clone()))
    }
}

impl Viewer for TreeViewer {
    fn render(&self, frame: &mut Frame, area: Rect, model: &Model) {
        let rows = model.rows();
        if rows.is_empty() {
            let placeholder = Paragraph::new("(no tree)")
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM));
            frame.render_widget(placeholder, area);
            return;
        }

        let selected = self.selected_index(model);
        let height = area.height as usize;
        // Keep the selection in view
        let scroll = selected
            .map(|index| index.saturating_sub(height.saturating_sub(1)))
            .unwrap_or(0);

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(index, row)| row_line(row, Some(index) == selected, area.width as usize))
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_key(&mut self, key: KeyEvent, model: &Model) -> Option<ViewerEvent> {
        let Some(current) = self.selected_index(model) else {
            return Some(ViewerEvent::NoChange);
        };
        let row = &model.rows()[current];

        match key.code {
            KeyCode::Up if current > 0 => self.select_index(current - 1, model),
            KeyCode::Down => self
                .select_index(current + 1, model)
                .or(Some(ViewerEvent::NoChange)),
            KeyCode::Home => self.select_index(0, model),
            KeyCode::End => self.select_index(model.rows().len() - 1, model),
            KeyCode::Left if row.toggle == Toggle::Open => Some(ViewerEvent::Toggle(row.key.clone())),
            KeyCode::Right if row.toggle == Toggle::Closed => {
                Some(ViewerEvent::Toggle(row.key.clone()))
            }
            KeyCode::Enter if row.toggle.is_toggleable() => {
                Some(ViewerEvent::Toggle(row.key.clone()))
            }
            KeyCode::Char('v') => Some(ViewerEvent::ToggleVariant),
            _ => Some(ViewerEvent::NoChange),
        }
    }
}

/// One tree line: indentation, label, and the snippet dimmed after it
fn row_line(row: &Row, highlighted: bool, width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.level);
    let label = row_text(row);
    let used = indent.chars().count() + label.chars().count();

    let mut spans = vec![Span::raw(indent)];
    let label_style = match (highlighted, row.active) {
        (true, _) => Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (false, false) if row.toggle == Toggle::Closed => {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        }
        (false, false) => Style::default(),
    };
    spans.push(Span::styled(label, label_style));

    if let Some(snippet) = row.snippet.as_deref() {
        // First line only, truncated to the remaining width
        let room = width.saturating_sub(used + 2);
        let first_line = snippet.lines().next().unwrap_or("");
        if room > 0 && !first_line.is_empty() {
            let text: String = first_line.chars().take(room).collect();
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                text,
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    Line::from(spans)
}
