//! UI rendering logic
//!
//! Handles layout and rendering of the application using Ratatui.
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Middle section (responsive height):
//!   - Tree viewer (left, fixed share of the width)
//!   - Rule, source and output panes stacked on the right
//! - Status line (1 line, fixed)

use super::app::App;
use super::model::Focus;
use super::viewer::Viewer;
use astview_tree::tree::Span as SourceSpan;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Minimum terminal width required for the UI
const MIN_TERMINAL_WIDTH: u16 = 60;
/// Share of the width given to the tree viewer
const TREE_VIEWER_PERCENT: u16 = 45;
/// Height of the status line
const STATUS_LINE_HEIGHT: u16 = 1;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Check minimum width
    if size.width < MIN_TERMINAL_WIDTH {
        render_error_too_narrow(frame, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title bar
            Constraint::Min(1),                     // Middle, fills the rest
            Constraint::Length(STATUS_LINE_HEIGHT), // Status line
        ])
        .split(size);

    render_title_bar(frame, chunks[0], &app.title);
    render_middle_section(frame, chunks[1], app);
    render_status_line(frame, chunks[2], app);
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "Terminal too narrow: {} < {} chars",
        area.width, MIN_TERMINAL_WIDTH
    );
    let paragraph =
        Paragraph::new(msg).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, title: &str) {
    let title = format!("astv:: {}", title);
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn render_middle_section(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(TREE_VIEWER_PERCENT),
            Constraint::Min(1),
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34), // Rule
            Constraint::Percentage(33), // Source
            Constraint::Min(3),         // Output
        ])
        .split(columns[1]);

    let tree_area = focused_block(frame, columns[0], "Tree", app.focus == Focus::TreeViewer);
    app.tree_viewer.render(frame, tree_area, &app.model);

    let rule_area = focused_block(frame, panes[0], "Rule", app.focus == Focus::RuleViewer);
    app.rule_viewer.render(frame, rule_area, &app.model);

    render_source(frame, panes[1], app);
    render_output(frame, panes[2], app);
}

/// Draw a bordered block and return its inner area
fn focused_block(frame: &mut Frame, area: Rect, name: &str, focused: bool) -> Rect {
    let title = if focused {
        format!("{} [FOCUSED]", name)
    } else {
        name.to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn render_source(frame: &mut Frame, area: Rect, app: &App) {
    let inner = focused_block(frame, area, "Source", false);
    let lines = highlighted_lines(app.model.session().source(), &app.model.source_highlights());
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_output(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.model.session();
    let inner = focused_block(frame, area, "Output", false);

    let paragraph = if let Some(error) = session.error() {
        Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
    } else if let Some(output) = session.output() {
        Paragraph::new(output.to_string())
    } else {
        let hint = if session.has_transformer() {
            "(no output yet)"
        } else {
            "(no transformer configured)"
        };
        Paragraph::new(hint).style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM))
    };
    frame.render_widget(paragraph, inner);
}

/// Split text into lines, highlighting the characters covered by `spans`.
///
/// Span offsets count UTF-16 code units, like the tree's `start`/`end`.
pub fn highlighted_lines(text: &str, spans: &[SourceSpan]) -> Vec<Line<'static>> {
    let highlight = Style::default().bg(Color::Yellow).fg(Color::Black);
    let covered = |offset: usize| spans.iter().any(|span| span.contains(offset));

    let mut lines = Vec::new();
    let mut offset = 0;
    for line_text in text.split('\n') {
        let mut parts: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_lit = false;
        for ch in line_text.chars() {
            let lit = covered(offset);
            if lit != run_lit && !run.is_empty() {
                parts.push(styled_run(std::mem::take(&mut run), run_lit, highlight));
            }
            run_lit = lit;
            run.push(ch);
            offset += ch.len_utf16();
        }
        if !run.is_empty() {
            parts.push(styled_run(run, run_lit, highlight));
        }
        // The newline itself
        offset += 1;
        lines.push(Line::from(parts));
    }
    lines
}

fn styled_run(text: String, lit: bool, highlight: Style) -> Span<'static> {
    if lit {
        Span::styled(text, highlight)
    } else {
        Span::raw(text)
    }
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::Yellow);
    let session = app.model.session();

    let mut parts = vec![
        Span::styled(
            match app.focus {
                Focus::TreeViewer => "Tree",
                Focus::RuleViewer => "Rule",
            },
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled("Fields: ", label),
        Span::raw(app.model.variant().to_string()),
        Span::raw(" | "),
        Span::styled("Active: ", label),
        Span::raw(app.model.active_kind().unwrap_or("-").to_string()),
    ];

    if let Some(index) = app.tree_viewer.selected_index(&app.model) {
        let path = app.model.rows()[index].key.path.key();
        parts.push(Span::raw(" | "));
        parts.push(Span::styled("Path: ", label));
        parts.push(Span::raw(if path.is_empty() {
            "(root)".to_string()
        } else {
            path
        }));
    }

    if session.is_pending() {
        parts.push(Span::raw(" | "));
        parts.push(Span::styled("recomputing...", Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(parts))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_highlighted_spans_follow_character_offsets() {
        let spans = [SourceSpan { start: 4, end: 5 }, SourceSpan { start: 13, end: 16 }];
        let lines = highlighted_lines("var a = 10;\nfoo(a)", &spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "var a = 10;");
        let lit: Vec<&str> = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.style.bg == Some(Color::Yellow))
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(lit, vec!["a", "oo("]);
    }

    #[test]
    fn test_highlight_offsets_count_utf16_units() {
        let lines = highlighted_lines("😀 a", &[SourceSpan { start: 3, end: 4 }]);
        let lit: Vec<&str> = lines[0]
            .spans
            .iter()
            .filter(|span| span.style.bg == Some(Color::Yellow))
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(lit, vec!["a"]);
    }

    #[test]
    fn test_no_spans_is_plain_text() {
        let lines = highlighted_lines("a\n\nb", &[]);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["a", "", "b"]);
    }
}
