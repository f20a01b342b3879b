//! Viewer module - trait, events, and main entry point
//!
//! The Viewer trait defines a common interface for UI components that:
//! - Render themselves given a model and area
//! - Handle keyboard input and return events
//!
//! This module also contains the main viewer application entry point.

use super::app::App;
use super::model::Model;
use super::ui;
use super::watch::FileWatch;
use astview_config::AstviewConfig;
use astview_tree::render::ExpansionKey;
use astview_tree::tree::TreeFormat;
use astview_tree::workbench::{
    CommandParser, CommandTransformer, Parser, Session, SessionTiming, Transformer,
    TreeFileParser,
};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::layout::Rect;
use ratatui::prelude::{CrosstermBackend, Terminal};
use ratatui::Frame;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Events that can be emitted by viewers
///
/// These represent model changes that should be applied after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Select a row of the tree pane
    SelectRow(ExpansionKey),
    /// Open or close a label
    Toggle(ExpansionKey),
    /// Switch between all fields and the filtered fields
    ToggleVariant,
    /// The rule cursor moved to this character offset
    MoveRuleCursor(usize),
    /// No change to model
    NoChange,
}

/// Trait for UI viewers
///
/// A viewer is a component that:
/// - Knows how to render itself given a model
/// - Knows how to interpret keyboard input
/// - Emits ViewerEvents when user interactions require model changes
pub trait Viewer {
    /// Render this viewer to the given area
    fn render(&self, frame: &mut Frame, area: Rect, model: &Model);

    /// Handle a keyboard event and return the resulting event
    fn handle_key(&mut self, key: KeyEvent, model: &Model) -> Option<ViewerEvent>;
}

/// What to open
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub source: PathBuf,
    pub rule: Option<PathBuf>,
    /// The source file is a serialized tree, not program text
    pub tree_input: bool,
}

/// Run the viewer for the given files
pub fn run_viewer(options: ViewerOptions, config: &AstviewConfig) -> io::Result<()> {
    let mut source_watch = FileWatch::new(options.source.clone());
    let source = source_watch.read()?;
    let mut rule_watch = options.rule.clone().map(FileWatch::new);
    let rule = match rule_watch.as_mut() {
        Some(watch) => watch.read()?,
        None => String::new(),
    };

    let session = open_session(&options, config, source, rule)?;
    let mut model = Model::new(session, config.tree.display_rules());
    model.recompute(Instant::now());

    let title = options
        .source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();
    let mut app = App::new(model, title);

    // Setup terminal; raw mode is left on every return path from here
    enable_raw_mode()?;
    let _raw_mode = OnDrop(|| {
        if let Err(err) = disable_raw_mode() {
            tracing::warn!(error = %err, "failed to leave raw mode");
        }
    });
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut app, &mut source_watch, rule_watch.as_mut());

    // Restore terminal
    terminal.clear()?;
    terminal.show_cursor()?;

    result
}

/// Runs its closure when dropped
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}

/// Pick the parser and transformer from the options and configuration
fn open_session(
    options: &ViewerOptions,
    config: &AstviewConfig,
    source: String,
    rule: String,
) -> io::Result<Session> {
    let workbench = &config.workbench;
    let parser: Box<dyn Parser> = if options.tree_input {
        Box::new(TreeFileParser::new(TreeFormat::from_path(&options.source)))
    } else if let Some(command) = &workbench.parser_command {
        Box::new(CommandParser::new(command.clone()))
    } else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no parser configured: pass --tree or set workbench.parser_command",
        ));
    };
    let transformer = workbench
        .transform_command
        .as_ref()
        .map(|command| Box::new(CommandTransformer::new(command.clone())) as Box<dyn Transformer>);

    tracing::info!(
        source = %options.source.display(),
        parser = ?workbench.parser_command,
        transformer = ?workbench.transform_command,
        "opening workbench"
    );
    let timing = SessionTiming {
        debounce: workbench.debounce(),
        error_debounce: workbench.error_debounce(),
    };
    Ok(Session::new(parser, transformer, source, rule, timing))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    source_watch: &mut FileWatch,
    mut rule_watch: Option<&mut FileWatch>,
) -> io::Result<()> {
    loop {
        // Render the full UI every frame
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if app.should_quit {
                        return Ok(());
                    }
                }
                // On terminal resize, the next loop iteration will re-render with new dimensions
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        let now = Instant::now();
        if let Some(text) = source_watch.poll()? {
            app.model.edit_source(text, now);
        }
        if let Some(watch) = rule_watch.as_deref_mut() {
            if let Some(text) = watch.poll()? {
                tracing::debug!(path = %watch.path().display(), "rule reloaded");
                app.rule_changed(text, now);
            }
        }
        app.tick(now);
    }
}
