pub mod app;
pub mod choices;
pub mod theme;
pub mod ui;

pub use app::SelectApp;
pub use choices::{build_choices, Choice, ChoiceValue};

use anyhow::{Context, Result};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{DefaultTerminal, TerminalOptions, Viewport};
use tracing::debug;

use crate::cancel::{Cancellation, KeyListener};

/// Most rows shown at once; longer lists scroll
pub const PAGE_SIZE: usize = 100;

/// Single-choice prompt over a list of rows
#[async_trait]
pub trait Selector: Send {
    /// Returns None when the user cancelled
    async fn select(
        &mut self,
        prompt: &str,
        choices: Vec<Choice>,
        cancel: &Cancellation,
    ) -> Result<Option<ChoiceValue>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Submit,
    Cancel,
}

pub fn handle_key_event(app: &mut SelectApp, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Cancel,

        KeyCode::Enter => KeyAction::Submit,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.next_row();
            KeyAction::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.previous_row();
            KeyAction::None
        }
        KeyCode::Home => {
            app.first_row();
            KeyAction::None
        }
        KeyCode::End => {
            app.last_row();
            KeyAction::None
        }
        KeyCode::PageDown => {
            app.page_down();
            KeyAction::None
        }
        KeyCode::PageUp => {
            app.page_up();
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Rows the inline viewport needs: prompt + list + hints
fn viewport_height(choice_count: usize) -> u16 {
    (choice_count.min(PAGE_SIZE) + 2) as u16
}

/// Interactive picker drawn inline below the cursor.
///
/// Reads keys from the run-wide [`KeyListener`] and stops it once a row
/// is picked, so later git subprocesses get the terminal to themselves.
pub struct TerminalSelector {
    listener: KeyListener,
}

impl TerminalSelector {
    pub fn new(listener: KeyListener) -> Self {
        Self { listener }
    }

    async fn drive(
        &mut self,
        terminal: &mut DefaultTerminal,
        app: &mut SelectApp,
        cancel: &Cancellation,
    ) -> Result<bool> {
        loop {
            terminal.draw(|frame| ui::draw(frame, app))?;

            let Some(key) = self.listener.next_key().await else {
                return Ok(false);
            };
            if cancel.is_cancelled() {
                return Ok(false);
            }
            match handle_key_event(app, key) {
                KeyAction::Submit if app.selected_choice().is_some() => return Ok(true),
                KeyAction::Cancel => {
                    cancel.cancel();
                    return Ok(false);
                }
                _ => {}
            }
        }
    }
}

#[async_trait]
impl Selector for TerminalSelector {
    async fn select(
        &mut self,
        prompt: &str,
        choices: Vec<Choice>,
        cancel: &Cancellation,
    ) -> Result<Option<ChoiceValue>> {
        if cancel.is_cancelled() || choices.is_empty() {
            return Ok(None);
        }

        let options = TerminalOptions {
            viewport: Viewport::Inline(viewport_height(choices.len())),
        };
        let mut terminal = match ratatui::try_init_with_options(options) {
            Ok(terminal) => terminal,
            Err(e) => {
                ratatui::restore();
                return Err(e).context("Failed to set up the terminal for the picker");
            }
        };

        let dropped = self.listener.discard_pending();
        if dropped > 0 {
            debug!(dropped, "ignored keys typed before the picker opened");
        }
        if cancel.is_cancelled() {
            ratatui::restore();
            self.listener.stop();
            return Ok(None);
        }

        // Hold log lines while the list owns the screen
        crate::stderr_buffer::activate();

        let mut app = SelectApp::new(prompt, choices);

        let picked = self.drive(&mut terminal, &mut app, cancel).await;
        let cleared = terminal.clear().context("Failed to clear the picker");

        ratatui::restore();
        self.listener.stop();

        for msg in crate::stderr_buffer::drain() {
            eprintln!("{}", msg);
        }

        let picked = picked?;
        cleared?;
        if !picked {
            debug!("selection cancelled");
            return Ok(None);
        }

        Ok(app.into_selected().map(|(label, value)| {
            crate::output::print_answer(prompt, &label);
            value
        }))
    }
}
