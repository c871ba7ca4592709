//! Colors and styles for the picker

use ratatui::prelude::*;

pub const PROMPT_MARK: Color = Color::Green;
pub const PROMPT_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
pub const HIGHLIGHT_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const HIGHLIGHT_SYMBOL: &str = "❯ ";
pub const NOTE_STYLE: Style = Style::new().add_modifier(Modifier::ITALIC);
pub const LINK_COLOR: Color = Color::DarkGray;
pub const MUTED: Color = Color::DarkGray;
pub const KEY_COLOR: Color = Color::Cyan;
