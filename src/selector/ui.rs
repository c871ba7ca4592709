use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

use crate::selector::app::SelectApp;
use crate::selector::choices::{Choice, ChoiceValue};
use crate::selector::theme;

pub fn draw(frame: &mut Frame, app: &mut SelectApp) {
    let area = frame.area();

    // Layout: Prompt(1) + List(fill) + Hints(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_prompt(frame, chunks[0], app);
    render_list(frame, chunks[1], app);
    render_hints(frame, chunks[2]);
}

fn render_prompt(frame: &mut Frame, area: Rect, app: &SelectApp) {
    let line = Line::from(vec![
        Span::styled("? ", Style::default().fg(theme::PROMPT_MARK).bold()),
        Span::styled(app.prompt.clone(), theme::PROMPT_STYLE),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn choice_line(choice: &Choice) -> Line<'_> {
    let mut spans = match choice.value {
        ChoiceValue::View(_) => vec![Span::styled(
            choice.label.as_str(),
            Style::default().fg(theme::LINK_COLOR),
        )],
        ChoiceValue::Checkout(_) => vec![Span::raw(choice.label.as_str())],
    };
    if let Some(note) = &choice.note {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(note.as_str(), theme::NOTE_STYLE));
    }
    Line::from(spans)
}

fn render_list(frame: &mut Frame, area: Rect, app: &mut SelectApp) {
    app.visible_rows = area.height as usize;

    let items: Vec<ListItem> = app
        .choices
        .iter()
        .map(|choice| ListItem::new(choice_line(choice)))
        .collect();

    let list = List::new(items)
        .highlight_style(theme::HIGHLIGHT_STYLE)
        .highlight_symbol(theme::HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hints = [("↑/↓", ":move "), ("Enter", ":select "), ("Esc", ":quit")];
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, Style::default().fg(theme::KEY_COLOR)),
                Span::styled(*desc, Style::default().fg(theme::MUTED)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
