use ratatui::widgets::ListState;

use crate::selector::choices::{Choice, ChoiceValue};
use crate::selector::PAGE_SIZE;

/// Selection state of the picker
pub struct SelectApp {
    pub prompt: String,
    pub choices: Vec<Choice>,
    pub list_state: ListState,
    /// Rows the list showed on the last draw
    pub visible_rows: usize,
}

impl SelectApp {
    pub fn new(prompt: &str, choices: Vec<Choice>) -> Self {
        let mut list_state = ListState::default();
        if !choices.is_empty() {
            list_state.select(Some(0));
        }
        let visible_rows = choices.len().min(PAGE_SIZE);

        Self {
            prompt: prompt.to_string(),
            choices,
            list_state,
            visible_rows,
        }
    }

    pub fn next_row(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.choices.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.choices.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn first_row(&mut self) {
        if !self.choices.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn last_row(&mut self) {
        if !self.choices.is_empty() {
            self.list_state.select(Some(self.choices.len() - 1));
        }
    }

    pub fn page_down(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let step = self.visible_rows.max(1);
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state
            .select(Some((i + step).min(self.choices.len() - 1)));
    }

    pub fn page_up(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let step = self.visible_rows.max(1);
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(step)));
    }

    pub fn selected_choice(&self) -> Option<&Choice> {
        self.list_state
            .selected()
            .and_then(|i| self.choices.get(i))
    }

    /// Consume the app, returning the value of the highlighted row
    pub fn into_selected(self) -> Option<(String, ChoiceValue)> {
        let index = self.list_state.selected()?;
        self.choices
            .into_iter()
            .nth(index)
            .map(|choice| (choice.to_string(), choice.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Mode;
    use crate::selector::build_choices;
    use crate::testing::summary;

    fn app_with(n: u64) -> SelectApp {
        let prs: Vec<_> = (1..=n).map(|i| summary(i, &format!("PR {}", i), "bob")).collect();
        SelectApp::new("Select a PR to checkout", build_choices(&prs, Mode::Authored))
    }

    #[test]
    fn test_starts_on_first_row() {
        let app = app_with(2);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.selected_choice().unwrap().label, "[1] PR 1");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app_with(2); // 4 rows
        app.previous_row();
        assert_eq!(app.list_state.selected(), Some(3));
        app.next_row();
        assert_eq!(app.list_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn test_paging_clamps() {
        let mut app = app_with(3); // 6 rows
        app.visible_rows = 4;
        app.page_down();
        assert_eq!(app.list_state.selected(), Some(4));
        app.page_down();
        assert_eq!(app.list_state.selected(), Some(5));
        app.page_up();
        assert_eq!(app.list_state.selected(), Some(1));
        app.page_up();
        assert_eq!(app.list_state.selected(), Some(0));
        app.last_row();
        assert_eq!(app.list_state.selected(), Some(5));
        app.first_row();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_visible_rows_capped_at_page_size() {
        let app = app_with(80); // 160 rows
        assert_eq!(app.visible_rows, PAGE_SIZE);
    }

    #[test]
    fn test_into_selected_returns_view_url() {
        let mut app = app_with(1);
        app.next_row();
        let (label, value) = app.into_selected().unwrap();
        assert_eq!(label, "  -> view https://github.com/octo/widgets/pull/1");
        assert_eq!(
            value,
            ChoiceValue::View("https://github.com/octo/widgets/pull/1".to_string())
        );
    }

    #[test]
    fn test_empty_app_selects_nothing() {
        let mut app = SelectApp::new("Select", Vec::new());
        app.next_row();
        app.page_down();
        assert!(app.selected_choice().is_none());
        assert!(app.into_selected().is_none());
    }
}
