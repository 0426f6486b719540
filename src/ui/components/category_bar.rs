use super::KeyResult;
use crate::shop::catalog::capitalize;
use crate::ui::renderfns::truncate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;

/// Category selector: an "All" tab followed by one tab per catalog category.
#[derive(Debug, Clone, Default)]
pub struct CategoryBar {
  categories: Vec<String>,
  selected: usize, // 0 = All, 1+ = index into categories
}

impl CategoryBar {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append one option per category after the "All" option
  pub fn populate(&mut self, categories: Vec<String>) {
    self.categories.extend(categories);
  }

  #[cfg(test)]
  pub fn categories(&self) -> &[String] {
    &self.categories
  }

  /// Raw category value, None when "All" is selected
  pub fn selected_value(&self) -> Option<&str> {
    match self.selected {
      0 => None,
      n => self.categories.get(n - 1).map(String::as_str),
    }
  }

  /// Handle a key event; emits `()` when the selection moved
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<()> {
    if self.categories.is_empty() {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Tab | KeyCode::PageDown => {
        self.navigate(1);
        KeyResult::Event(())
      }
      KeyCode::BackTab | KeyCode::PageUp => {
        self.navigate(-1);
        KeyResult::Event(())
      }
      _ => KeyResult::NotHandled,
    }
  }

  /// Navigate tabs with wrapping
  fn navigate(&mut self, direction: i32) {
    // Total tabs = "All" + categories
    let total_tabs = self.categories.len() + 1;

    self.selected = if direction > 0 {
      (self.selected + 1) % total_tabs
    } else if self.selected == 0 {
      total_tabs - 1
    } else {
      self.selected - 1
    };
  }

  /// Tab spans, for composing with the other controls on one line
  pub fn spans(&self) -> Vec<Span<'static>> {
    let tab_style = |selected: bool| {
      if selected {
        Style::default().fg(Color::Black).bg(Color::Cyan)
      } else {
        Style::default().fg(Color::Gray)
      }
    };

    let mut spans = vec![
      Span::styled("[Category] ", Style::default().fg(Color::Yellow)),
      Span::styled(" All ", tab_style(self.selected == 0)),
    ];

    for (idx, category) in self.categories.iter().enumerate() {
      spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
      spans.push(Span::styled(
        format!(" {} ", truncate(&capitalize(category), 18)),
        tab_style(self.selected == idx + 1),
      ));
    }

    spans
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn bar() -> CategoryBar {
    let mut bar = CategoryBar::new();
    bar.populate(vec!["electronics".to_string(), "jewelery".to_string()]);
    bar
  }

  #[test]
  fn test_starts_on_all() {
    assert_eq!(bar().selected_value(), None);
  }

  #[test]
  fn test_empty_bar_ignores_keys() {
    let mut bar = CategoryBar::new();
    assert_eq!(bar.handle_key(key(KeyCode::Tab)), KeyResult::NotHandled);
  }

  #[test]
  fn test_tab_cycles_and_wraps() {
    let mut bar = bar();
    assert_eq!(bar.handle_key(key(KeyCode::Tab)), KeyResult::Event(()));
    assert_eq!(bar.selected_value(), Some("electronics"));
    bar.handle_key(key(KeyCode::Tab));
    assert_eq!(bar.selected_value(), Some("jewelery"));
    bar.handle_key(key(KeyCode::Tab));
    assert_eq!(bar.selected_value(), None);
    bar.handle_key(key(KeyCode::BackTab));
    assert_eq!(bar.selected_value(), Some("jewelery"));
  }

  #[test]
  fn test_labels_capitalized_values_raw() {
    let bar = bar();
    let text: String = bar.spans().iter().map(|s| s.content.to_string()).collect();
    assert!(text.contains(" Electronics "));
    assert!(text.contains(" Jewelery "));
    assert_eq!(bar.categories(), &["electronics", "jewelery"]);
  }
}
