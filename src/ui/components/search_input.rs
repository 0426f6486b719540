use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::ui::renderfns::overlay_width;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by search input that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Search text changed (each keystroke; empty string on cancel)
  Changed(String),
  /// Overlay closed with Enter, the search text stays applied
  Submitted,
}

/// Search box opened with `/`
#[derive(Debug, Clone)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl Default for SearchInput {
  fn default() -> Self {
    Self::new()
  }
}

impl SearchInput {
  pub fn new() -> Self {
    Self {
      input: TextInput::new(),
      active: false,
    }
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Current search text
  pub fn query(&self) -> &str {
    self.input.value()
  }

  /// Open the overlay, keeping the current text for editing
  pub fn activate(&mut self) {
    self.active = true;
  }

  /// Handle a key event
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.activate();
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    let before = self.input.value().to_string();
    match self.input.handle_key(key) {
      InputResult::Submitted(_) => {
        self.active = false;
        KeyResult::Event(SearchEvent::Submitted)
      }
      InputResult::Cancelled => {
        self.active = false;
        self.input.clear();
        KeyResult::Event(SearchEvent::Changed(String::new()))
      }
      InputResult::Consumed if self.input.value() != before => {
        KeyResult::Event(SearchEvent::Changed(self.input.value().to_string()))
      }
      // Cursor movement and other keys stay inside the overlay
      InputResult::Consumed | InputResult::NotHandled => KeyResult::Handled,
    }
  }

  /// Render the search overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = overlay_width(area.width, 60, 30, 60);
    let height = 3.min(area.height);
    let overlay_area = Rect::new(area.x, area.y, width, height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Search ");

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let value = self.input.value();
    let split = value
      .char_indices()
      .nth(self.input.cursor_position())
      .map(|(i, _)| i)
      .unwrap_or(value.len());
    let (before, after) = value.split_at(split);

    let input_line = Line::from(vec![
      Span::styled("/", Style::default().fg(Color::Yellow)),
      Span::raw(before),
      Span::styled("_", Style::default().fg(Color::Yellow)), // Cursor
      Span::raw(after),
    ]);
    frame.render_widget(Paragraph::new(input_line), inner);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  #[test]
  fn test_slash_activates() {
    let mut search = SearchInput::new();
    assert_eq!(search.handle_key(key(KeyCode::Char('x'))), KeyResult::NotHandled);
    assert_eq!(search.handle_key(key(KeyCode::Char('/'))), KeyResult::Handled);
    assert!(search.is_active());
  }

  #[test]
  fn test_every_keystroke_reports_change() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    assert_eq!(
      search.handle_key(key(KeyCode::Char('p'))),
      KeyResult::Event(SearchEvent::Changed("p".to_string()))
    );
    assert_eq!(
      search.handle_key(key(KeyCode::Char('h'))),
      KeyResult::Event(SearchEvent::Changed("ph".to_string()))
    );
    assert_eq!(
      search.handle_key(key(KeyCode::Backspace)),
      KeyResult::Event(SearchEvent::Changed("p".to_string()))
    );
    assert_eq!(search.handle_key(key(KeyCode::Left)), KeyResult::Handled);
  }

  #[test]
  fn test_submit_keeps_query() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('a')));
    assert_eq!(
      search.handle_key(key(KeyCode::Enter)),
      KeyResult::Event(SearchEvent::Submitted)
    );
    assert!(!search.is_active());
    assert_eq!(search.query(), "a");
  }

  #[test]
  fn test_cancel_clears_query() {
    let mut search = SearchInput::new();
    search.handle_key(key(KeyCode::Char('/')));
    search.handle_key(key(KeyCode::Char('a')));
    assert_eq!(
      search.handle_key(key(KeyCode::Esc)),
      KeyResult::Event(SearchEvent::Changed(String::new()))
    );
    assert_eq!(search.query(), "");
  }

  #[test]
  fn test_overlay_draws_cursor_in_place() {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    let mut search = SearchInput::new();
    for code in [
      KeyCode::Char('/'),
      KeyCode::Char('é'),
      KeyCode::Char('b'),
      KeyCode::Left,
    ] {
      search.handle_key(key(code));
    }

    let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
    terminal
      .draw(|frame| {
        let area = frame.area();
        search.render_overlay(frame, area)
      })
      .unwrap();
    let text: String = terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect();
    assert!(text.contains("/é_b"));
  }
}
