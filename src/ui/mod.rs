pub mod components;
pub mod renderfns;

use crate::app::App;
use crate::cart::KeyValueStorage;
use ratatui::prelude::*;
use ratatui::widgets::{ListState, Paragraph};

/// Main draw function
pub fn draw<S: KeyValueStorage>(frame: &mut Frame, app: &mut App<S>) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Length(1), // Category / sort controls
      Constraint::Min(1),    // Products
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  app.cart_indicator = Some(renderfns::draw_header(
    frame,
    chunks[0],
    &app.title,
    app.cart.len(),
  ));
  draw_controls(frame, chunks[1], app);

  app.grid.render(frame, chunks[2]);
  app.search.render_overlay(frame, chunks[2]);

  let hints: &[(&str, &str)] = if app.modal.is_visible() {
    &[("Enter", "checkout"), ("j/k", "scroll"), ("Esc", "close")]
  } else {
    &[
      ("j/k", "nav"),
      ("Enter", "add to cart"),
      ("Tab", "category"),
      ("s", "sort"),
      ("/", "search"),
      ("c", "cart"),
      ("q", "quit"),
    ]
  };
  renderfns::draw_footer(frame, chunks[3], hints, app.status.as_deref());

  let area = frame.area();
  app
    .modal
    .render_overlay(frame, area, app.cart.items(), app.cart.total());
  app.dialog.render_overlay(frame, area);
}

fn draw_controls<S: KeyValueStorage>(frame: &mut Frame, area: Rect, app: &App<S>) {
  let mut spans = app.categories.spans();
  spans.push(Span::raw("   "));
  spans.push(Span::styled("[Sort] ", Style::default().fg(Color::Yellow)));
  spans.push(Span::raw(app.sort.label()));

  if !app.search.query().is_empty() && !app.search.is_active() {
    spans.push(Span::raw("   "));
    spans.push(Span::styled("[Search] ", Style::default().fg(Color::Yellow)));
    spans.push(Span::styled(
      app.search.query().to_string(),
      Style::default().fg(Color::Cyan),
    ));
  }

  frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Keep a list selection inside `0..len`, selecting the first row when
/// nothing is selected
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  match state.selected() {
    _ if len == 0 => state.select(None),
    None => state.select(Some(0)),
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    Some(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_valid_selection() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(0));

    state.select(Some(7));
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(2));

    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }
}
