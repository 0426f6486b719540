use super::KeyResult;
use crate::cart::format_total;
use crate::shop::types::CartItem;
use crate::ui::renderfns::{centered_rect, truncate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

/// Events emitted by the cart modal that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartModalEvent {
  /// Checkout requested
  Checkout,
}

/// Cart summary overlay, either hidden or visible.
#[derive(Debug, Clone, Default)]
pub struct CartModal {
  visible: bool,
  list_state: ListState,
  /// Modal body from the last render, for backdrop hit-testing
  body: Option<Rect>,
}

impl CartModal {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_visible(&self) -> bool {
    self.visible
  }

  pub fn show(&mut self) {
    self.visible = true;
    self.list_state = ListState::default();
  }

  pub fn hide(&mut self) {
    self.visible = false;
    self.body = None;
  }

  /// Handle a key event while visible
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<CartModalEvent> {
    if !self.visible {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => {
        self.hide();
        KeyResult::Handled
      }
      KeyCode::Enter | KeyCode::Char('o') => KeyResult::Event(CartModalEvent::Checkout),
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
        KeyResult::Handled
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
        KeyResult::Handled
      }
      // Modal: nothing reaches the views behind it
      _ => KeyResult::Handled,
    }
  }

  /// Close when a click lands on the backdrop. Returns true if it closed.
  pub fn handle_click(&mut self, column: u16, row: u16) -> bool {
    if !self.visible {
      return false;
    }
    match self.body {
      Some(body) if body.contains(Position::new(column, row)) => false,
      _ => {
        self.hide();
        true
      }
    }
  }

  /// Render the dimmed backdrop and the modal body if visible
  pub fn render_overlay(&mut self, frame: &mut Frame, area: Rect, items: &[CartItem], total: f64) {
    if !self.visible {
      return;
    }

    frame
      .buffer_mut()
      .set_style(area, Style::default().add_modifier(Modifier::DIM));

    let body = centered_rect(area, 70, 70);
    self.body = Some(body);

    frame.render_widget(Clear, body);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(format!(" Cart ({}) ", items.len()))
      .title_alignment(Alignment::Center);

    let inner = block.inner(body);
    frame.render_widget(block, body);

    if inner.height < 3 {
      return;
    }

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Min(1),    // Items
        Constraint::Length(1), // Total
        Constraint::Length(1), // Hints
      ])
      .split(inner);

    if items.is_empty() {
      let paragraph =
        Paragraph::new("Your cart is empty.").style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, chunks[0]);
    } else {
      let title_width = inner.width.saturating_sub(14) as usize;
      let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
          ListItem::new(vec![
            Line::from(vec![
              Span::styled(
                format!("{:>10}", item.price),
                Style::default().fg(Color::Green),
              ),
              Span::raw("  "),
              Span::raw(truncate(&item.title, title_width)),
            ]),
            Line::from(Span::styled(
              format!("{:>12}{}", "", truncate(&item.image, title_width)),
              Style::default().fg(Color::DarkGray),
            )),
          ])
        })
        .collect();

      let list =
        List::new(list_items).highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
      frame.render_stateful_widget(list, chunks[0], &mut self.list_state);
    }

    let total_line = Line::from(vec![
      Span::styled("Total: ", Style::default().fg(Color::DarkGray)),
      Span::styled(
        format!("${}", format_total(total)),
        Style::default().fg(Color::Yellow).bold(),
      ),
    ]);
    frame.render_widget(Paragraph::new(total_line).alignment(Alignment::Right), chunks[1]);

    let hints = Line::from(vec![
      Span::styled("<Enter>", Style::default().fg(Color::Cyan)),
      Span::styled(" checkout   ", Style::default().fg(Color::DarkGray)),
      Span::styled("<Esc>", Style::default().fg(Color::Cyan)),
      Span::styled(" close", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
  }
}
