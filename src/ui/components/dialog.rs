use super::KeyResult;
use crate::ui::renderfns::overlay_width;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// What a confirmation prompt is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
  Checkout,
}

/// Events emitted by the dialog that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
  /// Alert acknowledged
  Dismissed,
  Confirmed(ConfirmAction),
  Declined(ConfirmAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DialogKind {
  Alert,
  Confirm(ConfirmAction),
}

/// Blocking message box. While shown it swallows every key.
#[derive(Debug, Clone, Default)]
pub struct Dialog {
  current: Option<(DialogKind, String)>,
}

impl Dialog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.current.is_some()
  }

  #[cfg(test)]
  pub fn is_confirm(&self) -> bool {
    matches!(self.current, Some((DialogKind::Confirm(_), _)))
  }

  #[cfg(test)]
  pub fn message(&self) -> Option<&str> {
    self.current.as_ref().map(|(_, message)| message.as_str())
  }

  /// Show an informational message
  pub fn alert(&mut self, message: impl Into<String>) {
    self.current = Some((DialogKind::Alert, message.into()));
  }

  /// Ask a yes/no question about `action`
  pub fn confirm(&mut self, message: impl Into<String>, action: ConfirmAction) {
    self.current = Some((DialogKind::Confirm(action), message.into()));
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<DialogEvent> {
    let Some((kind, _)) = &self.current else {
      return KeyResult::NotHandled;
    };

    let event = match (kind, key.code) {
      (DialogKind::Alert, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
        DialogEvent::Dismissed
      }
      (DialogKind::Confirm(action), KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y')) => {
        DialogEvent::Confirmed(*action)
      }
      (DialogKind::Confirm(action), KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N')) => {
        DialogEvent::Declined(*action)
      }
      _ => return KeyResult::Handled,
    };

    self.current = None;
    KeyResult::Event(event)
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let Some((kind, message)) = &self.current else {
      return;
    };

    let width = overlay_width(area.width, 50, 36, 64);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let text_lines = message.chars().count().div_ceil(text_width).max(1) as u16;
    let height = (text_lines + 4).min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay_area);

    let (title, hint) = match kind {
      DialogKind::Alert => (" Notice ", "<Enter> OK"),
      DialogKind::Confirm(_) => (" Confirm ", "<y> yes   <n> no"),
    };

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Magenta))
      .title(title);

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let lines = vec![
      Line::from(message.as_str()),
      Line::from(""),
      Line::from(Span::styled(hint, Style::default().fg(Color::Cyan))),
    ];
    let paragraph = Paragraph::new(lines)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
  }
}
