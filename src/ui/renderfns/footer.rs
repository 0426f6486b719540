use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the footer with key hints, or a status message when one is set
pub fn draw_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], status: Option<&str>) {
  let line = match status {
    Some(message) => Line::from(Span::styled(
      format!(" {}", message),
      Style::default().fg(Color::Red),
    )),
    None => {
      let mut spans = vec![Span::raw(" ")];
      for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
          spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
          format!(":{}", label),
          Style::default().fg(Color::DarkGray),
        ));
      }
      Line::from(spans)
    }
  };

  let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}
