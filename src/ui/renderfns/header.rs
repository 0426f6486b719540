use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Position of the cart indicator among the header spans
const CART_SPAN: usize = 4;

/// Draw the header bar with store title, cart count and shortcuts.
/// Returns the area covered by the cart indicator.
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str, cart_count: usize) -> Rect {
  let spans = header_spans(title, cart_count);
  let indicator = span_area(area, &spans, CART_SPAN);

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);

  indicator
}

fn header_spans(title: &str, cart_count: usize) -> Vec<Span<'static>> {
  vec![
    Span::styled(" storefront ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", title), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", cart_label(cart_count)),
      Style::default().fg(Color::Yellow).bold(),
    ),
    Span::raw("  "),
    // Shortcuts - keys highlighted, descriptions dimmed
    Span::styled("<c>", Style::default().fg(Color::Cyan)),
    Span::styled(" cart", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("</>", Style::default().fg(Color::Cyan)),
    Span::styled(" search", Style::default().fg(Color::DarkGray)),
    Span::raw("   "),
    Span::styled("<q>", Style::default().fg(Color::Cyan)),
    Span::styled(" quit", Style::default().fg(Color::DarkGray)),
  ]
}

/// Screen area of `spans[idx]` on a single-line paragraph, clipped to `area`
fn span_area(area: Rect, spans: &[Span], idx: usize) -> Rect {
  let offset: usize = spans.iter().take(idx).map(Span::width).sum();
  let width = spans.get(idx).map(Span::width).unwrap_or(0);

  let x = area.x.saturating_add(offset.min(u16::MAX as usize) as u16);
  let width = width.min(u16::MAX as usize) as u16;
  Rect::new(x, area.y, width, area.height.min(1)).intersection(area)
}

/// Cart indicator text
fn cart_label(count: usize) -> String {
  format!("Cart [{}]", count)
}
