use ratatui::prelude::Rect;

/// Truncate a string to at most `max_len` characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Width of an overlay as a percentage of `total`, bounded by `min`/`max`
/// and never wider than `total`
pub fn overlay_width(total: u16, percent: u16, min: u16, max: u16) -> u16 {
  let scaled = (u32::from(total) * u32::from(percent) / 100) as u16;
  scaled.max(min).min(max).min(total)
}

/// Rectangle centered in `area` taking the given percentages of its size
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
  let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
  let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
  Rect::new(
    area.x + (area.width - width) / 2,
    area.y + (area.height - height) / 2,
    width,
    height,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Élégant écharpe", 8), "Élég...");
  }

  #[test]
  fn test_overlay_width_bounds() {
    assert_eq!(overlay_width(200, 60, 30, 60), 60);
    assert_eq!(overlay_width(40, 60, 30, 60), 30);
    assert_eq!(overlay_width(20, 60, 30, 60), 20);
  }

  #[test]
  fn test_centered_rect() {
    let rect = centered_rect(Rect::new(0, 0, 100, 40), 50, 50);
    assert_eq!(rect, Rect::new(25, 10, 50, 20));
  }
}
