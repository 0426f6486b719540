use super::KeyResult;
use crate::shop::types::Product;
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::truncate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

/// Events emitted by the product grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
  /// Add-to-cart pressed on a card
  AddToCart(Product),
}

#[derive(Debug, Clone)]
enum GridContent {
  /// Placeholder text instead of cards (loading, load failure)
  Message(String),
  Cards(Vec<Product>),
}

/// Product display area: one card per product plus a detail pane for the
/// selected card.
#[derive(Debug, Clone)]
pub struct ProductGrid {
  content: GridContent,
  list_state: ListState,
}

impl Default for ProductGrid {
  fn default() -> Self {
    Self::new()
  }
}

impl ProductGrid {
  pub fn new() -> Self {
    Self {
      content: GridContent::Cards(Vec::new()),
      list_state: ListState::default(),
    }
  }

  /// Replace every card with the given products, in order
  pub fn render_products(&mut self, products: Vec<Product>) {
    self.content = GridContent::Cards(products);
    self.list_state = ListState::default();
  }

  /// Replace every card with a single message
  pub fn show_message(&mut self, message: impl Into<String>) {
    self.content = GridContent::Message(message.into());
    self.list_state = ListState::default();
  }

  pub fn cards(&self) -> &[Product] {
    match &self.content {
      GridContent::Cards(products) => products,
      GridContent::Message(_) => &[],
    }
  }

  pub fn message(&self) -> Option<&str> {
    match &self.content {
      GridContent::Message(message) => Some(message),
      GridContent::Cards(_) => None,
    }
  }

  pub fn selected_product(&self) -> Option<&Product> {
    let idx = self.list_state.selected().unwrap_or(0);
    self.cards().get(idx)
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<GridEvent> {
    let len = self.cards().len();
    if len == 0 {
      return KeyResult::NotHandled;
    }
    ensure_valid_selection(&mut self.list_state, len);

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
        KeyResult::Handled
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
        KeyResult::Handled
      }
      KeyCode::Char('g') | KeyCode::Home => {
        self.list_state.select_first();
        KeyResult::Handled
      }
      KeyCode::Char('G') | KeyCode::End => {
        self.list_state.select(Some(len - 1));
        KeyResult::Handled
      }
      KeyCode::Enter | KeyCode::Char('a') => match self.selected_product() {
        Some(product) => KeyResult::Event(GridEvent::AddToCart(product.clone())),
        None => KeyResult::Handled,
      },
      _ => KeyResult::NotHandled,
    }
  }

  pub fn render(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if let GridContent::Message(message) = &self.content {
      let paragraph = Paragraph::new(message.as_str())
        .block(block.title(" Products "))
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let len = self.cards().len();
    ensure_valid_selection(&mut self.list_state, len);

    let chunks = Layout::default()
      .direction(Direction::Horizontal)
      .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
      .split(area);

    let block = block
      .title(format!(" Products ({}) ", len))
      .title_alignment(Alignment::Center);

    if len == 0 {
      let paragraph = Paragraph::new("No products found.")
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, chunks[0]);
    } else {
      let title_width = chunks[0].width.saturating_sub(16) as usize;
      let items: Vec<ListItem> = self
        .cards()
        .iter()
        .map(|product| {
          let line = Line::from(vec![
            Span::styled(
              format!("{:>10}", product.display_price()),
              Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
            Span::raw(truncate(&product.title, title_width)),
          ]);
          ListItem::new(line)
        })
        .collect();

      let list = List::new(items)
        .block(block)
        .highlight_style(
          Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

      frame.render_stateful_widget(list, chunks[0], &mut self.list_state);
    }

    self.render_detail(frame, chunks[1]);
  }

  /// Detail pane; only the selected card's image is resolved
  fn render_detail(&self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .title(" Details ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));

    let Some(product) = self.selected_product() else {
      frame.render_widget(block, area);
      return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
      Line::from(Span::styled(
        product.title.clone(),
        Style::default().fg(Color::White).bold(),
      )),
      Line::from(Span::styled(
        product.display_price(),
        Style::default().fg(Color::Green),
      )),
      Line::from(""),
      Line::from(vec![
        Span::styled("Category: ", label),
        Span::raw(product.category.clone()),
      ]),
      Line::from(vec![
        Span::styled("Image:    ", label),
        Span::styled(product.image.clone(), Style::default().fg(Color::Cyan)),
      ]),
      Line::from(""),
      Line::from(product.description.clone()),
      Line::from(""),
      Line::from(vec![
        Span::styled("<Enter>", Style::default().fg(Color::Cyan)),
        Span::styled(" add to cart", label),
      ]),
    ];

    let paragraph = Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
  }
}
