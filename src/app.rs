use crate::cart::{format_total, CartStore, KeyValueStorage, SqliteStorage};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::query::{Query, QueryState};
use crate::shop::catalog::{Catalog, FilterCriteria, SortMode};
use crate::shop::client::CatalogClient;
use crate::shop::types::{CartItem, Product};
use crate::ui;
use crate::ui::components::{
  CartModal, CartModalEvent, CategoryBar, ConfirmAction, Dialog, DialogEvent, GridEvent,
  KeyResult, ProductGrid, SearchEvent, SearchInput,
};
use color_eyre::Result;
use crossterm::event::{
  DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
  MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::layout::Position;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::{error, info};

pub const LOADING_MESSAGE: &str = "Loading products...";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products. Please try again later.";
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty!";
pub const THANK_YOU_MESSAGE: &str = "Thank you for your purchase!";

/// Application state. Every handler reads and writes through these fields;
/// nothing lives at module scope.
pub struct App<S: KeyValueStorage = SqliteStorage> {
  pub(crate) title: String,

  /// Single-attempt catalog request
  catalog_query: Query<Vec<Product>>,
  /// Authoritative catalog, empty until the query succeeds
  catalog: Catalog,
  pub(crate) cart: CartStore<S>,

  // Controls feeding FilterCriteria
  pub(crate) categories: CategoryBar,
  pub(crate) sort: SortMode,
  pub(crate) search: SearchInput,

  // Components
  pub(crate) grid: ProductGrid,
  pub(crate) modal: CartModal,
  pub(crate) dialog: Dialog,

  /// Header cart indicator from the last render, for click hit-testing
  pub(crate) cart_indicator: Option<Rect>,

  /// Last error worth showing in the footer
  pub(crate) status: Option<String>,

  should_quit: bool,
}

impl App {
  pub fn new(config: &Config) -> Result<Self> {
    let client = CatalogClient::new(config)?;
    let storage = SqliteStorage::open(&config.storage_path()?)?;
    let cart = CartStore::load(storage);
    info!(url = %client.url(), items = cart.len(), "starting storefront");

    let catalog_query = Query::new(move || async move {
      client.fetch_products().await.map_err(|e| e.to_string())
    });

    Ok(Self::from_parts(config.title(), catalog_query, cart))
  }
}

impl<S: KeyValueStorage> App<S> {
  pub fn from_parts(
    title: &str,
    catalog_query: Query<Vec<Product>>,
    cart: CartStore<S>,
  ) -> Self {
    let mut grid = ProductGrid::new();
    grid.show_message(LOADING_MESSAGE);

    Self {
      title: title.to_string(),
      catalog_query,
      catalog: Catalog::default(),
      cart,
      categories: CategoryBar::new(),
      sort: SortMode::default(),
      search: SearchInput::new(),
      grid,
      modal: CartModal::new(),
      dialog: Dialog::new(),
      cart_indicator: None,
      status: None,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = self.event_loop(&mut terminal).await;

    // Cleanup terminal
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(100));

    self.catalog_query.fetch();

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Mouse(mouse) => self.handle_mouse(mouse),
      Event::Resize => {}
      Event::Tick => self.tick(),
    }
  }

  fn tick(&mut self) {
    if !self.catalog_query.poll() {
      return;
    }

    match self.catalog_query.state() {
      QueryState::Success(products) => {
        let products = products.clone();
        self.on_catalog_loaded(products);
      }
      QueryState::Error(e) => {
        let e = e.clone();
        self.on_catalog_failed(&e);
      }
      QueryState::Idle | QueryState::Loading => {}
    }
  }

  /// Install the catalog, build the category index and show everything
  pub(crate) fn on_catalog_loaded(&mut self, products: Vec<Product>) {
    info!(count = products.len(), "catalog ready");
    self.catalog = Catalog::new(products);
    self.categories.populate(self.catalog.categories());
    self.grid.render_products(self.catalog.products().to_vec());
  }

  pub(crate) fn on_catalog_failed(&mut self, error: &str) {
    error!(error, "catalog load failed");
    self.grid.show_message(LOAD_FAILED_MESSAGE);
  }

  pub(crate) fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Blocking dialogs first, then the modal, then inputs over the grid
    match self.dialog.handle_key(key) {
      KeyResult::Event(event) => return self.handle_dialog_event(event),
      KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    match self.modal.handle_key(key) {
      KeyResult::Event(CartModalEvent::Checkout) => return self.checkout(),
      KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(_)) => return self.apply_filters(),
      KeyResult::Event(SearchEvent::Submitted) | KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    match self.categories.handle_key(key) {
      KeyResult::Event(()) => return self.apply_filters(),
      KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    match self.grid.handle_key(key) {
      KeyResult::Event(GridEvent::AddToCart(product)) => return self.add_to_cart(&product),
      KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('q') => self.should_quit = true,
      KeyCode::Char('c') => self.open_cart(),
      KeyCode::Char('s') => {
        self.sort = self.sort.next();
        self.apply_filters();
      }
      KeyCode::Char('S') => {
        self.sort = self.sort.previous();
        self.apply_filters();
      }
      KeyCode::Esc => self.status = None,
      _ => {}
    }
  }

  fn handle_mouse(&mut self, mouse: MouseEvent) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
      return;
    };
    // The dialog blocks everything, including the backdrop
    if self.dialog.is_active() {
      return;
    }

    let position = Position::new(mouse.column, mouse.row);
    if self.modal.is_visible() {
      self.modal.handle_click(mouse.column, mouse.row);
    } else if self.cart_indicator.is_some_and(|area| area.contains(position)) {
      self.open_cart();
    }
  }

  fn criteria(&self) -> FilterCriteria {
    FilterCriteria {
      category: self.categories.selected_value().map(str::to_string),
      search: self.search.query().to_string(),
      sort: self.sort,
    }
  }

  /// Recompute the visible products from the current controls
  pub(crate) fn apply_filters(&mut self) {
    if self.grid.message().is_some() && self.catalog.is_empty() {
      // Loading or failed: keep the message in place
      return;
    }
    let products = self.catalog.view(&self.criteria());
    self.grid.render_products(products);
  }

  pub(crate) fn add_to_cart(&mut self, product: &Product) {
    match self.cart.add(CartItem::from_product(product)) {
      Ok(count) => {
        info!(title = %product.title, count, "added to cart");
        self.status = None;
      }
      Err(e) => {
        error!(error = %e, "failed to save cart");
        self.status = Some(format!("Could not save cart: {}", e));
      }
    }
  }

  fn open_cart(&mut self) {
    self.modal.show();
  }

  fn checkout(&mut self) {
    if self.cart.is_empty() {
      self.dialog.alert(EMPTY_CART_MESSAGE);
      return;
    }

    let total = format_total(self.cart.total());
    self.dialog.confirm(
      format!("Your total is ${}. Proceed to checkout?", total),
      ConfirmAction::Checkout,
    );
  }

  fn handle_dialog_event(&mut self, event: DialogEvent) {
    match event {
      DialogEvent::Confirmed(ConfirmAction::Checkout) => self.complete_checkout(),
      DialogEvent::Declined(ConfirmAction::Checkout) | DialogEvent::Dismissed => {}
    }
  }

  fn complete_checkout(&mut self) {
    let items = self.cart.len();

    // Cart, storage and modal stay as they were
    if let Err(e) = self.cart.clear() {
      error!(error = %e, "failed to clear cart after checkout");
      self.dialog.alert(format!("Could not complete checkout: {}", e));
      return;
    }

    info!(items, "checkout complete");
    self.modal.hide();
    self.dialog.alert(THANK_YOU_MESSAGE);
  }
}
