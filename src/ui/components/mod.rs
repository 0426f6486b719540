mod cart_modal;
mod category_bar;
mod dialog;
mod input;
mod product_grid;
mod search_input;

pub use cart_modal::{CartModal, CartModalEvent};
pub use category_bar::CategoryBar;
pub use dialog::{ConfirmAction, Dialog, DialogEvent};
pub use product_grid::{GridEvent, ProductGrid};
pub use search_input::{SearchEvent, SearchInput};

/// Outcome of offering a key event to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Key was consumed, nothing for the parent to do
  Handled,
  /// Key was consumed and produced an event for the parent
  Event(T),
  /// Key was not consumed, parent should try next handler
  NotHandled,
}
