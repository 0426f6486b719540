use super::storage::KeyValueStorage;
use crate::shop::types::CartItem;
use color_eyre::{eyre::eyre, Result};
use tracing::{debug, warn};

/// Storage key holding the JSON-encoded cart
pub const CART_KEY: &str = "cart";

/// Ordered cart mirrored to durable storage after every mutation.
pub struct CartStore<S: KeyValueStorage> {
  items: Vec<CartItem>,
  storage: S,
}

impl<S: KeyValueStorage> CartStore<S> {
  /// Load the cart from storage. A missing or unreadable entry starts an
  /// empty cart.
  pub fn load(storage: S) -> Self {
    let items = match storage.get(CART_KEY) {
      Ok(Some(json)) => match serde_json::from_str::<Vec<CartItem>>(&json) {
        Ok(items) => items,
        Err(e) => {
          warn!(error = %e, "discarding unparsable cart");
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        warn!(error = %e, "failed to read cart, starting empty");
        Vec::new()
      }
    };

    debug!(items = items.len(), "cart loaded");
    Self { items, storage }
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  #[cfg(test)]
  pub fn storage(&self) -> &S {
    &self.storage
  }

  /// Append an item and persist the whole cart. Returns the new length.
  ///
  /// On a failed write the item is dropped again so memory and storage
  /// stay identical.
  pub fn add(&mut self, item: CartItem) -> Result<usize> {
    self.items.push(item);
    if let Err(e) = self.persist() {
      self.items.pop();
      return Err(e);
    }
    Ok(self.items.len())
  }

  /// Sum of all item prices. Malformed price strings make the total NaN.
  pub fn total(&self) -> f64 {
    self.items.iter().map(CartItem::amount).sum()
  }

  /// Empty the cart and delete the storage key.
  pub fn clear(&mut self) -> Result<()> {
    self.storage.remove(CART_KEY)?;
    self.items.clear();
    Ok(())
  }

  fn persist(&self) -> Result<()> {
    let json =
      serde_json::to_string(&self.items).map_err(|e| eyre!("Failed to encode cart: {}", e))?;
    self.storage.set(CART_KEY, &json)
  }
}

/// Two-decimal rendering of a cart total
pub fn format_total(total: f64) -> String {
  format!("{:.2}", total)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cart::{FlakyStorage, SqliteStorage};

  fn item(title: &str, price: &str) -> CartItem {
    CartItem {
      title: title.to_string(),
      price: price.to_string(),
      image: format!("https://example.com/{}.jpg", title),
    }
  }

  fn stored(cart: &CartStore<SqliteStorage>) -> Option<Vec<CartItem>> {
    cart
      .storage()
      .get(CART_KEY)
      .unwrap()
      .map(|json| serde_json::from_str(&json).unwrap())
  }

  #[test]
  fn test_load_missing_key_is_empty() {
    let cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    assert!(cart.is_empty());
  }

  #[test]
  fn test_load_unparsable_is_empty() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set(CART_KEY, "{not json").unwrap();
    let cart = CartStore::load(storage);
    assert!(cart.is_empty());
  }

  #[test]
  fn test_load_existing_cart() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage
      .set(
        CART_KEY,
        r#"[{"title":"Mug","price":"$4.5","image":"https://example.com/mug.jpg"}]"#,
      )
      .unwrap();
    let cart = CartStore::load(storage);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].title, "Mug");
    assert_eq!(cart.items()[0].price, "$4.5");
    assert_eq!(cart.items()[0].image, "https://example.com/mug.jpg");
  }

  #[test]
  fn test_add_keeps_order_and_duplicates() {
    let mut cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    cart.add(item("a", "$1")).unwrap();
    cart.add(item("b", "$2")).unwrap();
    assert_eq!(cart.add(item("a", "$1")).unwrap(), 3);

    let expected = vec![item("a", "$1"), item("b", "$2"), item("a", "$1")];
    assert_eq!(cart.items(), expected.as_slice());
    assert_eq!(stored(&cart), Some(expected));
  }

  #[test]
  fn test_cart_survives_reload() {
    let mut cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    cart.add(item("a", "$1")).unwrap();
    cart.add(item("b", "$2")).unwrap();

    let reloaded = CartStore::load(cart.storage);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.items()[1].title, "b");
  }

  #[test]
  fn test_total() {
    let mut cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    cart.add(item("a", "$10.00")).unwrap();
    cart.add(item("b", "$5.50")).unwrap();
    assert!((cart.total() - 15.50).abs() < 1e-9);
    assert_eq!(format_total(cart.total()), "15.50");
  }

  #[test]
  fn test_total_of_empty_cart() {
    let cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    assert_eq!(format_total(cart.total()), "0.00");
  }

  #[test]
  fn test_malformed_price_makes_total_nan() {
    let mut cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    cart.add(item("a", "$10.00")).unwrap();
    cart.add(item("b", "ten dollars")).unwrap();
    assert!(cart.total().is_nan());
    assert_eq!(format_total(cart.total()), "NaN");
  }

  #[test]
  fn test_clear_removes_key() {
    let mut cart = CartStore::load(SqliteStorage::open_in_memory().unwrap());
    cart.add(item("a", "$1")).unwrap();
    cart.clear().unwrap();

    assert!(cart.is_empty());
    assert_eq!(cart.storage().get(CART_KEY).unwrap(), None);

    let reloaded = CartStore::load(cart.storage);
    assert!(reloaded.is_empty());
  }

  #[test]
  fn test_failed_write_rolls_back_add() {
    let mut cart = CartStore::load(FlakyStorage::new());
    cart.add(item("a", "$1")).unwrap();

    cart.storage().fail_writes(true);
    assert!(cart.add(item("b", "$2")).is_err());
    assert_eq!(cart.len(), 1);

    assert!(cart.clear().is_err());
    assert_eq!(cart.len(), 1);
  }
}
