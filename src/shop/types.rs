use serde::{Deserialize, Serialize};

/// A catalog entry as served by the product API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
  #[serde(default)]
  pub id: u64,
  pub title: String,
  pub price: f64,
  pub image: String,
  pub category: String,
  pub description: String,
}

impl Product {
  /// Price as shown on the card and stored in cart items
  pub fn display_price(&self) -> String {
    format_price(self.price)
  }
}

/// A cart line item: a snapshot of a product's display data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  pub title: String,
  /// Currency string, e.g. "$19.99"
  pub price: String,
  pub image: String,
}

impl CartItem {
  pub fn from_product(product: &Product) -> Self {
    Self {
      title: product.title.clone(),
      price: product.display_price(),
      image: product.image.clone(),
    }
  }

  /// Numeric value of the price string; NaN when no number leads it
  pub fn amount(&self) -> f64 {
    parse_price(&self.price)
  }
}

/// "$" followed by the shortest decimal form of the number ("$22.3", "$7")
pub fn format_price(price: f64) -> String {
  format!("${}", price)
}

/// Numeric value of a "$<number>" string. Only the first "$" is dropped and
/// the longest leading number is read, so "$10abc" is 10. NaN when there is
/// no leading number.
pub fn parse_price(price: &str) -> f64 {
  let stripped = price.replacen('$', "", 1);
  let number = stripped.trim_start();
  let numeric_len = number
    .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
    .unwrap_or(number.len());

  // The candidate is ASCII, so every index is a char boundary
  let candidate = &number[..numeric_len];
  (1..=candidate.len())
    .rev()
    .find_map(|end| candidate[..end].parse().ok())
    .unwrap_or(f64::NAN)
}
