//! Category index and the filter/sort pipeline over the loaded catalog.

use crate::shop::types::Product;
use icu_collator::options::CollatorOptions;
use icu_collator::Collator;
use std::collections::HashSet;
use tracing::warn;

/// Product ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
  /// Keep catalog order
  #[default]
  Default,
  PriceAsc,
  PriceDesc,
  TitleAsc,
  TitleDesc,
}

impl SortMode {
  const ALL: [SortMode; 5] = [
    SortMode::Default,
    SortMode::PriceAsc,
    SortMode::PriceDesc,
    SortMode::TitleAsc,
    SortMode::TitleDesc,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      SortMode::Default => "Default",
      SortMode::PriceAsc => "Price: Low to High",
      SortMode::PriceDesc => "Price: High to Low",
      SortMode::TitleAsc => "Title: A-Z",
      SortMode::TitleDesc => "Title: Z-A",
    }
  }

  /// Next mode, wrapping around
  pub fn next(self) -> Self {
    let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
    Self::ALL[(idx + 1) % Self::ALL.len()]
  }

  /// Previous mode, wrapping around
  pub fn previous(self) -> Self {
    let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
    Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
  }
}

/// Current values of the category, search and sort controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
  /// None = all categories
  pub category: Option<String>,
  pub search: String,
  pub sort: SortMode,
}

/// The authoritative in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  pub fn new(products: Vec<Product>) -> Self {
    Self { products }
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }

  pub fn categories(&self) -> Vec<String> {
    categories(&self.products)
  }

  /// Filtered, sorted working copy of the catalog
  pub fn view(&self, criteria: &FilterCriteria) -> Vec<Product> {
    apply_filters(&self.products, criteria)
  }
}

/// Distinct category labels in first-seen order (case-sensitive)
pub fn categories(products: &[Product]) -> Vec<String> {
  let mut seen = HashSet::new();
  products
    .iter()
    .filter(|p| seen.insert(p.category.as_str()))
    .map(|p| p.category.clone())
    .collect()
}

/// Uppercase the first character for display
pub fn capitalize(label: &str) -> String {
  let mut chars = label.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Category, then search, then sort
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
  let mut filtered: Vec<Product> = products.to_vec();

  if let Some(category) = &criteria.category {
    filtered.retain(|p| &p.category == category);
  }

  let query = criteria.search.to_lowercase();
  if !query.is_empty() {
    filtered.retain(|p| {
      p.title.to_lowercase().contains(&query) || p.description.to_lowercase().contains(&query)
    });
  }

  match criteria.sort {
    SortMode::PriceAsc => filtered.sort_by(|a, b| a.price.total_cmp(&b.price)),
    SortMode::PriceDesc => filtered.sort_by(|a, b| b.price.total_cmp(&a.price)),
    SortMode::TitleAsc => sort_by_title(&mut filtered, false),
    SortMode::TitleDesc => sort_by_title(&mut filtered, true),
    SortMode::Default => {}
  }

  filtered
}

/// Stable sort by title using root-locale collation: accents sort next to
/// their base letter and lowercase comes before uppercase on a tie.
fn sort_by_title(products: &mut [Product], descending: bool) {
  let collator = match Collator::try_new(Default::default(), CollatorOptions::default()) {
    Ok(collator) => collator,
    Err(e) => {
      warn!(error = %e, "title collation unavailable, keeping current order");
      return;
    }
  };

  products.sort_by(|a, b| {
    let order = collator.compare(&a.title, &b.title);
    if descending {
      order.reverse()
    } else {
      order
    }
  });
}

#[cfg(test)]
mod tests {
  use super::*;

  fn product(title: &str, price: f64, category: &str, description: &str) -> Product {
    Product {
      id: 0,
      title: title.to_string(),
      price,
      image: format!("https://example.com/{}.jpg", title.to_lowercase()),
      category: category.to_string(),
      description: description.to_string(),
    }
  }

  fn sample() -> Vec<Product> {
    vec![
      product("Smartphone X", 699.0, "electronics", "A fast phone"),
      product("Gold Ring", 168.0, "jewelery", "Shiny"),
      product("Monitor", 199.99, "electronics", "27 inch display"),
      product("Phone Case", 9.5, "accessories", "Protects your phone"),
      product("T-Shirt", 15.0, "men's clothing", "Cotton tee"),
      product("Headset", 59.0, "electronics", "Telephone-grade microphone"),
    ]
  }

  fn titles(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.title.as_str()).collect()
  }

  #[test]
  fn test_categories_first_seen_order() {
    assert_eq!(
      categories(&sample()),
      vec!["electronics", "jewelery", "accessories", "men's clothing"]
    );
  }

  #[test]
  fn test_categories_case_sensitive() {
    let products = vec![
      product("A", 1.0, "Books", ""),
      product("B", 1.0, "books", ""),
      product("C", 1.0, "Books", ""),
    ];
    assert_eq!(categories(&products), vec!["Books", "books"]);
  }

  #[test]
  fn test_capitalize() {
    assert_eq!(capitalize("men's clothing"), "Men's clothing");
    assert_eq!(capitalize("électronique"), "Électronique");
    assert_eq!(capitalize(""), "");
  }

  #[test]
  fn test_no_criteria_keeps_catalog_order() {
    let result = apply_filters(&sample(), &FilterCriteria::default());
    assert_eq!(titles(&result), titles(&sample()));
  }

  #[test]
  fn test_category_filter_exact_match() {
    let criteria = FilterCriteria {
      category: Some("electronics".to_string()),
      ..Default::default()
    };
    let result = apply_filters(&sample(), &criteria);
    assert_eq!(titles(&result), vec!["Smartphone X", "Monitor", "Headset"]);

    let criteria = FilterCriteria {
      category: Some("Electronics".to_string()),
      ..Default::default()
    };
    assert!(apply_filters(&sample(), &criteria).is_empty());
  }

  #[test]
  fn test_search_matches_title_or_description_case_insensitive() {
    let criteria = FilterCriteria {
      search: "PHONE".to_string(),
      ..Default::default()
    };
    let result = apply_filters(&sample(), &criteria);
    assert_eq!(titles(&result), vec!["Smartphone X", "Phone Case", "Headset"]);
  }

  #[test]
  fn test_category_and_search_intersect() {
    let criteria = FilterCriteria {
      category: Some("electronics".to_string()),
      search: "phone".to_string(),
      sort: SortMode::Default,
    };
    let result = apply_filters(&sample(), &criteria);
    assert_eq!(titles(&result), vec!["Smartphone X", "Headset"]);
    assert!(result
      .iter()
      .all(|p| p.category == "electronics"
        && (p.title.to_lowercase().contains("phone")
          || p.description.to_lowercase().contains("phone"))));
  }

  #[test]
  fn test_sort_by_price() {
    let asc = apply_filters(
      &sample(),
      &FilterCriteria {
        sort: SortMode::PriceAsc,
        ..Default::default()
      },
    );
    let prices: Vec<f64> = asc.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![9.5, 15.0, 59.0, 168.0, 199.99, 699.0]);

    let desc = apply_filters(
      &sample(),
      &FilterCriteria {
        sort: SortMode::PriceDesc,
        ..Default::default()
      },
    );
    assert_eq!(desc.first().map(|p| p.price), Some(699.0));
    assert_eq!(desc.last().map(|p| p.price), Some(9.5));
  }

  #[test]
  fn test_sort_by_title_descending() {
    let products = vec![
      product("Apple", 1.0, "fruit", ""),
      product("Banana", 1.0, "fruit", ""),
      product("Cherry", 1.0, "fruit", ""),
    ];
    let result = apply_filters(
      &products,
      &FilterCriteria {
        sort: SortMode::TitleDesc,
        ..Default::default()
      },
    );
    assert_eq!(titles(&result), vec!["Cherry", "Banana", "Apple"]);
  }

  #[test]
  fn test_sort_by_title_ignores_case() {
    let products = vec![
      product("banana", 1.0, "fruit", ""),
      product("Cherry", 1.0, "fruit", ""),
      product("apple", 1.0, "fruit", ""),
    ];
    let result = apply_filters(
      &products,
      &FilterCriteria {
        sort: SortMode::TitleAsc,
        ..Default::default()
      },
    );
    assert_eq!(titles(&result), vec!["apple", "banana", "Cherry"]);
  }

  fn sorted_titles(titles: &[&str], sort: SortMode) -> Vec<String> {
    let products: Vec<Product> = titles.iter().map(|t| product(t, 1.0, "misc", "")).collect();
    apply_filters(&products, &FilterCriteria { sort, ..Default::default() })
      .into_iter()
      .map(|p| p.title)
      .collect()
  }

  #[test]
  fn test_sort_by_title_accents_next_to_base_letter() {
    assert_eq!(
      sorted_titles(&["Zebra", "Éclair", "apple", "Eagle"], SortMode::TitleAsc),
      vec!["apple", "Eagle", "Éclair", "Zebra"]
    );
    assert_eq!(
      sorted_titles(&["Zebra", "Éclair", "apple", "Eagle"], SortMode::TitleDesc),
      vec!["Zebra", "Éclair", "Eagle", "apple"]
    );
  }

  #[test]
  fn test_sort_by_title_ties() {
    assert_eq!(
      sorted_titles(&["Apple", "apple"], SortMode::TitleAsc),
      vec!["apple", "Apple"]
    );
    assert_eq!(
      sorted_titles(&["eclair", "Éclair", "éclair"], SortMode::TitleAsc),
      vec!["eclair", "éclair", "Éclair"]
    );
    assert_eq!(
      sorted_titles(&["apple", "app"], SortMode::TitleAsc),
      vec!["app", "apple"]
    );
  }

  #[test]
  fn test_sort_mode_cycles() {
    assert_eq!(SortMode::Default.next(), SortMode::PriceAsc);
    assert_eq!(SortMode::TitleDesc.next(), SortMode::Default);
    assert_eq!(SortMode::Default.previous(), SortMode::TitleDesc);
  }

  #[test]
  fn test_view_does_not_mutate_catalog() {
    let catalog = Catalog::new(sample());
    let _ = catalog.view(&FilterCriteria {
      sort: SortMode::PriceAsc,
      ..Default::default()
    });
    assert_eq!(titles(catalog.products()), titles(&sample()));
  }
}
