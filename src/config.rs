use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  /// Custom title for header (defaults to "Storefront")
  pub title: Option<String>,
  #[serde(default)]
  pub catalog: CatalogConfig,
  #[serde(default)]
  pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
  /// Endpoint returning the full product collection as a JSON array
  #[serde(default = "default_catalog_url")]
  pub url: String,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      url: default_catalog_url(),
    }
  }
}

fn default_catalog_url() -> String {
  DEFAULT_CATALOG_URL.to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
  /// Database file holding the cart (default: $XDG_DATA_HOME/storefront/storage.db)
  pub path: Option<PathBuf>,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./storefront.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/storefront/config.yaml
  ///
  /// Falls back to built-in defaults when no file is found. The
  /// STOREFRONT_CATALOG_URL environment variable overrides the catalog URL.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    if let Ok(url) = std::env::var("STOREFRONT_CATALOG_URL") {
      config.catalog.url = url;
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("storefront.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("storefront").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }

  /// Header title
  pub fn title(&self) -> &str {
    self.title.as_deref().unwrap_or("Storefront")
  }

  /// Parsed catalog endpoint; only absolute http(s) URLs are accepted.
  pub fn catalog_url(&self) -> Result<Url> {
    let url = Url::parse(&self.catalog.url)
      .map_err(|e| eyre!("Invalid catalog URL {}: {}", self.catalog.url, e))?;

    match url.scheme() {
      "http" | "https" => Ok(url),
      scheme => Err(eyre!(
        "Unsupported catalog URL scheme '{}' in {}",
        scheme,
        self.catalog.url
      )),
    }
  }

  /// Resolve the storage database path.
  pub fn storage_path(&self) -> Result<PathBuf> {
    if let Some(path) = &self.storage.path {
      return Ok(path.clone());
    }
    Ok(data_dir()?.join("storage.db"))
  }
}

/// Application data directory ($XDG_DATA_HOME/storefront)
pub fn data_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("storefront"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_when_empty() {
    let config = Config::default();
    assert_eq!(config.title(), "Storefront");
    assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
    assert!(config.storage.path.is_none());
  }

  #[test]
  fn test_parse_full_config() {
    let config = Config::from_yaml(
      r#"
title: Demo Store
catalog:
  url: http://localhost:8080/products
storage:
  path: /tmp/storefront-test.db
"#,
    )
    .unwrap();

    assert_eq!(config.title(), "Demo Store");
    assert_eq!(config.catalog_url().unwrap().host_str(), Some("localhost"));
    assert_eq!(
      config.storage_path().unwrap(),
      PathBuf::from("/tmp/storefront-test.db")
    );
  }

  #[test]
  fn test_partial_config_keeps_default_url() {
    let config = Config::from_yaml("title: Shop\n").unwrap();
    assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
  }

  #[test]
  fn test_rejects_non_http_url() {
    let mut config = Config::default();
    config.catalog.url = "ftp://example.com/products".to_string();
    assert!(config.catalog_url().is_err());

    config.catalog.url = "not a url".to_string();
    assert!(config.catalog_url().is_err());
  }
}
