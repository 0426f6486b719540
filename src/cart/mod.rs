//! Shopping cart persisted in a local key-value store.
//!
//! The cart is an ordered list of line items mirrored to durable storage
//! after every mutation, so a restart picks up exactly where the last
//! session stopped.

mod storage;
mod store;

pub use storage::{KeyValueStorage, SqliteStorage};
pub use store::{format_total, CartStore};

#[cfg(test)]
pub use storage::FlakyStorage;
#[cfg(test)]
pub use store::CART_KEY;
