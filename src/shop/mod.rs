pub mod catalog;
pub mod client;
pub mod types;
