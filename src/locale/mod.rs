//! Language catalog and persisted language preference.

pub mod catalog;
pub mod preferences;

pub use catalog::{Language, translate};
