//! Presentation: formatting, localized view models, and share links.

pub mod format;
pub mod share;
pub mod views;

pub use format::{format_inr, group_indian};
pub use share::{ShareChannel, ShareLink, share_link};
pub use views::{CardView, ComparisonTable, DetailView, card_view, comparison_table, detail_view};
