#![forbid(unsafe_code)]

//! Jan Saarthi: a bilingual directory of electoral-candidate affidavits.
//!
//! The library owns every derivation the directory shows:
//! 1. **Dataset**: one-time load of candidate records, collection statistics and badges
//! 2. **Directory**: search, party filter and stable sorting, plus the bounded comparison set
//! 3. **Session**: Elm-style model and pure `update()` driving all state changes
//! 4. **Presentation**: localized view models, INR formatting and share links
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use jan_saarthi::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use jan_saarthi::core::config::Config;
//! use jan_saarthi::directory::{Criteria, SortKey, visible};
//! ```

pub mod prelude;

pub mod core;
pub mod dataset;
pub mod directory;
pub mod locale;
pub mod logger;
pub mod present;
pub mod session;
