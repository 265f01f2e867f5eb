//! Browsing session: Elm-style model, pure update function, and the runtime
//! that executes side-effects.

pub mod model;
pub mod runtime;
pub mod update;

#[cfg(test)]
mod test_properties;

pub use model::{LoadState, Modal, Route, SessionCmd, SessionModel, SessionMsg};
pub use runtime::{LanguageSource, Session};
pub use update::update;
