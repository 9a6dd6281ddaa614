//! The `app` module owns the application state and turns user input into
//! state changes.
//!
//! Input handlers (`keyboard`, `mouse`) translate raw terminal events into
//! [`Action`]s, and `actions` is the only place that applies them.

/// `actions`: applies an `Action` to the state.
mod actions;
/// `init`: builds the initial `App`.
mod init;
/// `keyboard`: maps key presses to actions.
mod keyboard;
/// `mouse`: maps clicks and wheel events to actions.
mod mouse;
/// `preferences`: theme and language changes and their document effects.
mod preferences;
/// `state`: the `App` struct and per-view state.
mod state;

pub use state::{
    Action, App, PaymentMethods, PolicyReview, StatusLine, View, ViewKind,
};
