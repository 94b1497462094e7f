//! Image and video mode selection
//!
//! Turns debounced button edges into catalog cursor moves. Publishing the
//! result is left to the caller; the controller only says what to show.

pub mod controller;
pub mod cursor;

pub use controller::{Action, Actions, Button, ButtonBinding, SelectionController};
pub use cursor::Cursor;
