//! Command handlers.
//!
//! Handlers are thin: they resolve input, call into `readaloud-core` /
//! `readaloud-speech`, and format output for the terminal. Anything that
//! decides playback behavior lives in the controller, not here.

pub mod check;
pub mod clean;
pub mod speak;
