//! Interactive terminal front-end: raw-mode key input and a truecolor preview.
//!
//! Both types restore the terminal on drop, so an aborted session never leaves the shell in raw
//! mode or on the alternate screen.

pub(crate) mod input;
pub(crate) mod preview;
