//! Window functions

pub mod windows;

pub use windows::{generate_window, WindowType};
