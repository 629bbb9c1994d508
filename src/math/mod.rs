//! Mathematical utilities

pub mod rect;

pub use rect::Rect;
