//! Small helpers shared by screens

pub mod name_entry;
pub mod text;

pub use name_entry::{NameAction, NameEntry};
pub use text::{display_width, pad_right, truncate_ellipsis};
