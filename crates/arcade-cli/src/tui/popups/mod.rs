//! Full-screen views and centered popups of the menu shell

mod common;
pub mod high_scores;
pub mod theme_select;

pub use common::{center_rect, popup_block, PopupSize};
pub use high_scores::HighScoresPopup;
pub use theme_select::ThemeSelectPopup;
