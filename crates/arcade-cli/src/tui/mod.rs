//! Terminal front end: menu shell, game cartridges and their screens

pub mod app;
pub mod canvas;
pub mod cartridges;
pub mod input;
pub mod popups;
pub mod terminal;
pub mod themes;
pub mod utils;

#[cfg(test)]
pub mod testing;

pub use app::{run_theme_demo, App, DEMO_INTERVAL};
pub use cartridges::{registry, Cartridge, PlayContext};
pub use input::CrosstermInput;
pub use terminal::TerminalGuard;
pub use themes::Palette;
