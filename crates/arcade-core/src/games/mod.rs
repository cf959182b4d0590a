//! Game engines
//!
//! Pure game state and rules. Nothing here touches the terminal; the CLI
//! crate drives these engines from its play loop.

pub mod galaga;
pub mod tetris;

pub use galaga::Galaga;
pub use tetris::Tetris;
