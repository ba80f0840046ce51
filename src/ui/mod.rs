//! TUI module for the vocabulary trainer.

mod app;
pub mod theme;
mod widgets;

pub use app::App;
