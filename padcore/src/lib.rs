//! padcore: shared library for slowPad
//!
//! The settings store and search routines are toolkit-free; `theme` and
//! `widgets` carry the egui look.

pub mod config;
pub mod search;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use config::ConfigStore;
pub use search::{MatchRange, Selection};
pub use theme::SlowTheme;
