//! Tinselworks library crate — re-exports all modules for integration
//! testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point. This
//! library crate exposes the same modules so that `tests/` integration
//! tests can import game types, systems, and resources without needing a
//! window or GPU.

pub mod shared;
pub mod input;
pub mod player;
pub mod world;
pub mod grid;
pub mod economy;
pub mod research;
pub mod buffs;
pub mod workshop;
pub mod trees;
pub mod coins;
pub mod decorations;
pub mod ui;
pub mod save;
pub mod data;
