//! Snake on a wrap-around grid with a good and a bad food item.
//!
//! [`game::GameEngine`] is the whole simulation: it takes direction and
//! speed inputs, advances one tick at a time and hands out
//! [`snapshot::Snapshot`]s. The terminal modules only drive it.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod occupancy;
pub mod renderer;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
