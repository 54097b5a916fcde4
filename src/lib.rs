//! Grid-based Game of Life engine with bounded and toroidal fields.
//!
//! The engine owns a row-major grid of [`CellState`]s and the precomputed neighbor geometry
//! of its [`Topology`]. Front ends edit cells while paused and call
//! [`Engine::advance_generation`] while running; rendering, input and pacing live outside
//! this crate.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod rules;
pub mod state;

pub use config::{DisplayBounds, GameConfig};
pub use engine::{advance_generation, count_alive_neighbors, set_cell, Engine, GenerationResult};
pub use error::{Error, Result};
pub use grid::{CellRect, Dimensions, Grid};
pub use neighbors::{NeighborSet, Topology};
pub use rules::patterns::Pattern;
pub use rules::{classify_position, next_state, CellState, GameRules, PositionClass};
pub use state::{Phase, Session};
