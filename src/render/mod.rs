//! Scene composition
//!
//! Turns a [`crate::sim::GameSession`] into a flat list of canvas drawing
//! instructions; the platform layer replays them against a 2D context.

pub mod scene;

pub use scene::{DrawCommand, compose};
