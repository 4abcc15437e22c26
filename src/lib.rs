//! Pogo Stickman - a one-level pogo platformer
//!
//! Core modules:
//! - `physics`: Rigid-body world backed by rapier2d
//! - `sim`: Level layout, character rig, contact rules, game session
//! - `render`: Scene composition into canvas draw commands
//! - `tuning`: Data-driven movement and rig balance

pub mod physics;
pub mod render;
pub mod sim;
pub mod tuning;

pub use sim::{GamePhase, GameSession, TickInput};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep; one step per rendered frame
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Logical viewport size; the level is laid out against this height
    pub const VIEW_WIDTH: f32 = 960.0;
    pub const VIEW_HEIGHT: f32 = 540.0;

    /// Device pixel ratios above this just burn fill rate
    pub const MAX_DPR: f64 = 2.0;
}
