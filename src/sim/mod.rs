//! Gameplay simulation
//!
//! All game logic lives here, driven one fixed timestep at a time:
//! - The static level layout and the spring-jointed character rig
//! - Per-step contact classification (jump footing, hazards, the finish)
//! - The playing/won/dead phase machine and the follow camera
//! - No rendering or platform dependencies

pub mod camera;
pub mod contacts;
pub mod level;
pub mod rig;
pub mod session;
pub mod state;

pub use camera::Camera;
pub use contacts::{FootContacts, StepSignals, classify_step};
pub use level::{Level, LevelBody};
pub use rig::CharacterRig;
pub use session::{GameSession, TickInput};
pub use state::{BodyLabel, GamePhase};
