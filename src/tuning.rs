//! Data-driven game balance.
//!
//! Every gameplay magnitude lives here so behavior is reproducible and
//! adjustable without touching simulation code. Units are screen pixels,
//! seconds, and the collider-density mass scale.

use serde::{Deserialize, Serialize};

/// Mass and surface profile for one rig part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartProfile {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

/// Torsional spring gains for one pivot of the rig chain.
///
/// Acceleration-based: stiffness in rad/s² per radian of bend, damping
/// in 1/s. Zero stiffness makes the pivot a free swivel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointProfile {
    pub stiffness: f32,
    pub damping: f32,
}

/// Character rig balance: four part profiles plus the three-pivot chain.
///
/// The chain is stiff at the waist, looser at the neck, and swivels freely
/// at the foot so the foot can roll like a wheel. The pinned pivots keep
/// the assembly a semi-rigid pogo stick, not a rope of independent parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigTuning {
    pub foot: PartProfile,
    pub rod: PartProfile,
    pub torso: PartProfile,
    pub head: PartProfile,
    pub foot_rod: JointProfile,
    pub rod_torso: JointProfile,
    pub torso_head: JointProfile,
    /// Linear air drag applied to every part (1/s).
    pub air_damping: f32,
}

impl Default for RigTuning {
    fn default() -> Self {
        Self {
            foot: PartProfile {
                density: 0.001,
                friction: 1.0,
                restitution: 0.9,
            },
            rod: PartProfile {
                density: 0.002,
                friction: 0.8,
                restitution: 0.2,
            },
            torso: PartProfile {
                density: 0.002,
                friction: 0.6,
                restitution: 0.0,
            },
            head: PartProfile {
                density: 0.0015,
                friction: 0.4,
                restitution: 0.1,
            },
            foot_rod: JointProfile {
                stiffness: 0.0,
                damping: 3.0,
            },
            rod_torso: JointProfile {
                stiffness: 800.0,
                damping: 57.0,
            },
            torso_head: JointProfile {
                stiffness: 400.0,
                damping: 40.0,
            },
            air_damping: 0.6,
        }
    }
}

/// Full gameplay tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward gravity, px/s².
    pub gravity: f32,
    /// Horizontal force on the torso while Left/Right is held.
    pub lean_force: f32,
    /// Angular velocity added to the torso each held tick, rad/s.
    pub lean_spin: f32,
    /// Upward impulse on the foot for one pogo burst.
    pub jump_impulse: f32,
    /// Fraction of the jump impulse also applied to the rod.
    pub rod_assist: f32,
    /// Minimum simulated seconds between jump bursts.
    pub jump_cooldown: f32,
    /// Head speed above which a hazard strike is fatal, px/s.
    pub fatal_head_speed: f32,
    /// Per-tick camera smoothing factor toward the torso.
    pub camera_smoothing: f32,
    /// Righting acceleration of the rod toward vertical, rad/s² per radian
    /// of lean. This is the rider's balance reflex; without it the rig is
    /// an inverted pendulum with nothing to hold it up.
    pub upright_gain: f32,
    /// Drag on the rod's spin while righting, 1/s.
    pub upright_damping: f32,
    pub rig: RigTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1000.0,
            lean_force: 1800.0,
            lean_spin: 1.2,
            jump_impulse: 3200.0,
            rod_assist: 0.5,
            jump_cooldown: 0.22,
            fatal_head_speed: 180.0,
            camera_smoothing: 0.08,
            upright_gain: 90.0,
            upright_damping: 10.0,
            rig: RigTuning::default(),
        }
    }
}

impl Tuning {
    /// Parses a tuning override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
