//! One run of the game, from spawn to victory or death.
//!
//! [`GameSession`] owns the physics world, the level, the character rig,
//! the camera and the phase machine, and advances them together one fixed
//! step per call. Terminal phases freeze the world in place so the losing
//! (or winning) pose stays on screen; restarting rebuilds the whole run
//! from the tuning it was created with.

use glam::Vec2;

use crate::consts;
use crate::physics::{ContactPair, Outline, PhysicsWorld};
use crate::tuning::Tuning;

use super::camera::Camera;
use super::contacts::{FootContacts, classify_step};
use super::level::Level;
use super::rig::CharacterRig;
use super::state::GamePhase;

/// Control sample for one tick.
///
/// `left`/`right`/`jump` reflect held keys; `restart` is a one-shot edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub restart: bool,
}

pub struct GameSession {
    world: PhysicsWorld,
    level: Level,
    rig: CharacterRig,
    camera: Camera,
    phase: GamePhase,
    footing: FootContacts,
    /// Simulated seconds since the run began.
    clock: f32,
    /// Clock reading of the last jump; `None` until the first one, so a
    /// fresh run can jump immediately.
    jumped_at: Option<f32>,
    tuning: Tuning,
    contact_buf: Vec<ContactPair>,
}

impl GameSession {
    pub fn new(tuning: Tuning, view: Vec2) -> Self {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, tuning.gravity));
        let level = Level::standard(view.y);
        level.spawn_into(&mut world);
        let rig = CharacterRig::spawn(&mut world, level.spawn, &tuning.rig);
        log::debug!("Session built with {} bodies", world.body_count());
        Self {
            world,
            level,
            rig,
            camera: Camera::new(view),
            phase: GamePhase::Playing,
            footing: FootContacts::default(),
            clock: 0.0,
            jumped_at: None,
            tuning,
            contact_buf: Vec::new(),
        }
    }

    /// Throws the current run away and rebuilds it from scratch.
    pub fn restart(&mut self) {
        log::info!("Restarting run");
        *self = Self::new(self.tuning.clone(), self.camera.view);
    }

    /// Advances the run by one fixed step of [`consts::SIM_DT`].
    pub fn advance(&mut self, input: &TickInput) {
        if input.restart {
            self.restart();
            return;
        }
        // Terminal phases freeze the world; the scene still draws.
        if self.phase.is_terminal() {
            return;
        }

        self.balance();
        self.steer(input);
        if input.jump {
            self.try_jump();
        }

        self.world.step(consts::SIM_DT, &mut self.contact_buf);

        let head_speed = self.world.linvel(&self.rig.head).length();
        let signals = classify_step(&self.contact_buf, head_speed, self.tuning.fatal_head_speed);
        self.footing.apply(&signals);

        // Crossing the line and cracking your head on the same step still
        // counts as a win.
        if signals.finish_reached {
            self.phase = GamePhase::Won;
            log::info!("Finish reached after {:.2}s", self.clock);
        } else if signals.lethal_head_hit {
            self.phase = GamePhase::Dead;
            log::info!(
                "Head struck a hazard at {:.0} px/s after {:.2}s",
                head_speed,
                self.clock
            );
        }

        self.camera.follow(
            self.world.position(&self.rig.torso).x,
            self.tuning.camera_smoothing,
        );
        self.clock += consts::SIM_DT;
    }

    /// The rider's balance reflex: eases the rod's lean back toward
    /// vertical every tick. The stack is an inverted pendulum on a rolling
    /// foot; without this it falls over on its own.
    fn balance(&mut self) {
        let rod = self.rig.rod;
        let lean = self.world.rotation(&rod);
        let spin = self.world.angvel(&rod);
        let correction =
            (-lean * self.tuning.upright_gain - spin * self.tuning.upright_damping) * consts::SIM_DT;
        self.world.set_angvel(&rod, spin + correction);
    }

    fn steer(&mut self, input: &TickInput) {
        if input.left {
            self.lean(-1.0);
        }
        if input.right {
            self.lean(1.0);
        }
    }

    /// Shoves and spins the torso sideways. The spin matters as much as
    /// the shove: a grounded torso rolls along the terrain.
    fn lean(&mut self, dir: f32) {
        let torso = self.rig.torso;
        self.world
            .push(&torso, Vec2::new(dir * self.tuning.lean_force, 0.0));
        let spun = self.world.angvel(&torso) + dir * self.tuning.lean_spin;
        self.world.set_angvel(&torso, spun);
    }

    fn try_jump(&mut self) {
        if !self.footing.grounded() {
            return;
        }
        let off_cooldown = match self.jumped_at {
            None => true,
            Some(at) => self.clock - at >= self.tuning.jump_cooldown,
        };
        if !off_cooldown {
            return;
        }
        let kick = self.tuning.jump_impulse;
        self.world
            .apply_impulse(&self.rig.foot, Vec2::new(0.0, -kick));
        self.world
            .apply_impulse(&self.rig.rod, Vec2::new(0.0, -kick * self.tuning.rod_assist));
        self.jumped_at = Some(self.clock);
        log::debug!("Jump at {:.2}s", self.clock);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the foot currently rests on jumpable terrain.
    pub fn can_jump(&self) -> bool {
        self.footing.grounded()
    }

    pub fn sim_time(&self) -> f32 {
        self.clock
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Adopts a new viewport size. The level keeps the height it was
    /// built against; only the camera framing changes.
    pub fn set_view(&mut self, view: Vec2) {
        self.camera.view = view;
    }

    /// Center of the finish sensor, where the goal banner stands.
    pub fn finish_position(&self) -> Vec2 {
        self.level.finish
    }

    pub fn torso_position(&self) -> Vec2 {
        self.world.position(&self.rig.torso)
    }

    /// World-space outlines of every body, for drawing.
    pub fn outlines(&self) -> Vec<Outline> {
        self.world.outlines()
    }
}
