//! The pogo character: four bodies pinned into a chain of sprung pivots.
//!
//! From the ground up: a bouncy foot ball, the rod (a tall thin capsule),
//! the torso, and the head. Each pivot pins the neighbors at a shared
//! point and springs their relative angle back to the spawn alignment, so
//! the stack behaves like one wobbly stick rather than a rag of parts.
//! The foot pivot carries no angular spring at all: the foot is the wheel
//! the rest of the stick balances on.

use glam::Vec2;

use super::state::BodyLabel;
use crate::physics::{
    BodyDesc, ColliderMaterial, ColliderShape, PhysicsBody, PhysicsWorld, PivotSpring,
};
use crate::tuning::{PartProfile, RigTuning};

pub const FOOT_RADIUS: f32 = 20.0;
pub const TORSO_RADIUS: f32 = 26.0;
pub const HEAD_RADIUS: f32 = 16.0;
/// The rod reads as a 12x120 stick: a capsule 6 wide at the waist whose
/// caps bring the overall height to 120.
pub const ROD_HALF_HEIGHT: f32 = 54.0;
pub const ROD_RADIUS: f32 = 6.0;

/// Part offsets from the rig origin (the rod center), y growing downward.
const FOOT_OFFSET: Vec2 = Vec2::new(0.0, 40.0);
const TORSO_OFFSET: Vec2 = Vec2::new(0.0, -80.0);
const HEAD_OFFSET: Vec2 = Vec2::new(0.0, -120.0);

/// Handles to the four rig bodies.
#[derive(Debug, Clone, Copy)]
pub struct CharacterRig {
    pub foot: PhysicsBody,
    pub rod: PhysicsBody,
    pub torso: PhysicsBody,
    pub head: PhysicsBody,
}

fn material(profile: &PartProfile) -> ColliderMaterial {
    ColliderMaterial {
        friction: profile.friction,
        restitution: profile.restitution,
        density: profile.density,
    }
}

impl CharacterRig {
    /// Drops a fresh rig into the world around `origin` (the rod center).
    ///
    /// The pivot anchors coincide in the spawn pose, so the rig starts
    /// relaxed instead of snapping into shape on the first step.
    pub fn spawn(world: &mut PhysicsWorld, origin: Vec2, tuning: &RigTuning) -> Self {
        let damping = tuning.air_damping;

        // The foot takes the hardest hits and moves fastest, so it gets
        // continuous collision detection.
        let foot = world.create_body(
            &BodyDesc::dynamic(origin + FOOT_OFFSET, BodyLabel::Foot.tag())
                .with_linear_damping(damping)
                .with_ccd(true),
            ColliderShape::Ball {
                radius: FOOT_RADIUS,
            },
            &material(&tuning.foot),
        );
        let rod = world.create_body(
            &BodyDesc::dynamic(origin, BodyLabel::Rod.tag()).with_linear_damping(damping),
            ColliderShape::CapsuleY {
                half_height: ROD_HALF_HEIGHT,
                radius: ROD_RADIUS,
            },
            &material(&tuning.rod),
        );
        let torso = world.create_body(
            &BodyDesc::dynamic(origin + TORSO_OFFSET, BodyLabel::Torso.tag())
                .with_linear_damping(damping),
            ColliderShape::Ball {
                radius: TORSO_RADIUS,
            },
            &material(&tuning.torso),
        );
        let head = world.create_body(
            &BodyDesc::dynamic(origin + HEAD_OFFSET, BodyLabel::Head.tag())
                .with_linear_damping(damping),
            ColliderShape::Ball {
                radius: HEAD_RADIUS,
            },
            &material(&tuning.head),
        );

        let rig = Self {
            foot,
            rod,
            torso,
            head,
        };
        rig.pin_parts(world, tuning);
        rig
    }

    /// Pivots at the foot center, the rod tip, and the neck. Anchor pairs
    /// resolve to the same world point in the spawn pose.
    fn pin_parts(&self, world: &mut PhysicsWorld, tuning: &RigTuning) {
        let joints = [
            (
                self.foot,
                Vec2::ZERO,
                self.rod,
                Vec2::new(0.0, 40.0),
                &tuning.foot_rod,
            ),
            (
                self.rod,
                Vec2::new(0.0, -60.0),
                self.torso,
                Vec2::new(0.0, 20.0),
                &tuning.rod_torso,
            ),
            (
                self.torso,
                Vec2::new(0.0, -20.0),
                self.head,
                Vec2::new(0.0, 20.0),
                &tuning.torso_head,
            ),
        ];
        for (a, anchor_a, b, anchor_b, profile) in joints {
            world.create_pivot(
                &a,
                &b,
                &PivotSpring {
                    anchor_a,
                    anchor_b,
                    stiffness: profile.stiffness,
                    damping: profile.damping,
                },
            );
        }
    }

    pub fn bodies(&self) -> [PhysicsBody; 4] {
        [self.foot, self.rod, self.torso, self.head]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const ORIGIN: Vec2 = Vec2::new(120.0, 400.0);

    #[test]
    fn spawn_places_the_parts_in_a_vertical_stack() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let rig = CharacterRig::spawn(&mut world, ORIGIN, &RigTuning::default());
        assert_eq!(world.body_count(), 4);
        assert_eq!(world.position(&rig.foot), ORIGIN + Vec2::new(0.0, 40.0));
        assert_eq!(world.position(&rig.rod), ORIGIN);
        assert_eq!(world.position(&rig.torso), ORIGIN + Vec2::new(0.0, -80.0));
        assert_eq!(world.position(&rig.head), ORIGIN + Vec2::new(0.0, -120.0));
    }

    #[test]
    fn parts_carry_their_labels() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        CharacterRig::spawn(&mut world, ORIGIN, &RigTuning::default());
        let mut labels: Vec<_> = world
            .outlines()
            .iter()
            .filter_map(|o| BodyLabel::from_tag(o.tag))
            .collect();
        labels.sort_by_key(|l| *l as u8);
        assert_eq!(
            labels,
            vec![
                BodyLabel::Foot,
                BodyLabel::Rod,
                BodyLabel::Torso,
                BodyLabel::Head
            ]
        );
    }

    #[test]
    fn rig_spawns_relaxed() {
        // No gravity, pivot anchors coincident, motors at their targets:
        // nothing should move.
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let rig = CharacterRig::spawn(&mut world, ORIGIN, &RigTuning::default());
        let before: Vec<_> = rig.bodies().iter().map(|b| world.position(b)).collect();
        let mut contacts = Vec::new();
        for _ in 0..30 {
            world.step(DT, &mut contacts);
        }
        for (body, start) in rig.bodies().iter().zip(before) {
            assert!(
                world.position(body).distance(start) < 1e-3,
                "part drifted from {start:?} to {:?}",
                world.position(body)
            );
        }
    }

    #[test]
    fn rig_holds_together_through_a_drop() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 1000.0));
        world.create_body(
            &BodyDesc::fixed(Vec2::new(120.0, 520.0), BodyLabel::Ground.tag()),
            ColliderShape::Cuboid {
                half_x: 600.0,
                half_y: 20.0,
            },
            &ColliderMaterial {
                friction: 0.9,
                ..ColliderMaterial::default()
            },
        );
        let rig = CharacterRig::spawn(&mut world, ORIGIN, &RigTuning::default());

        let mut contacts = Vec::new();
        for _ in 0..180 {
            world.step(DT, &mut contacts);
        }

        let positions: Vec<_> = rig.bodies().iter().map(|b| world.position(b)).collect();
        for (i, a) in positions.iter().enumerate() {
            assert!(a.y < 520.0, "part {i} sank into the ground at {a:?}");
            for b in &positions[i + 1..] {
                // The pinned chain spans at most 160 px foot to head.
                assert!(
                    a.distance(*b) < 170.0,
                    "rig tore apart: {a:?} vs {b:?}"
                );
            }
        }
    }
}
