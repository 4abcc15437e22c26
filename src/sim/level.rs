//! Static level geometry.
//!
//! One fixed, deterministic layout: a long ground slab, four angled
//! platforms, a spike field, a staircase, and the finish sensor. Vertical
//! positions are measured down from the viewport height `h` so the ground
//! hugs the bottom edge of the default view.

use glam::Vec2;

use super::state::BodyLabel;
use crate::physics::{BodyDesc, ColliderMaterial, ColliderShape, PhysicsWorld};

const GROUND_FRICTION: f32 = 0.9;
/// Grippy enough to snag a grazing body, slightly bouncy.
const SPIKE_MATERIAL: ColliderMaterial = ColliderMaterial {
    friction: 0.6,
    restitution: 0.2,
    density: 0.001,
};

/// One static body of the layout.
#[derive(Debug, Clone)]
pub struct LevelBody {
    pub label: BodyLabel,
    pub shape: ColliderShape,
    pub position: Vec2,
    pub angle: f32,
    pub material: ColliderMaterial,
    pub sensor: bool,
}

/// The full static layout plus the character spawn point.
#[derive(Debug, Clone)]
pub struct Level {
    pub bodies: Vec<LevelBody>,
    pub spawn: Vec2,
    /// Center of the finish sensor; the goal banner is drawn here.
    pub finish: Vec2,
}

impl Level {
    /// Builds the standard layout for a viewport `view_h` pixels tall.
    pub fn standard(view_h: f32) -> Self {
        let h = view_h;
        let mut bodies = Vec::with_capacity(26);

        bodies.push(LevelBody {
            label: BodyLabel::Ground,
            shape: ColliderShape::Cuboid {
                half_x: 3000.0,
                half_y: 20.0,
            },
            position: Vec2::new(2000.0, h - 20.0),
            angle: 0.0,
            material: ColliderMaterial {
                friction: GROUND_FRICTION,
                ..ColliderMaterial::default()
            },
            sensor: false,
        });

        // Four tilted platforms over the first stretch.
        let platforms = [
            (600.0, h - 120.0, 200.0, -0.15),
            (950.0, h - 180.0, 220.0, 0.2),
            (1300.0, h - 140.0, 160.0, -0.25),
            (1650.0, h - 210.0, 180.0, 0.15),
        ];
        for (x, y, width, angle) in platforms {
            bodies.push(LevelBody {
                label: BodyLabel::Platform,
                shape: ColliderShape::Cuboid {
                    half_x: width / 2.0,
                    half_y: 8.0,
                },
                position: Vec2::new(x, y),
                angle,
                material: ColliderMaterial::default(),
                sensor: false,
            });
        }

        // Spike field: twelve isosceles triangles, apex up, each centered
        // about its centroid so the body position is the visual center.
        let half = 21.0;
        let centroid_y = half / 3.0;
        for i in 0..12 {
            bodies.push(LevelBody {
                label: BodyLabel::Hazard,
                shape: ColliderShape::Triangle {
                    a: Vec2::new(-half, half - centroid_y),
                    b: Vec2::new(half, half - centroid_y),
                    c: Vec2::new(0.0, -half - centroid_y),
                },
                position: Vec2::new(1950.0 + i as f32 * 38.0, h - 58.0),
                angle: 0.0,
                material: SPIKE_MATERIAL,
                sensor: false,
            });
        }

        // Staircase up toward the finish. Steps count as platforms for
        // jump eligibility.
        for i in 0..8 {
            bodies.push(LevelBody {
                label: BodyLabel::Platform,
                shape: ColliderShape::Cuboid {
                    half_x: 55.0,
                    half_y: 7.0,
                },
                position: Vec2::new(2300.0 + i as f32 * 120.0, h - 40.0 - i as f32 * 26.0),
                angle: 0.0,
                material: ColliderMaterial::default(),
                sensor: false,
            });
        }

        let finish = Vec2::new(3600.0, h - 160.0);
        bodies.push(LevelBody {
            label: BodyLabel::Finish,
            shape: ColliderShape::Cuboid {
                half_x: 10.0,
                half_y: 140.0,
            },
            position: finish,
            angle: 0.0,
            material: ColliderMaterial::default(),
            sensor: true,
        });

        Self {
            bodies,
            spawn: Vec2::new(120.0, h - 140.0),
            finish,
        }
    }

    /// Registers every body of the layout into the world.
    pub fn spawn_into(&self, world: &mut PhysicsWorld) {
        for body in &self.bodies {
            let desc = BodyDesc::fixed(body.position, body.label.tag())
                .with_rotation(body.angle)
                .with_sensor(body.sensor);
            world.create_body(&desc, body.shape, &body.material);
        }
    }
}
