//! Rigid-body physics backed by rapier2d.
//!
//! The game core never touches rapier types directly: bodies are created
//! from small descriptors, every body carries an opaque [`BodyTag`] that is
//! echoed back in the per-step contact stream, and colliders can be read
//! back as world-space polygon outlines for drawing. Coordinates are screen
//! pixels with +y down; velocities are px/s.

use std::sync::Mutex;

use glam::Vec2;
use rapier2d::na;
use rapier2d::prelude::*;

/// Circle outlines are approximated with this many segments.
const CIRCLE_SEGMENTS: usize = 24;
/// Segments per capsule end cap.
const CAP_SEGMENTS: usize = 8;

#[inline]
fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

#[inline]
fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Opaque tag attached to a body, carried on contact events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyTag(pub u128);

/// Whether a body is simulated or anchored in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Fixed,
}

/// Collision geometry, in local body coordinates.
#[derive(Debug, Clone, Copy)]
pub enum ColliderShape {
    Ball { radius: f32 },
    Cuboid { half_x: f32, half_y: f32 },
    /// Vertical capsule: a segment of `2 * half_height` with round caps.
    CapsuleY { half_height: f32, radius: f32 },
    Triangle { a: Vec2, b: Vec2, c: Vec2 },
}

/// Surface/mass properties of a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    /// Baseline material the level geometry assumes.
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.0,
            density: 0.001,
        }
    }
}

/// Everything needed to place one body with one collider.
#[derive(Debug, Clone, Copy)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub rotation: f32,
    pub linear_damping: f32,
    pub sensor: bool,
    pub ccd: bool,
    pub tag: BodyTag,
}

impl BodyDesc {
    pub fn dynamic(position: Vec2, tag: BodyTag) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position,
            rotation: 0.0,
            linear_damping: 0.0,
            sensor: false,
            ccd: false,
            tag,
        }
    }

    pub fn fixed(position: Vec2, tag: BodyTag) -> Self {
        Self {
            kind: BodyKind::Fixed,
            position,
            rotation: 0.0,
            linear_damping: 0.0,
            sensor: false,
            ccd: false,
            tag,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_ccd(mut self, ccd: bool) -> Self {
        self.ccd = ccd;
        self
    }
}

/// Handle pair for a spawned body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

/// Pivot joint between two bodies with a torsional spring.
///
/// The two local anchors are pinned to the same world point; the spring
/// drives the bodies' relative angle back to its value at creation time
/// (zero for unrotated bodies). Gains are acceleration-based: `stiffness`
/// in rad/s² per radian of bend, `damping` in 1/s. A zero stiffness
/// leaves the pivot free to swivel against the damping only.
#[derive(Debug, Clone, Copy)]
pub struct PivotSpring {
    pub anchor_a: Vec2,
    pub anchor_b: Vec2,
    pub stiffness: f32,
    pub damping: f32,
}

/// One begin/end contact between two tagged bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactPair {
    pub a: BodyTag,
    pub b: BodyTag,
    pub started: bool,
}

/// World-space polygon outline of one collider, for drawing.
#[derive(Debug, Clone)]
pub struct Outline {
    pub tag: BodyTag,
    pub sensor: bool,
    pub points: Vec<Vec2>,
}

struct RawContact {
    a: ColliderHandle,
    b: ColliderHandle,
    started: bool,
}

/// Buffers rapier collision events during a step for draining afterwards.
#[derive(Default)]
struct ContactCollector {
    queue: Mutex<Vec<RawContact>>,
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&rapier2d::geometry::ContactPair>,
    ) {
        let (a, b, started) = match event {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(RawContact { a, b, started });
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &rapier2d::geometry::ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Owns the full rapier state for one world.
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    gravity: na::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    events: ContactCollector,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            events: ContactCollector::default(),
        }
    }

    /// Spawns one body with one collider and returns its handles.
    ///
    /// The tag lands in rapier's `user_data` and comes back on every
    /// contact event involving this body.
    pub fn create_body(
        &mut self,
        desc: &BodyDesc,
        shape: ColliderShape,
        material: &ColliderMaterial,
    ) -> PhysicsBody {
        let builder = match desc.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Fixed => RigidBodyBuilder::fixed(),
        };
        let body = builder
            .translation(vec2_to_na(desc.position))
            .rotation(desc.rotation)
            .linear_damping(desc.linear_damping)
            .ccd_enabled(desc.ccd)
            .user_data(desc.tag.0)
            .build();
        let body_handle = self.bodies.insert(body);

        let shape_builder = match shape {
            ColliderShape::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderShape::Cuboid { half_x, half_y } => ColliderBuilder::cuboid(half_x, half_y),
            ColliderShape::CapsuleY {
                half_height,
                radius,
            } => ColliderBuilder::capsule_y(half_height, radius),
            ColliderShape::Triangle { a, b, c } => ColliderBuilder::triangle(
                point![a.x, a.y],
                point![b.x, b.y],
                point![c.x, c.y],
            ),
        };
        // Max restitution / min friction pairing keeps a bouncy part bouncy
        // against dead terrain instead of averaging it away.
        let collider = shape_builder
            .friction(material.friction)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(material.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .density(material.density)
            .sensor(desc.sensor)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body: body_handle,
            collider: collider_handle,
        }
    }

    /// Removes a body together with its collider and any attached joints.
    pub fn remove_body(&mut self, body: PhysicsBody) {
        self.bodies.remove(
            body.body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Pins two bodies at a shared anchor with a torsional spring on
    /// their relative angle.
    ///
    /// Contacts between the two bodies are disabled: pivoted parts sit
    /// close enough to overlap, and depenetration would fight the joint.
    pub fn create_pivot(
        &mut self,
        a: &PhysicsBody,
        b: &PhysicsBody,
        spec: &PivotSpring,
    ) -> ImpulseJointHandle {
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(point![spec.anchor_a.x, spec.anchor_a.y])
            .local_anchor2(point![spec.anchor_b.x, spec.anchor_b.y])
            .motor_position(0.0, spec.stiffness, spec.damping)
            .contacts_enabled(false);
        self.impulse_joints.insert(a.body, b.body, joint, true)
    }

    /// Advances the world by `dt` seconds and drains this step's contact
    /// events into `contacts` (cleared first).
    ///
    /// Forces pushed with [`PhysicsWorld::push`] act for this step only.
    pub fn step(&mut self, dt: f32, contacts: &mut Vec<ContactPair>) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.events,
        );
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
        }

        contacts.clear();
        let raw = match self.events.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        };
        for contact in raw {
            let (Some(a), Some(b)) = (self.tag_of(contact.a), self.tag_of(contact.b)) else {
                continue;
            };
            contacts.push(ContactPair {
                a,
                b,
                started: contact.started,
            });
        }
    }

    fn tag_of(&self, collider: ColliderHandle) -> Option<BodyTag> {
        let parent = self.colliders.get(collider)?.parent()?;
        Some(BodyTag(self.bodies.get(parent)?.user_data))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn position(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body)
            .map(|b| na_to_vec2(b.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleports a body, zeroing its rotation.
    pub fn set_position(&mut self, body: &PhysicsBody, position: Vec2) {
        if let Some(b) = self.bodies.get_mut(body.body) {
            b.set_position(na::Isometry2::translation(position.x, position.y), true);
        }
    }

    pub fn rotation(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body)
            .map(|b| b.rotation().angle())
            .unwrap_or(0.0)
    }

    pub fn linvel(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body)
            .map(|b| na_to_vec2(b.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    pub fn set_linvel(&mut self, body: &PhysicsBody, velocity: Vec2) {
        if let Some(b) = self.bodies.get_mut(body.body) {
            b.set_linvel(vec2_to_na(velocity), true);
        }
    }

    pub fn angvel(&self, body: &PhysicsBody) -> f32 {
        self.bodies.get(body.body).map(|b| b.angvel()).unwrap_or(0.0)
    }

    pub fn set_angvel(&mut self, body: &PhysicsBody, angvel: f32) {
        if let Some(b) = self.bodies.get_mut(body.body) {
            b.set_angvel(angvel, true);
        }
    }

    /// Instantaneous momentum change (mass-scaled).
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(b) = self.bodies.get_mut(body.body) {
            b.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Applies a force for the next step only.
    pub fn push(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(b) = self.bodies.get_mut(body.body) {
            b.add_force(vec2_to_na(force), true);
        }
    }

    /// World-space outlines of every collider, in insertion order.
    pub fn outlines(&self) -> Vec<Outline> {
        let mut outlines = Vec::with_capacity(self.colliders.len());
        for (_, collider) in self.colliders.iter() {
            let Some(tag) = collider.parent().and_then(|parent| {
                self.bodies.get(parent).map(|b| BodyTag(b.user_data))
            }) else {
                continue;
            };
            let local = local_outline(collider.shape());
            if local.is_empty() {
                continue;
            }
            let rot = Vec2::from_angle(collider.rotation().angle());
            let origin = na_to_vec2(collider.translation());
            let points = local.iter().map(|p| origin + rot.rotate(*p)).collect();
            outlines.push(Outline {
                tag,
                sensor: collider.is_sensor(),
                points,
            });
        }
        outlines
    }
}

/// Polygonizes a shape in its local frame.
fn local_outline(shape: &dyn Shape) -> Vec<Vec2> {
    if let Some(ball) = shape.as_ball() {
        let mut points = Vec::with_capacity(CIRCLE_SEGMENTS);
        for i in 0..CIRCLE_SEGMENTS {
            let theta = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
            points.push(Vec2::new(ball.radius * theta.cos(), ball.radius * theta.sin()));
        }
        points
    } else if let Some(cuboid) = shape.as_cuboid() {
        let hx = cuboid.half_extents.x;
        let hy = cuboid.half_extents.y;
        vec![
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
        ]
    } else if let Some(capsule) = shape.as_capsule() {
        // Stadium: half circle around each segment end.
        let a = Vec2::new(capsule.segment.a.x, capsule.segment.a.y);
        let b = Vec2::new(capsule.segment.b.x, capsule.segment.b.y);
        let r = capsule.radius;
        let axis = (b - a).normalize_or_zero();
        let base = axis.y.atan2(axis.x);
        let mut points = Vec::with_capacity(2 * (CAP_SEGMENTS + 1));
        for i in 0..=CAP_SEGMENTS {
            let theta = base - std::f32::consts::FRAC_PI_2
                + std::f32::consts::PI * (i as f32 / CAP_SEGMENTS as f32);
            points.push(b + r * Vec2::new(theta.cos(), theta.sin()));
        }
        for i in 0..=CAP_SEGMENTS {
            let theta = base + std::f32::consts::FRAC_PI_2
                + std::f32::consts::PI * (i as f32 / CAP_SEGMENTS as f32);
            points.push(a + r * Vec2::new(theta.cos(), theta.sin()));
        }
        points
    } else if let Some(triangle) = shape.as_triangle() {
        vec![
            Vec2::new(triangle.a.x, triangle.a.y),
            Vec2::new(triangle.b.x, triangle.b.y),
            Vec2::new(triangle.c.x, triangle.c.y),
        ]
    } else {
        Vec::new()
    }
}
