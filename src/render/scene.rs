//! Draw-command generation for one frame
//!
//! Everything is emitted in screen coordinates: the camera offset is
//! already baked into body outlines and the finish banner, while the
//! parallax hills scroll at a fraction of it. Command order is paint
//! order, back to front.

use glam::Vec2;

use crate::sim::{BodyLabel, GamePhase, GameSession};

/// Hills scroll at this fraction of the camera.
const PARALLAX: f32 = 0.4;
/// Horizontal sample spacing of a hill ridge, px.
const HILL_STEP: f32 = 16.0;
const HILL_BACK: &str = "#a0d8ff";
const HILL_FRONT: &str = "#7cc5ff";
/// Sensors draw as translucent ghosts.
const SENSOR_ALPHA: f32 = 0.18;
const FLAG_TILT: f32 = -0.1;

/// One canvas drawing instruction. Colors are CSS color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole viewport.
    Clear { width: f32, height: f32 },
    /// Fill a closed polygon.
    Fill {
        points: Vec<Vec2>,
        color: &'static str,
        alpha: f32,
    },
    /// Fill a closed polygon and stroke its rim.
    Body {
        points: Vec<Vec2>,
        color: &'static str,
        alpha: f32,
    },
    /// Centered text, rotated by `angle` around `pos`.
    Text {
        pos: Vec2,
        angle: f32,
        text: &'static str,
        color: &'static str,
        font: &'static str,
    },
}

/// Composes the full frame for the current session state.
pub fn compose(session: &GameSession) -> Vec<DrawCommand> {
    let view = session.camera().view;
    let cam = session.camera().offset_x;
    let shift = Vec2::new(cam, 0.0);

    let mut scene = Vec::new();
    scene.push(DrawCommand::Clear {
        width: view.x,
        height: view.y,
    });
    scene.push(DrawCommand::Fill {
        points: hill_band(view, cam, 0.0, 18.0, view.y * 0.55),
        color: HILL_BACK,
        alpha: 1.0,
    });
    scene.push(DrawCommand::Fill {
        points: hill_band(view, cam, 200.0, 22.0, view.y * 0.62),
        color: HILL_FRONT,
        alpha: 1.0,
    });

    for outline in session.outlines() {
        let color = body_color(BodyLabel::from_tag(outline.tag));
        let points = outline.points.iter().map(|p| *p - shift).collect();
        scene.push(DrawCommand::Body {
            points,
            color,
            alpha: if outline.sensor { SENSOR_ALPHA } else { 1.0 },
        });
    }

    banner(&mut scene, session.finish_position() - shift);
    overlay(&mut scene, view, session.phase());
    scene
}

fn body_color(label: Option<BodyLabel>) -> &'static str {
    match label {
        Some(BodyLabel::Ground) | Some(BodyLabel::Platform) => "#334155",
        Some(BodyLabel::Hazard) => "#ef4444",
        Some(BodyLabel::Finish) => "#22c55e",
        Some(BodyLabel::Rod) => "#9ca3af",
        Some(BodyLabel::Torso) => "#60a5fa",
        Some(BodyLabel::Head) => "#facc15",
        Some(BodyLabel::Foot) => "#a78bfa",
        None => "#374151",
    }
}

/// One sine ridge, sampled across three viewport widths and closed along
/// the bottom edge.
fn hill_band(view: Vec2, cam: f32, phase: f32, amp: f32, base_y: f32) -> Vec<Vec2> {
    let w = view.x;
    let scroll = cam * PARALLAX;
    let mut points = Vec::new();
    points.push(Vec2::new(-w, view.y));
    let mut x = -w;
    while x <= w * 3.0 {
        let y = base_y + ((x + phase - scroll) * 0.002).sin() * amp;
        points.push(Vec2::new(x - scroll, y));
        x += HILL_STEP;
    }
    points.push(Vec2::new(w * 3.0, view.y));
    points
}

fn rect(top_left: Vec2, width: f32, height: f32) -> Vec<Vec2> {
    vec![
        top_left,
        top_left + Vec2::new(width, 0.0),
        top_left + Vec2::new(width, height),
        top_left + Vec2::new(0.0, height),
    ]
}

/// Goal flag: pole through the sensor, tilted cloth at the top.
fn banner(scene: &mut Vec<DrawCommand>, at: Vec2) {
    scene.push(DrawCommand::Fill {
        points: rect(at + Vec2::new(-2.0, -140.0), 4.0, 280.0),
        color: "#22c55e",
        alpha: 1.0,
    });

    let top = at + Vec2::new(0.0, -160.0);
    let tilt = Vec2::from_angle(FLAG_TILT);
    let cloth = [
        Vec2::new(-36.0, -14.0),
        Vec2::new(36.0, -14.0),
        Vec2::new(36.0, 14.0),
        Vec2::new(-36.0, 14.0),
    ];
    scene.push(DrawCommand::Fill {
        points: cloth.iter().map(|p| top + tilt.rotate(*p)).collect(),
        color: "#16a34a",
        alpha: 1.0,
    });
    scene.push(DrawCommand::Text {
        pos: top + tilt.rotate(Vec2::new(0.0, 4.0)),
        angle: FLAG_TILT,
        text: "FINISH",
        color: "#fff",
        font: "bold 12px ui-sans-serif",
    });
}

/// End-of-run card over a darkened viewport. Playing draws nothing.
fn overlay(scene: &mut Vec<DrawCommand>, view: Vec2, phase: GamePhase) {
    let (badge, title, sub) = match phase {
        GamePhase::Won => ("Level Complete", "Victory!", "Nice pogo skills."),
        GamePhase::Dead => ("You Died", "Try Again", "Watch those spikes."),
        GamePhase::Playing => return,
    };
    scene.push(DrawCommand::Fill {
        points: rect(Vec2::ZERO, view.x, view.y),
        color: "#0f172a",
        alpha: 0.55,
    });
    let center = view * 0.5;
    let lines = [
        (badge, "#93c5fd", "600 13px ui-sans-serif", -44.0),
        (title, "#f8fafc", "bold 28px ui-sans-serif", -8.0),
        (sub, "#cbd5e1", "14px ui-sans-serif", 22.0),
        ("Restart (R)", "#e2e8f0", "600 14px ui-sans-serif", 56.0),
    ];
    for (text, color, font, dy) in lines {
        scene.push(DrawCommand::Text {
            pos: center + Vec2::new(0.0, dy),
            angle: 0.0,
            text,
            color,
            font,
        });
    }
}
