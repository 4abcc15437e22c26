//! Horizontal follow camera.
//!
//! The camera eases toward keeping its focus centered, trailing fast
//! movement instead of snapping. Only x scrolls; the level fits the
//! viewport vertically.

use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// World x of the viewport's left edge.
    pub offset_x: f32,
    pub view: Vec2,
}

impl Camera {
    pub fn new(view: Vec2) -> Self {
        Self { offset_x: 0.0, view }
    }

    /// Moves a `smoothing` fraction of the way toward centering `focus_x`,
    /// never past the level's left edge.
    pub fn follow(&mut self, focus_x: f32, smoothing: f32) {
        let target = focus_x - self.view.x * 0.5;
        self.offset_x += (target - self.offset_x) * smoothing;
        self.offset_x = self.offset_x.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(960.0, 540.0))
    }

    #[test]
    fn follow_eases_part_of_the_way_per_call() {
        let mut cam = camera();
        cam.follow(2000.0, 0.08);
        // One step covers 8% of the gap to the centering target.
        assert!((cam.offset_x - (2000.0 - 480.0) * 0.08).abs() < 1e-3);
    }

    #[test]
    fn follow_converges_on_a_still_focus() {
        let mut cam = camera();
        for _ in 0..500 {
            cam.follow(2000.0, 0.08);
        }
        assert!((cam.offset_x - 1520.0).abs() < 0.5);
    }

    #[test]
    fn camera_never_scrolls_past_the_left_edge() {
        let mut cam = camera();
        cam.follow(60.0, 0.08);
        assert_eq!(cam.offset_x, 0.0);
        // Even a focus far left of the level stays pinned.
        cam.follow(-5000.0, 1.0);
        assert_eq!(cam.offset_x, 0.0);
    }

    proptest! {
        #[test]
        fn offset_stays_clamped_for_any_focus_path(
            path in proptest::collection::vec(-1.0e4_f32..4.0e4, 1..64),
            smoothing in 0.01_f32..1.0,
        ) {
            let mut cam = camera();
            for focus in path {
                cam.follow(focus, smoothing);
                prop_assert!(cam.offset_x >= 0.0);
                prop_assert!(cam.offset_x.is_finite());
            }
        }
    }
}
