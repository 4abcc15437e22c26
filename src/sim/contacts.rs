//! Contact classification.
//!
//! The engine reports generic begin/end contact pairs; this module folds
//! one step's worth of them into the three signals the game reacts to:
//! jump-eligibility changes, goal touches, and lethal head strikes. The
//! fold happens once per step so no partial update can observe an
//! order-dependent intermediate state.

use super::state::BodyLabel;
use crate::physics::ContactPair;

/// Count of currently active foot-on-terrain contacts.
///
/// A lone boolean would drop eligibility when one of two simultaneous
/// contacts ends (foot bridging two stair steps), so the count is what
/// "can jump" is defined on: at least one active qualifying contact.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootContacts {
    active: u32,
}

impl FootContacts {
    pub fn grounded(&self) -> bool {
        self.active > 0
    }

    pub fn apply(&mut self, signals: &StepSignals) {
        self.active += signals.touchdowns;
        self.active = self.active.saturating_sub(signals.liftoffs);
    }
}

/// What one step's contact events amount to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSignals {
    pub touchdowns: u32,
    pub liftoffs: u32,
    pub finish_reached: bool,
    pub lethal_head_hit: bool,
}

/// Folds a step's contact pairs into signals.
///
/// `head_speed` is the head's speed when the fold runs; a hazard strike is
/// fatal only when it strictly exceeds `fatal_speed`, so a graze exactly at
/// the threshold is survivable.
pub fn classify_step(pairs: &[ContactPair], head_speed: f32, fatal_speed: f32) -> StepSignals {
    let mut signals = StepSignals::default();
    for pair in pairs {
        let (Some(a), Some(b)) = (BodyLabel::from_tag(pair.a), BodyLabel::from_tag(pair.b)) else {
            continue;
        };
        if is_foot_support(a, b) {
            if pair.started {
                signals.touchdowns += 1;
            } else {
                signals.liftoffs += 1;
            }
        }
        if !pair.started {
            continue;
        }
        if is_finish_touch(a, b) {
            signals.finish_reached = true;
        }
        if is_head_hazard(a, b) && head_speed > fatal_speed {
            signals.lethal_head_hit = true;
        }
    }
    signals
}

fn is_foot_support(a: BodyLabel, b: BodyLabel) -> bool {
    (a == BodyLabel::Foot && b.supports_foot()) || (b == BodyLabel::Foot && a.supports_foot())
}

fn is_finish_touch(a: BodyLabel, b: BodyLabel) -> bool {
    let reaches = |label: BodyLabel| matches!(label, BodyLabel::Torso | BodyLabel::Head);
    (a == BodyLabel::Finish && reaches(b)) || (b == BodyLabel::Finish && reaches(a))
}

fn is_head_hazard(a: BodyLabel, b: BodyLabel) -> bool {
    (a == BodyLabel::Head && b == BodyLabel::Hazard)
        || (b == BodyLabel::Head && a == BodyLabel::Hazard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BodyTag;

    fn pair(a: BodyLabel, b: BodyLabel, started: bool) -> ContactPair {
        ContactPair {
            a: a.tag(),
            b: b.tag(),
            started,
        }
    }

    #[test]
    fn foot_on_ground_counts_as_touchdown_either_order() {
        for p in [
            pair(BodyLabel::Foot, BodyLabel::Ground, true),
            pair(BodyLabel::Ground, BodyLabel::Foot, true),
            pair(BodyLabel::Foot, BodyLabel::Platform, true),
            pair(BodyLabel::Platform, BodyLabel::Foot, true),
        ] {
            let signals = classify_step(&[p], 0.0, 180.0);
            assert_eq!(signals.touchdowns, 1, "{:?}", p);
            assert_eq!(signals.liftoffs, 0);
        }
    }

    #[test]
    fn foot_leaving_terrain_counts_as_liftoff() {
        let signals = classify_step(&[pair(BodyLabel::Platform, BodyLabel::Foot, false)], 0.0, 180.0);
        assert_eq!(signals.liftoffs, 1);
        assert_eq!(signals.touchdowns, 0);
    }

    #[test]
    fn other_parts_touching_terrain_do_not_grant_eligibility() {
        for label in [BodyLabel::Rod, BodyLabel::Torso, BodyLabel::Head] {
            let signals = classify_step(&[pair(label, BodyLabel::Ground, true)], 0.0, 180.0);
            assert_eq!(signals, StepSignals::default(), "{:?}", label);
        }
    }

    #[test]
    fn foot_on_hazard_is_not_a_touchdown() {
        let signals = classify_step(&[pair(BodyLabel::Foot, BodyLabel::Hazard, true)], 0.0, 180.0);
        assert_eq!(signals.touchdowns, 0);
    }

    #[test]
    fn finish_reacts_to_torso_and_head_only() {
        for label in [BodyLabel::Torso, BodyLabel::Head] {
            let signals = classify_step(&[pair(BodyLabel::Finish, label, true)], 0.0, 180.0);
            assert!(signals.finish_reached, "{:?}", label);
        }
        for label in [BodyLabel::Foot, BodyLabel::Rod] {
            let signals = classify_step(&[pair(label, BodyLabel::Finish, true)], 0.0, 180.0);
            assert!(!signals.finish_reached, "{:?}", label);
        }
    }

    #[test]
    fn finish_end_event_is_ignored() {
        let signals = classify_step(&[pair(BodyLabel::Finish, BodyLabel::Torso, false)], 0.0, 180.0);
        assert!(!signals.finish_reached);
    }

    #[test]
    fn head_hazard_is_fatal_only_above_the_threshold() {
        let hit = [pair(BodyLabel::Head, BodyLabel::Hazard, true)];
        assert!(!classify_step(&hit, 174.0, 180.0).lethal_head_hit);
        assert!(
            !classify_step(&hit, 180.0, 180.0).lethal_head_hit,
            "exactly at the threshold must be survivable"
        );
        assert!(classify_step(&hit, 186.0, 180.0).lethal_head_hit);
    }

    #[test]
    fn non_head_parts_on_hazards_are_harmless() {
        for label in [BodyLabel::Foot, BodyLabel::Rod, BodyLabel::Torso] {
            let signals = classify_step(&[pair(label, BodyLabel::Hazard, true)], 1000.0, 180.0);
            assert!(!signals.lethal_head_hit, "{:?}", label);
        }
    }

    #[test]
    fn untagged_pairs_are_skipped() {
        let stray = ContactPair {
            a: BodyTag(0),
            b: BodyLabel::Foot.tag(),
            started: true,
        };
        assert_eq!(classify_step(&[stray], 0.0, 180.0), StepSignals::default());
    }

    #[test]
    fn mixed_step_folds_every_signal_at_once() {
        let pairs = [
            pair(BodyLabel::Foot, BodyLabel::Ground, true),
            pair(BodyLabel::Foot, BodyLabel::Platform, true),
            pair(BodyLabel::Foot, BodyLabel::Ground, false),
            pair(BodyLabel::Finish, BodyLabel::Head, true),
            pair(BodyLabel::Head, BodyLabel::Hazard, true),
        ];
        let signals = classify_step(&pairs, 200.0, 180.0);
        assert_eq!(signals.touchdowns, 2);
        assert_eq!(signals.liftoffs, 1);
        assert!(signals.finish_reached);
        assert!(signals.lethal_head_hit);
    }

    #[test]
    fn foot_contacts_stay_grounded_while_any_contact_remains() {
        let mut footing = FootContacts::default();
        assert!(!footing.grounded());

        // Land on two stair steps at once.
        footing.apply(&StepSignals {
            touchdowns: 2,
            ..StepSignals::default()
        });
        assert!(footing.grounded());

        // One step ends; the other still holds.
        footing.apply(&StepSignals {
            liftoffs: 1,
            ..StepSignals::default()
        });
        assert!(footing.grounded());

        footing.apply(&StepSignals {
            liftoffs: 1,
            ..StepSignals::default()
        });
        assert!(!footing.grounded());
    }

    #[test]
    fn liftoffs_without_matching_touchdowns_saturate_at_zero() {
        let mut footing = FootContacts::default();
        footing.apply(&StepSignals {
            liftoffs: 3,
            ..StepSignals::default()
        });
        assert!(!footing.grounded());
        footing.apply(&StepSignals {
            touchdowns: 1,
            ..StepSignals::default()
        });
        assert!(footing.grounded(), "stale liftoffs must not owe a debt");
    }
}
