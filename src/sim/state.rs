//! Core simulation data types.

use serde::{Deserialize, Serialize};

use crate::physics::BodyTag;

/// Lifecycle of one run. Terminal phases freeze the simulation until a
/// restart rebuilds the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
    Dead,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Dead)
    }
}

/// Semantic role of a body. Rides on the engine body as its tag and comes
/// back on contact events, which is all the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Ground,
    Platform,
    Hazard,
    Finish,
    Foot,
    Rod,
    Torso,
    Head,
}

impl BodyLabel {
    /// Tag value for the engine. Zero is reserved for untagged bodies.
    pub fn tag(self) -> BodyTag {
        BodyTag(self as u128 + 1)
    }

    pub fn from_tag(tag: BodyTag) -> Option<Self> {
        match tag.0 {
            1 => Some(Self::Ground),
            2 => Some(Self::Platform),
            3 => Some(Self::Hazard),
            4 => Some(Self::Finish),
            5 => Some(Self::Foot),
            6 => Some(Self::Rod),
            7 => Some(Self::Torso),
            8 => Some(Self::Head),
            _ => None,
        }
    }

    /// Terrain the foot can push off from.
    pub fn supports_foot(self) -> bool {
        matches!(self, Self::Ground | Self::Platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BodyLabel; 8] = [
        BodyLabel::Ground,
        BodyLabel::Platform,
        BodyLabel::Hazard,
        BodyLabel::Finish,
        BodyLabel::Foot,
        BodyLabel::Rod,
        BodyLabel::Torso,
        BodyLabel::Head,
    ];

    #[test]
    fn every_label_roundtrips_through_its_tag() {
        for label in ALL {
            assert_eq!(BodyLabel::from_tag(label.tag()), Some(label));
        }
    }

    #[test]
    fn zero_and_unknown_tags_map_to_none() {
        assert_eq!(BodyLabel::from_tag(BodyTag(0)), None);
        assert_eq!(BodyLabel::from_tag(BodyTag(999)), None);
    }

    #[test]
    fn only_ground_and_platform_support_the_foot() {
        for label in ALL {
            let expected = matches!(label, BodyLabel::Ground | BodyLabel::Platform);
            assert_eq!(label.supports_foot(), expected, "{:?}", label);
        }
    }

    #[test]
    fn terminal_phases() {
        assert!(!GamePhase::Playing.is_terminal());
        assert!(GamePhase::Won.is_terminal());
        assert!(GamePhase::Dead.is_terminal());
    }
}
