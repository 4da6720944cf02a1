//! Elements and the four-way advantage cycle.
//!
//! Every combatant carries four elemental attack values (fire, water, wind,
//! earth). The largest of the four decides the combatant's *dominant* element;
//! a combatant whose values are all zero is elementless.
//!
//! The advantage cycle is fixed:
//!
//! ```text
//! Fire -> Wind -> Earth -> Water -> Fire
//! ```
//!
//! where `A -> B` means A attacks B with advantage and B attacks A at a
//! disadvantage. Every other pairing (including same-element and any pairing
//! with an elementless combatant) is neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four combat elements.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Fire. Advantaged against wind.
    Fire,
    /// Water. Advantaged against fire.
    Water,
    /// Wind. Advantaged against earth.
    Wind,
    /// Earth. Advantaged against water.
    Earth,
}

impl Element {
    /// Number of elements.
    pub const COUNT: usize = 4;

    /// All elements in dominance tie-break priority order.
    ///
    /// When two elemental attack values tie for the largest, the element
    /// earlier in this list wins: fire > water > wind > earth.
    pub const PRIORITY: [Element; Element::COUNT] =
        [Element::Fire, Element::Water, Element::Wind, Element::Earth];

    /// Index of this element into per-element value arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fire => 0,
            Self::Water => 1,
            Self::Wind => 2,
            Self::Earth => 3,
        }
    }

    /// The element this one attacks with advantage.
    #[must_use]
    pub const fn advantage_over(self) -> Element {
        match self {
            Self::Fire => Self::Wind,
            Self::Wind => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
        }
    }

    /// Relation of an attack of this element against a defender's dominant
    /// element. An elementless defender (`None`) is always neutral.
    #[must_use]
    pub fn relation_to(self, defender: Option<Element>) -> ElementRelation {
        match defender {
            Some(d) if self.advantage_over() == d => ElementRelation::Advantage,
            Some(d) if d.advantage_over() == self => ElementRelation::Disadvantage,
            _ => ElementRelation::Neutral,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fire => write!(f, "Fire"),
            Self::Water => write!(f, "Water"),
            Self::Wind => write!(f, "Wind"),
            Self::Earth => write!(f, "Earth"),
        }
    }
}

/// Outcome of matching an attacker's dominant element against a defender's.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRelation {
    /// Attacker is one step ahead in the cycle; defense is bypassed.
    Advantage,
    /// Unrelated, same, or elementless pairing.
    Neutral,
    /// Attacker is one step behind in the cycle; the elemental bonus shrinks.
    Disadvantage,
}

/// Determines the dominant element of a set of per-element attack values.
///
/// The dominant element is the one with the strictly largest value; ties are
/// broken by [`Element::PRIORITY`]. Returns `None` when the largest value is
/// zero (the combatant is elementless). Negative values never dominate.
#[must_use]
pub fn dominant(values: [i32; Element::COUNT]) -> Option<Element> {
    let mut best = Element::PRIORITY[0];
    for element in Element::PRIORITY {
        if values[element.index()] > values[best.index()] {
            best = element;
        }
    }
    (values[best.index()] > 0).then_some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_16_element_pairs() {
        use Element::*;
        // Same element is neutral
        assert_eq!(Fire.relation_to(Some(Fire)), ElementRelation::Neutral);
        assert_eq!(Water.relation_to(Some(Water)), ElementRelation::Neutral);
        assert_eq!(Wind.relation_to(Some(Wind)), ElementRelation::Neutral);
        assert_eq!(Earth.relation_to(Some(Earth)), ElementRelation::Neutral);

        // Advantages follow the cycle fire -> wind -> earth -> water -> fire
        assert_eq!(Fire.relation_to(Some(Wind)), ElementRelation::Advantage);
        assert_eq!(Wind.relation_to(Some(Earth)), ElementRelation::Advantage);
        assert_eq!(Earth.relation_to(Some(Water)), ElementRelation::Advantage);
        assert_eq!(Water.relation_to(Some(Fire)), ElementRelation::Advantage);

        // Reversed pairings are disadvantages
        assert_eq!(Wind.relation_to(Some(Fire)), ElementRelation::Disadvantage);
        assert_eq!(Earth.relation_to(Some(Wind)), ElementRelation::Disadvantage);
        assert_eq!(Water.relation_to(Some(Earth)), ElementRelation::Disadvantage);
        assert_eq!(Fire.relation_to(Some(Water)), ElementRelation::Disadvantage);

        // Non-adjacent pairings are neutral
        assert_eq!(Fire.relation_to(Some(Earth)), ElementRelation::Neutral);
        assert_eq!(Earth.relation_to(Some(Fire)), ElementRelation::Neutral);
        assert_eq!(Water.relation_to(Some(Wind)), ElementRelation::Neutral);
        assert_eq!(Wind.relation_to(Some(Water)), ElementRelation::Neutral);
    }

    #[test]
    fn elementless_defender_is_neutral() {
        for element in Element::PRIORITY {
            assert_eq!(element.relation_to(None), ElementRelation::Neutral);
        }
    }

    mod dominant_tests {
        use super::*;

        #[test]
        fn largest_value_wins() {
            assert_eq!(dominant([5, 20, 3, 0]), Some(Element::Water));
            assert_eq!(dominant([0, 0, 0, 7]), Some(Element::Earth));
        }

        #[test]
        fn ties_resolve_by_priority() {
            // fire > water > wind > earth
            assert_eq!(dominant([10, 10, 10, 10]), Some(Element::Fire));
            assert_eq!(dominant([0, 10, 10, 10]), Some(Element::Water));
            assert_eq!(dominant([0, 0, 10, 10]), Some(Element::Wind));
        }

        #[test]
        fn all_zero_is_elementless() {
            assert_eq!(dominant([0, 0, 0, 0]), None);
        }

        #[test]
        fn negative_values_never_dominate() {
            assert_eq!(dominant([-5, -3, -8, -1]), None);
            assert_eq!(dominant([-5, 2, -8, 0]), Some(Element::Water));
        }

        #[test]
        fn index_matches_priority_layout() {
            for (i, element) in Element::PRIORITY.iter().enumerate() {
                assert_eq!(element.index(), i);
            }
        }
    }
}
