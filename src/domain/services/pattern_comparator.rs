use std::cmp::Ordering;

use crate::domain::value_objects::{CardPattern, PatternType};

/// Compare two patterns.
///
/// Rocket beats everything, a bomb beats every non-bomb, two bombs compare by
/// value, and patterns of the same type compare by value when their lengths
/// match. Any other pairing is incomparable and yields `None`.
pub fn compare_patterns(a: &CardPattern, b: &CardPattern) -> Option<Ordering> {
    use PatternType::{Bomb, Rocket};

    match (a.pattern_type, b.pattern_type) {
        (Rocket, Rocket) => Some(Ordering::Equal),
        (Rocket, _) => Some(Ordering::Greater),
        (_, Rocket) => Some(Ordering::Less),
        (Bomb, Bomb) => Some(a.value.cmp(&b.value)),
        (Bomb, _) => Some(Ordering::Greater),
        (_, Bomb) => Some(Ordering::Less),
        (x, y) if x == y && a.length == b.length => Some(a.value.cmp(&b.value)),
        _ => None,
    }
}

/// True when `challenger` strictly beats `incumbent`
#[inline]
pub fn can_beat(challenger: &CardPattern, incumbent: &CardPattern) -> bool {
    compare_patterns(challenger, incumbent) == Some(Ordering::Greater)
}
