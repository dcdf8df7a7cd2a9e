//! Unordered participant pair used to key direct conversations.

use crate::domain::foundation::ParticipantId;

/// An unordered pair of participants.
///
/// `(alice, bob)` and `(bob, alice)` normalize to the same value, so the
/// pair can be used directly as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantPair {
    low: ParticipantId,
    high: ParticipantId,
}

impl ParticipantPair {
    /// Builds the normalized pair.
    pub fn new(a: ParticipantId, b: ParticipantId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn first(&self) -> &ParticipantId {
        &self.low
    }

    pub fn second(&self) -> &ParticipantId {
        &self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_does_not_matter() {
        let ab = ParticipantPair::new("alice".into(), "bob".into());
        let ba = ParticipantPair::new("bob".into(), "alice".into());
        assert_eq!(ab, ba);
        assert_eq!(ab.first().as_str(), "alice");
        assert_eq!(ab.second().as_str(), "bob");
    }

    #[test]
    fn self_pair_has_equal_sides() {
        let pair = ParticipantPair::new("alice".into(), "alice".into());
        assert_eq!(pair.first(), pair.second());
    }

    proptest! {
        #[test]
        fn normalization_is_symmetric(a in "[a-z0-9]{0,12}", b in "[a-z0-9]{0,12}") {
            let ab = ParticipantPair::new(ParticipantId::new(a.clone()), ParticipantId::new(b.clone()));
            let ba = ParticipantPair::new(ParticipantId::new(b), ParticipantId::new(a));
            prop_assert_eq!(&ab, &ba);
            prop_assert!(ab.first() <= ab.second());
        }
    }
}
