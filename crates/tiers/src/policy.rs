//! Tier access policy.
//!
//! Access is monotonic in rank: a tier can see anything gated at its own rank
//! or below. The policy says nothing about which direction a user may move
//! between tiers; see [`crate::upgrade`].

use serde::{Serialize, Serializer};

use eventtier_core::ValueObject;

use crate::Tier;

/// Returns true iff `user_tier` ranks at or above `required_tier`.
pub fn can_access(user_tier: Tier, required_tier: Tier) -> bool {
    user_tier.rank() >= required_tier.rank()
}

/// Every tier whose rank does not exceed `user_tier`'s rank.
pub fn accessible_tiers(user_tier: Tier) -> TierSet {
    Tier::ALL
        .into_iter()
        .filter(|t| t.rank() <= user_tier.rank())
        .collect()
}

/// Set of tiers, stored as a rank bitmask.
///
/// Membership is what matters; iteration runs lowest rank first so display
/// output is stable.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct TierSet(u8);

impl ValueObject for TierSet {}

impl TierSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Tier::ALL.into_iter().collect()
    }

    fn bit(tier: Tier) -> u8 {
        1 << tier.rank()
    }

    pub fn insert(&mut self, tier: Tier) {
        self.0 |= Self::bit(tier);
    }

    pub fn contains(&self, tier: Tier) -> bool {
        self.0 & Self::bit(tier) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Tier> + '_ {
        Tier::ALL.into_iter().filter(|t| self.contains(*t))
    }

    /// Highest-ranked member, if any.
    pub fn max(&self) -> Option<Tier> {
        self.iter().last()
    }
}

impl FromIterator<Tier> for TierSet {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        let mut set = TierSet::empty();
        for tier in iter {
            set.insert(tier);
        }
        set
    }
}

impl Serialize for TierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Tier::*;

    #[test]
    fn can_access_all_sixteen_pairs() {
        assert!(can_access(Free, Free));
        assert!(!can_access(Free, Silver));
        assert!(!can_access(Free, Gold));
        assert!(!can_access(Free, Platinum));

        assert!(can_access(Silver, Free));
        assert!(can_access(Silver, Silver));
        assert!(!can_access(Silver, Gold));
        assert!(!can_access(Silver, Platinum));

        assert!(can_access(Gold, Free));
        assert!(can_access(Gold, Silver));
        assert!(can_access(Gold, Gold));
        assert!(!can_access(Gold, Platinum));

        assert!(can_access(Platinum, Free));
        assert!(can_access(Platinum, Silver));
        assert!(can_access(Platinum, Gold));
        assert!(can_access(Platinum, Platinum));
    }

    #[test]
    fn accessible_tiers_for_gold_excludes_platinum() {
        let set = accessible_tiers(Gold);
        assert_eq!(set, [Free, Silver, Gold].into_iter().collect());
        assert!(!set.contains(Platinum));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn accessible_tiers_for_platinum_is_everything() {
        assert_eq!(accessible_tiers(Platinum), TierSet::all());
        assert_eq!(accessible_tiers(Platinum).len(), 4);
    }

    #[test]
    fn accessible_tiers_for_free_is_only_free() {
        let set = accessible_tiers(Free);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Free]);
    }

    #[test]
    fn tier_set_iterates_in_rank_order_and_serializes_names() {
        let set: TierSet = [Gold, Free].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Free, Gold]);
        assert_eq!(set.max(), Some(Gold));
        assert_eq!(
            serde_json::to_value(set).unwrap(),
            serde_json::json!(["free", "gold"])
        );
        assert!(TierSet::empty().is_empty());
        assert_eq!(TierSet::empty().max(), None);
    }

    fn any_tier() -> impl Strategy<Value = Tier> {
        prop::sample::select(Tier::ALL.to_vec())
    }

    proptest! {
        /// Raising the viewer's tier never revokes access.
        #[test]
        fn access_is_monotonic(a in any_tier(), b in any_tier(), c in any_tier()) {
            if can_access(a, b) && c.rank() >= a.rank() {
                prop_assert!(can_access(c, b));
            }
        }

        /// Set membership and the predicate agree everywhere.
        #[test]
        fn accessible_set_matches_predicate(user in any_tier(), required in any_tier()) {
            prop_assert_eq!(accessible_tiers(user).contains(required), can_access(user, required));
        }

        /// The user's own tier is always the top of their accessible set.
        #[test]
        fn accessible_set_is_topped_by_own_tier(user in any_tier()) {
            let set = accessible_tiers(user);
            prop_assert_eq!(set.max(), Some(user));
            prop_assert_eq!(set.len(), user.rank() as usize + 1);
        }
    }
}
