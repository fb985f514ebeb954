//! Upgrade direction rules.
//!
//! Membership only moves up. This is kept apart from the access predicate,
//! which is direction-agnostic; the upgrade flow checks [`check_upgrade`]
//! before it writes anything.

use eventtier_core::{DomainError, DomainResult};

use crate::Tier;

impl Tier {
    /// True iff `target` ranks strictly above `self`.
    pub fn is_upgrade_to(self, target: Tier) -> bool {
        target.rank() > self.rank()
    }

    /// Tiers a holder of `self` may still move to, lowest first.
    pub fn upgrade_targets(self) -> impl Iterator<Item = Tier> {
        Tier::ALL.into_iter().filter(move |t| self.is_upgrade_to(*t))
    }
}

/// Validate a requested tier change.
///
/// Lateral moves and downgrades are invariant violations.
pub fn check_upgrade(current: Tier, target: Tier) -> DomainResult<()> {
    if current == target {
        return Err(DomainError::invariant(format!("already on the {current} tier")));
    }
    if !current.is_upgrade_to(target) {
        return Err(DomainError::invariant(format!(
            "downgrade from {current} to {target} is not available"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_targets_are_strictly_higher() {
        assert_eq!(
            Tier::Free.upgrade_targets().collect::<Vec<_>>(),
            vec![Tier::Silver, Tier::Gold, Tier::Platinum]
        );
        assert_eq!(Tier::Gold.upgrade_targets().collect::<Vec<_>>(), vec![Tier::Platinum]);
        assert_eq!(Tier::Platinum.upgrade_targets().count(), 0);
    }

    #[test]
    fn check_upgrade_rejects_lateral_and_downward_moves() {
        assert!(check_upgrade(Tier::Silver, Tier::Gold).is_ok());
        assert!(check_upgrade(Tier::Free, Tier::Platinum).is_ok());

        match check_upgrade(Tier::Gold, Tier::Gold) {
            Err(DomainError::InvariantViolation(msg)) => assert!(msg.contains("already")),
            other => panic!("expected invariant violation, got {other:?}"),
        }
        match check_upgrade(Tier::Platinum, Tier::Silver) {
            Err(DomainError::InvariantViolation(msg)) => assert!(msg.contains("downgrade")),
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }
}
