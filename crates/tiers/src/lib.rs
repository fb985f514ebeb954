//! `eventtier-tiers`: membership tier policy.
//!
//! Pure and synchronous: a total order over four tiers, the access predicate,
//! and the accessible-tier set used to partition event listings. No IO.

pub mod catalog;
pub mod policy;
pub mod tier;
pub mod upgrade;

pub use catalog::{OfferStatus, TierOffer, offers_for};
pub use policy::{TierSet, accessible_tiers, can_access};
pub use tier::{Tier, TierParseError};
pub use upgrade::check_upgrade;
