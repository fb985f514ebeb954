//! Display catalog for the membership tiers (prices, perks, and where each
//! tier sits relative to the viewer).

use serde::Serialize;

use crate::Tier;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    Current,
    Upgrade,
    DowngradeUnavailable,
}

impl OfferStatus {
    pub fn between(current: Tier, offered: Tier) -> Self {
        if offered == current {
            OfferStatus::Current
        } else if current.is_upgrade_to(offered) {
            OfferStatus::Upgrade
        } else {
            OfferStatus::DowngradeUnavailable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierOffer {
    pub tier: Tier,
    pub rank: u8,
    pub label: &'static str,
    pub price: &'static str,
    pub headline: &'static str,
    pub features: &'static [&'static str],
    pub status: OfferStatus,
}

impl Tier {
    pub fn price(self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Silver => "$29/month",
            Tier::Gold => "$99/month",
            Tier::Platinum => "$299/month",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Tier::Free => "Community Events",
            Tier::Silver => "Advanced Workshops",
            Tier::Gold => "Exclusive Bootcamps",
            Tier::Platinum => "Executive Forums",
        }
    }

    pub fn features(self) -> &'static [&'static str] {
        match self {
            Tier::Free => &["Access to community events", "Basic networking opportunities"],
            Tier::Silver => &["All Free features", "Advanced workshops", "Priority support"],
            Tier::Gold => &[
                "All Silver features",
                "Exclusive bootcamps",
                "Industry summits",
                "1-on-1 mentoring",
            ],
            Tier::Platinum => &[
                "All Gold features",
                "Executive forums",
                "Innovation conferences",
                "VIP networking",
            ],
        }
    }
}

/// All four offers, lowest rank first, as seen by a holder of `current`.
pub fn offers_for(current: Tier) -> Vec<TierOffer> {
    Tier::ALL
        .into_iter()
        .map(|tier| TierOffer {
            tier,
            rank: tier.rank(),
            label: tier.label(),
            price: tier.price(),
            headline: tier.headline(),
            features: tier.features(),
            status: OfferStatus::between(current, tier),
        })
        .collect()
}
