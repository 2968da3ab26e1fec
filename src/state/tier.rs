//! The fixed tier ladder players are ranked on.

use std::fmt;

/// Tier labels in rank order; `Ht1` is the best, `Lt5` the worst.
///
/// The `HT`/`LT` prefix distinguishes the high and low sub-tier for display
/// only; ordering is fully determined by declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// High tier 1, the best possible rank.
    Ht1,
    /// Low tier 1.
    Lt1,
    /// High tier 2.
    Ht2,
    /// Low tier 2.
    Lt2,
    /// High tier 3.
    Ht3,
    /// Low tier 3.
    Lt3,
    /// High tier 4.
    Ht4,
    /// Low tier 4.
    Lt4,
    /// High tier 5.
    Ht5,
    /// Low tier 5, the worst possible rank.
    Lt5,
}

impl Tier {
    /// Every tier, best first.
    pub const ORDERED: [Tier; 10] = [
        Tier::Ht1,
        Tier::Lt1,
        Tier::Ht2,
        Tier::Lt2,
        Tier::Ht3,
        Tier::Lt3,
        Tier::Ht4,
        Tier::Lt4,
        Tier::Ht5,
        Tier::Lt5,
    ];

    /// Parse the canonical uppercase label (`"HT1"` .. `"LT5"`).
    ///
    /// Labels are matched exactly; anything else yields `None` so stored rows
    /// with unknown tiers degrade gracefully instead of failing a reload.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "HT1" => Some(Tier::Ht1),
            "LT1" => Some(Tier::Lt1),
            "HT2" => Some(Tier::Ht2),
            "LT2" => Some(Tier::Lt2),
            "HT3" => Some(Tier::Ht3),
            "LT3" => Some(Tier::Lt3),
            "HT4" => Some(Tier::Ht4),
            "LT4" => Some(Tier::Lt4),
            "HT5" => Some(Tier::Ht5),
            "LT5" => Some(Tier::Lt5),
            _ => None,
        }
    }

    /// Canonical display label.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Ht1 => "HT1",
            Tier::Lt1 => "LT1",
            Tier::Ht2 => "HT2",
            Tier::Lt2 => "LT2",
            Tier::Ht3 => "HT3",
            Tier::Lt3 => "LT3",
            Tier::Ht4 => "HT4",
            Tier::Lt4 => "LT4",
            Tier::Ht5 => "HT5",
            Tier::Lt5 => "LT5",
        }
    }

    /// Position on the ladder, `0` for the best tier.
    pub fn rank_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_order_matches_declaration() {
        assert!(Tier::Ht1 < Tier::Lt1);
        assert!(Tier::Lt1 < Tier::Ht2);
        assert!(Tier::Ht5 < Tier::Lt5);
        assert_eq!(Tier::Ht1.rank_index(), 0);
        assert_eq!(Tier::Lt5.rank_index(), 9);
    }

    #[test]
    fn labels_round_trip() {
        for tier in Tier::ORDERED {
            assert_eq!(Tier::from_label(tier.label()), Some(tier));
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert_eq!(Tier::from_label("ht1"), None);
        assert_eq!(Tier::from_label("HT6"), None);
        assert_eq!(Tier::from_label(""), None);
    }
}
