//! Player rank derived from the total score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::progress::LevelProgress;

/// The five rank tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "Explorateur")]
    Explorer,
    #[serde(rename = "Voyageur")]
    Traveler,
    #[serde(rename = "Géographe")]
    Geographer,
    #[serde(rename = "Cartographe")]
    Cartographer,
    #[serde(rename = "Expert mondial")]
    WorldExpert,
}

impl Rank {
    /// Every tier in ascending order.
    pub const ALL: [Rank; 5] = [
        Rank::Explorer,
        Rank::Traveler,
        Rank::Geographer,
        Rank::Cartographer,
        Rank::WorldExpert,
    ];

    /// Minimum total score for this tier.
    pub fn threshold(self) -> u32 {
        match self {
            Rank::Explorer => 0,
            Rank::Traveler => 80,
            Rank::Geographer => 130,
            Rank::Cartographer => 180,
            Rank::WorldExpert => 230,
        }
    }

    pub fn from_total(total: u32) -> Rank {
        Rank::ALL
            .into_iter()
            .rev()
            .find(|r| total >= r.threshold())
            .unwrap_or(Rank::Explorer)
    }

    /// The tier above this one, if any.
    pub fn next(self) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| *r > self)
    }

    /// Points missing from `total` to reach the next tier.
    pub fn points_to_next(total: u32) -> Option<u32> {
        Rank::from_total(total)
            .next()
            .map(|next| next.threshold() - total)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::Explorer => "Explorateur",
            Rank::Traveler => "Voyageur",
            Rank::Geographer => "Géographe",
            Rank::Cartographer => "Cartographe",
            Rank::WorldExpert => "Expert mondial",
        };
        f.write_str(name)
    }
}

/// Rank for a progress snapshot: the sum of best scores mapped through the
/// tier thresholds. An empty snapshot is the lowest tier.
pub fn compute_rank(progress: &[LevelProgress]) -> Rank {
    let total: u32 = progress.iter().map(|p| u32::from(p.best_score)).sum();
    Rank::from_total(total)
}
