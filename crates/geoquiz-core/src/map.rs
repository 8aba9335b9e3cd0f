//! Per-region status board shared with the map renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display state of one region on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapStatus {
    #[default]
    #[serde(rename = "non-vu")]
    Unseen,
    #[serde(rename = "en-cours")]
    InProgress,
    #[serde(rename = "reussi")]
    Correct,
    #[serde(rename = "erreur")]
    Wrong,
}

/// Normalize a region identifier coming from the renderer to an upper-case
/// alpha-2 code. Returns `None` for anything that is not two ASCII letters.
pub fn normalize_region_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}

/// Status of every region touched so far. Regions never marked are
/// [`MapStatus::Unseen`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapStates {
    states: BTreeMap<String, MapStatus>,
}

impl MapStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status. Identifiers that do not normalize are ignored.
    pub fn mark(&mut self, region: &str, status: MapStatus) {
        match normalize_region_id(region) {
            Some(id) => {
                self.states.insert(id, status);
            }
            None => tracing::debug!("ignoring status for unknown region id {region:?}"),
        }
    }

    pub fn status(&self, region: &str) -> MapStatus {
        normalize_region_id(region)
            .and_then(|id| self.states.get(&id).copied())
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.states.clear();
    }

    /// Regions with a recorded status, sorted by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MapStatus)> {
        self.states.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of regions in the given status.
    pub fn count(&self, status: MapStatus) -> usize {
        self.states.values().filter(|s| **s == status).count()
    }
}
