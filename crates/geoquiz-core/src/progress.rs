//! Per-level progression state.
//!
//! The tracker owns one [`LevelProgress`] per (domain, level). Each update
//! builds a new collection and swaps it in whole; domain and total scores are
//! recomputed from it on every read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::levels::{all_levels, QUESTIONS_PER_LEVEL};
use crate::model::Domain;
use crate::rank::{compute_rank, Rank};
use crate::traits::ProgressRecord;

/// Score needed to complete a level and unlock the next one.
pub const PASS_SCORE: u8 = 7;

/// Highest possible level score.
pub const MAX_SCORE: u8 = QUESTIONS_PER_LEVEL as u8;

/// Progress on one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub domain: Domain,
    pub level_id: u8,
    pub unlocked: bool,
    pub completed: bool,
    /// Best score ever reached, never decreases.
    pub best_score: u8,
    /// Score of the latest attempt.
    pub last_score: u8,
}

impl LevelProgress {
    fn initial(domain: Domain, level_id: u8) -> Self {
        Self {
            domain,
            level_id,
            unlocked: level_id == 1,
            completed: false,
            best_score: 0,
            last_score: 0,
        }
    }

    fn is(&self, domain: Domain, level_id: u8) -> bool {
        self.domain == domain && self.level_id == level_id
    }
}

/// Unlock, completion and score state for every level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressTracker {
    levels: Vec<LevelProgress>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Fresh progress: only the first level of each domain is unlocked.
    pub fn new() -> Self {
        Self {
            levels: all_levels()
                .into_iter()
                .map(|l| LevelProgress::initial(l.domain, l.id))
                .collect(),
        }
    }

    /// Rebuild progress from remote records.
    ///
    /// Each record sets both best and last score of its level. Unlocks are
    /// then recomputed per domain in ascending level order: a level opens
    /// when the previous one is completed or reached the pass score.
    pub fn from_records(records: &[ProgressRecord]) -> Self {
        let mut levels = Self::new().levels;

        for record in records {
            let Some(entry) = levels
                .iter_mut()
                .find(|l| l.is(record.domain, record.level))
            else {
                tracing::warn!(
                    "ignoring progress record for unknown level {} in {}",
                    record.level,
                    record.domain
                );
                continue;
            };
            let score = if record.score > MAX_SCORE {
                tracing::warn!(
                    "clamping out-of-range score {} for {} level {}",
                    record.score,
                    record.domain,
                    record.level
                );
                MAX_SCORE
            } else {
                record.score
            };
            entry.best_score = score;
            entry.last_score = score;
            entry.completed = entry.completed || score >= PASS_SCORE;
        }

        for domain in Domain::ALL {
            let mut indices: Vec<usize> = levels
                .iter()
                .enumerate()
                .filter(|(_, l)| l.domain == domain)
                .map(|(i, _)| i)
                .collect();
            indices.sort_by_key(|&i| levels[i].level_id);
            for pair in indices.windows(2) {
                let prev = &levels[pair[0]];
                if prev.completed || prev.best_score >= PASS_SCORE {
                    levels[pair[1]].unlocked = true;
                }
            }
        }

        Self { levels }
    }

    /// Every tracked level.
    pub fn levels(&self) -> &[LevelProgress] {
        &self.levels
    }

    /// The levels of one domain, ascending.
    pub fn levels_for(&self, domain: Domain) -> Vec<&LevelProgress> {
        let mut levels: Vec<&LevelProgress> =
            self.levels.iter().filter(|l| l.domain == domain).collect();
        levels.sort_by_key(|l| l.level_id);
        levels
    }

    pub fn get(&self, domain: Domain, level_id: u8) -> Option<&LevelProgress> {
        self.levels.iter().find(|l| l.is(domain, level_id))
    }

    pub fn is_unlocked(&self, domain: Domain, level_id: u8) -> bool {
        self.get(domain, level_id).is_some_and(|l| l.unlocked)
    }

    /// Record the result of a level attempt.
    ///
    /// A score of at least [`PASS_SCORE`] completes the level and unlocks the
    /// next level of the same domain only. Completion is never revoked by a
    /// worse attempt.
    pub fn complete_level(
        &mut self,
        domain: Domain,
        level_id: u8,
        score: u8,
    ) -> Result<&LevelProgress, GameError> {
        if score > MAX_SCORE {
            return Err(GameError::ScoreOutOfRange(score));
        }
        if self.get(domain, level_id).is_none() {
            return Err(GameError::UnknownLevel {
                domain,
                level: level_id,
            });
        }

        let passed = score >= PASS_SCORE;
        let mut updated: Vec<LevelProgress> = self
            .levels
            .iter()
            .map(|l| {
                if !l.is(domain, level_id) {
                    return l.clone();
                }
                LevelProgress {
                    completed: passed || l.completed,
                    last_score: score,
                    best_score: l.best_score.max(score),
                    ..l.clone()
                }
            })
            .collect();

        if passed {
            let next = updated
                .iter()
                .filter(|l| l.domain == domain && l.level_id > level_id)
                .map(|l| l.level_id)
                .min();
            if let Some(next) = next {
                if let Some(entry) = updated.iter_mut().find(|l| l.is(domain, next)) {
                    if !entry.unlocked {
                        tracing::info!("unlocked {domain} level {next}");
                    }
                    entry.unlocked = true;
                }
            }
        }

        self.levels = updated;
        tracing::debug!("{domain} level {level_id} completed with {score}/{MAX_SCORE}");
        self.get(domain, level_id).ok_or(GameError::UnknownLevel {
            domain,
            level: level_id,
        })
    }

    /// Clear the last score and completion of a level. Best score and unlock
    /// state are kept.
    pub fn reset_level(&mut self, domain: Domain, level_id: u8) -> Result<(), GameError> {
        if self.get(domain, level_id).is_none() {
            return Err(GameError::UnknownLevel {
                domain,
                level: level_id,
            });
        }
        self.levels = self
            .levels
            .iter()
            .map(|l| {
                if l.is(domain, level_id) {
                    LevelProgress {
                        last_score: 0,
                        completed: false,
                        ..l.clone()
                    }
                } else {
                    l.clone()
                }
            })
            .collect();
        Ok(())
    }

    /// Sum of best scores per domain. Every domain is present.
    pub fn domain_scores(&self) -> BTreeMap<Domain, u32> {
        let mut scores: BTreeMap<Domain, u32> = Domain::ALL.into_iter().map(|d| (d, 0)).collect();
        for level in &self.levels {
            *scores.entry(level.domain).or_default() += u32::from(level.best_score);
        }
        scores
    }

    pub fn domain_score(&self, domain: Domain) -> u32 {
        self.levels
            .iter()
            .filter(|l| l.domain == domain)
            .map(|l| u32::from(l.best_score))
            .sum()
    }

    pub fn total_score(&self) -> u32 {
        self.domain_scores().values().sum()
    }

    /// Highest reachable total score.
    pub fn max_total_score(&self) -> u32 {
        self.levels.len() as u32 * u32::from(MAX_SCORE)
    }

    pub fn rank(&self) -> Rank {
        compute_rank(&self.levels)
    }
}
