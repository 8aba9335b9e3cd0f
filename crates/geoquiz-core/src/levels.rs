//! Level definitions and the level question sequencer.
//!
//! Five base levels of increasing difficulty are instantiated once per
//! domain. A level attempt is always [`QUESTIONS_PER_LEVEL`] questions.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::instrument;

use crate::catalog;
use crate::error::GameError;
use crate::model::{Domain, Question, QuestionType};
use crate::questions::generate_question;

/// Questions in one level attempt.
pub const QUESTIONS_PER_LEVEL: usize = 10;

/// Levels per domain.
pub const LEVELS_PER_DOMAIN: u8 = 5;

/// A domain-agnostic level template.
#[derive(Debug, Clone, Copy)]
pub struct BaseLevel {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub timer_secs: Option<u32>,
    pub traps: bool,
    pub uses_map: bool,
    pub allowed_types: &'static [QuestionType],
}

/// A base level instantiated for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelConfig {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub domain: Domain,
    /// Countdown per question, in seconds.
    pub timer_secs: Option<u32>,
    /// Wider distractor policy.
    pub traps: bool,
    pub uses_map: bool,
    pub allowed_types: &'static [QuestionType],
}

use QuestionType::*;

/// Base levels, in ascending difficulty.
pub static BASE_LEVELS: [BaseLevel; LEVELS_PER_DOMAIN as usize] = [
    BaseLevel {
        id: 1,
        title: "Découverte",
        description: "Capitale ↔ pays simples.",
        timer_secs: None,
        traps: false,
        uses_map: false,
        allowed_types: &[CapitalToCountry, CountryToCapital],
    },
    BaseLevel {
        id: 2,
        title: "Continents",
        description: "Capitale/pays + drapeaux, quelques pièges.",
        timer_secs: None,
        traps: true,
        uses_map: false,
        allowed_types: &[CapitalToCountry, CountryToCapital, FlagToCountry],
    },
    BaseLevel {
        id: 3,
        title: "Carto Express",
        description: "Carte + chrono 15s, mix.",
        timer_secs: Some(15),
        traps: false,
        uses_map: true,
        allowed_types: &[CapitalToCountry, CountryToCapital, MapClick, PopulationToCountry],
    },
    BaseLevel {
        id: 4,
        title: "Drapeaux & Monnaies",
        description: "Drapeaux, monnaies, vrai/faux.",
        timer_secs: None,
        traps: true,
        uses_map: false,
        allowed_types: &[FlagToCountry, CountryToFlag, CountryToCurrency, TrueFalse],
    },
    BaseLevel {
        id: 5,
        title: "Expert domaine",
        description: "Mix total + chrono 12s.",
        timer_secs: Some(12),
        traps: true,
        uses_map: true,
        allowed_types: &QuestionType::ALL,
    },
];

impl BaseLevel {
    fn instantiate(&self, domain: Domain) -> LevelConfig {
        LevelConfig {
            id: self.id,
            title: self.title,
            description: self.description,
            domain,
            timer_secs: self.timer_secs,
            traps: self.traps,
            uses_map: self.uses_map,
            allowed_types: self.allowed_types,
        }
    }
}

/// Look up the configuration of one level.
pub fn level_config(domain: Domain, level: u8) -> Option<LevelConfig> {
    BASE_LEVELS
        .iter()
        .find(|b| b.id == level)
        .map(|b| b.instantiate(domain))
}

/// The levels of one domain, ascending.
pub fn levels_for(domain: Domain) -> Vec<LevelConfig> {
    BASE_LEVELS.iter().map(|b| b.instantiate(domain)).collect()
}

/// Every level of every domain, grouped by domain in display order.
pub fn all_levels() -> Vec<LevelConfig> {
    Domain::ALL.into_iter().flat_map(levels_for).collect()
}

/// Build the type sequence of a level attempt.
///
/// Two independently shuffled copies of the canonical order are filtered to
/// the allowed set; a candidate equal to the previous type is replaced by the
/// first allowed type that differs. With a single allowed type the repeat
/// stays.
pub fn sequence_types<R: Rng + ?Sized>(allowed: &[QuestionType], rng: &mut R) -> Vec<QuestionType> {
    if allowed.is_empty() {
        return Vec::new();
    }

    let mut first = QuestionType::ALL;
    let mut second = QuestionType::ALL;
    first.shuffle(rng);
    second.shuffle(rng);
    let pool: Vec<QuestionType> = first
        .into_iter()
        .chain(second)
        .filter(|t| allowed.contains(t))
        .collect();

    let mut sequence: Vec<QuestionType> = Vec::with_capacity(QUESTIONS_PER_LEVEL);
    for idx in 0..QUESTIONS_PER_LEVEL {
        let candidate = pool
            .get(idx % pool.len().max(1))
            .copied()
            .unwrap_or(allowed[idx % allowed.len()]);
        let next = match sequence.last() {
            Some(&last) if last == candidate => allowed
                .iter()
                .copied()
                .find(|t| *t != last)
                .unwrap_or(candidate),
            _ => candidate,
        };
        sequence.push(next);
    }
    sequence
}

/// Generate the ten questions of a level attempt.
///
/// Every call produces an independent sequence; targets are drawn afresh for
/// each position from the domain's pool.
#[instrument(level = "debug", skip(rng))]
pub fn generate_level_questions<R: Rng + ?Sized>(
    level: u8,
    domain: Domain,
    rng: &mut R,
) -> Result<Vec<Question>, GameError> {
    let config = level_config(domain, level).ok_or(GameError::UnknownLevel { domain, level })?;
    if config.allowed_types.is_empty() {
        return Err(GameError::NoQuestionTypes(level));
    }

    let pool = catalog::pool(domain);
    sequence_types(config.allowed_types, rng)
        .into_iter()
        .map(|kind| generate_question(kind, &pool, config.traps, rng))
        .collect()
}
