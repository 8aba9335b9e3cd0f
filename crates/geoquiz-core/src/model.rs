//! Core data model types for geoquiz.
//!
//! Zones and progression domains, question types, generated questions and
//! the answers a player can give.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog;
use crate::map::normalize_region_id;

/// Continent tag carried by every catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Continent {
    Europe,
    #[serde(rename = "Afrique")]
    Africa,
    #[serde(rename = "Asie")]
    Asia,
    #[serde(rename = "Amériques")]
    Americas,
    #[serde(rename = "Océanie")]
    Oceania,
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continent::Europe => write!(f, "Europe"),
            Continent::Africa => write!(f, "Afrique"),
            Continent::Asia => write!(f, "Asie"),
            Continent::Americas => write!(f, "Amériques"),
            Continent::Oceania => write!(f, "Océanie"),
        }
    }
}

/// A progression domain, also used as the geographic zone questions are
/// drawn from. Serialized with its French display name, which is what the
/// remote progress table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "Monde")]
    World,
    Europe,
    #[serde(rename = "Afrique")]
    Africa,
    #[serde(rename = "Asie")]
    Asia,
    #[serde(rename = "Amériques")]
    Americas,
    #[serde(rename = "Océanie")]
    Oceania,
}

impl Domain {
    /// All domains in display order.
    pub const ALL: [Domain; 6] = [
        Domain::World,
        Domain::Europe,
        Domain::Africa,
        Domain::Asia,
        Domain::Americas,
        Domain::Oceania,
    ];

    /// The continent this domain filters on, `None` for the whole world.
    pub fn continent(self) -> Option<Continent> {
        match self {
            Domain::World => None,
            Domain::Europe => Some(Continent::Europe),
            Domain::Africa => Some(Continent::Africa),
            Domain::Asia => Some(Continent::Asia),
            Domain::Americas => Some(Continent::Americas),
            Domain::Oceania => Some(Continent::Oceania),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.continent() {
            None => write!(f, "Monde"),
            Some(continent) => write!(f, "{continent}"),
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monde" | "world" => Ok(Domain::World),
            "europe" => Ok(Domain::Europe),
            "afrique" | "africa" => Ok(Domain::Africa),
            "asie" | "asia" => Ok(Domain::Asia),
            "amériques" | "ameriques" | "americas" => Ok(Domain::Americas),
            "océanie" | "oceanie" | "oceania" => Ok(Domain::Oceania),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}

/// The eight question variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    CapitalToCountry,
    CountryToCapital,
    FlagToCountry,
    CountryToFlag,
    MapClick,
    TrueFalse,
    PopulationToCountry,
    CountryToCurrency,
}

impl QuestionType {
    /// Canonical order, the base of every level sequence.
    pub const ALL: [QuestionType; 8] = [
        QuestionType::CapitalToCountry,
        QuestionType::CountryToCapital,
        QuestionType::FlagToCountry,
        QuestionType::CountryToFlag,
        QuestionType::MapClick,
        QuestionType::TrueFalse,
        QuestionType::PopulationToCountry,
        QuestionType::CountryToCurrency,
    ];

    /// Whether the question is answered by picking one of four options.
    pub fn is_multiple_choice(self) -> bool {
        !matches!(self, QuestionType::MapClick | QuestionType::TrueFalse)
    }

    /// Short label shown above the prompt.
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::CapitalToCountry => "QCM capitale → pays",
            QuestionType::CountryToCapital => "QCM pays → capitale",
            QuestionType::FlagToCountry => "Drapeau → pays",
            QuestionType::CountryToFlag => "Pays → drapeau",
            QuestionType::MapClick => "Carte : clique le pays ciblé",
            QuestionType::TrueFalse => "Vrai ou Faux",
            QuestionType::PopulationToCountry => "Population → pays",
            QuestionType::CountryToCurrency => "Pays → monnaie",
        }
    }
}

/// A fully-formed question, owned by the session that asks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionType,
    pub prompt: String,
    /// ISO code of the target country.
    pub correct_iso: String,
    /// ISO codes, one of which is `correct_iso`. Empty for map and true/false.
    #[serde(default)]
    pub options: Vec<String>,
    /// Statement to judge, true/false questions only.
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub is_true_answer: Option<bool>,
    /// Labels aligned with `options` when they differ from the country
    /// (currency names).
    #[serde(default)]
    pub display_values: Vec<String>,
    pub explanation: String,
    pub target_name: String,
    pub target_capital: String,
    pub target_flag: String,
}

/// What a player can submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// An option, by ISO code.
    Country(String),
    /// A region clicked on the map.
    Region(String),
    /// Verdict on a true/false statement.
    Truth(bool),
}

impl Question {
    /// Judge a submission. `None` is a missing answer (expired countdown)
    /// and is never correct.
    pub fn is_correct(&self, choice: Option<&Choice>) -> bool {
        match (self.kind, choice) {
            (_, None) => false,
            (QuestionType::TrueFalse, Some(Choice::Truth(verdict))) => {
                self.is_true_answer == Some(*verdict)
            }
            (QuestionType::TrueFalse, Some(_)) => false,
            (QuestionType::MapClick, Some(Choice::Region(region) | Choice::Country(region))) => {
                normalize_region_id(region).as_deref() == Some(self.correct_iso.as_str())
            }
            (_, Some(Choice::Country(iso))) => iso.eq_ignore_ascii_case(&self.correct_iso),
            (_, Some(_)) => false,
        }
    }

    /// How an option should be displayed for this question's type.
    pub fn option_label(&self, iso: &str) -> String {
        if let Some(idx) = self.options.iter().position(|o| o == iso) {
            if let Some(value) = self.display_values.get(idx) {
                return value.clone();
            }
        }
        let Some(country) = catalog::find(iso) else {
            return iso.to_string();
        };
        match self.kind {
            QuestionType::CountryToCapital => country.capital.to_string(),
            QuestionType::CountryToFlag => country.flag.to_string(),
            QuestionType::CountryToCurrency => country.currency.to_string(),
            _ => country.name.to_string(),
        }
    }

    /// Display labels for every option, in order.
    pub fn option_labels(&self) -> Vec<String> {
        self.options.iter().map(|o| self.option_label(o)).collect()
    }
}
