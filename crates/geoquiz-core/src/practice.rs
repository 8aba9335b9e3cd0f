//! Free practice mode.
//!
//! A theme alternates between two question types over a chosen zone. Only
//! running tallies are kept; nothing is persisted.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::map::{MapStates, MapStatus};
use crate::model::{Choice, Domain, Question, QuestionType};
use crate::questions::generate_for_zone;
use crate::session::AnswerFeedback;

/// Practice themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "pays")]
    Countries,
    #[serde(rename = "capitales")]
    Capitals,
    #[serde(rename = "drapeaux")]
    Flags,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Countries, Theme::Capitals, Theme::Flags];

    /// The two question types a theme alternates between, first one first.
    pub fn pair(self) -> (QuestionType, QuestionType) {
        match self {
            Theme::Countries => (QuestionType::MapClick, QuestionType::CountryToCapital),
            Theme::Capitals => (QuestionType::CapitalToCountry, QuestionType::CountryToCapital),
            Theme::Flags => (QuestionType::FlagToCountry, QuestionType::CountryToFlag),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Countries => "Pays",
            Theme::Capitals => "Capitales",
            Theme::Flags => "Drapeaux",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pays" | "countries" => Ok(Theme::Countries),
            "capitales" | "capitals" => Ok(Theme::Capitals),
            "drapeaux" | "flags" => Ok(Theme::Flags),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Next question type for a theme: the first of the pair to open, then
/// strict alternation.
pub fn pick_type(theme: Theme, previous: Option<QuestionType>) -> QuestionType {
    let (first, second) = theme.pair();
    match previous {
        Some(prev) if prev == first => second,
        _ => first,
    }
}

/// An open-ended practice run.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    theme: Theme,
    zone: Domain,
    current: Option<Question>,
    last_kind: Option<QuestionType>,
    asked: u32,
    correct: u32,
    map: MapStates,
}

impl PracticeSession {
    pub fn new(theme: Theme, zone: Domain) -> Self {
        Self {
            theme,
            zone,
            current: None,
            last_kind: None,
            asked: 0,
            correct: 0,
            map: MapStates::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn zone(&self) -> Domain {
        self.zone
    }

    /// Draw the next question, replacing any unanswered one.
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Question, GameError> {
        let kind = pick_type(self.theme, self.last_kind);
        let question = generate_for_zone(kind, self.zone, false, rng)?;
        self.map.mark(&question.correct_iso, MapStatus::InProgress);
        self.last_kind = Some(kind);
        Ok(self.current.insert(question))
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Judge the pending question and clear it.
    pub fn answer(&mut self, choice: Option<Choice>) -> Result<AnswerFeedback, GameError> {
        let question = self.current.take().ok_or(GameError::NoActiveQuestion)?;
        let feedback = AnswerFeedback::judge(&question, choice.as_ref());
        self.asked += 1;
        if feedback.correct {
            self.correct += 1;
        }
        let status = if feedback.correct {
            MapStatus::Correct
        } else {
            MapStatus::Wrong
        };
        self.map.mark(&question.correct_iso, status);
        Ok(feedback)
    }

    pub fn asked(&self) -> u32 {
        self.asked
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Share of correct answers, 0.0 before the first answer.
    pub fn accuracy(&self) -> f64 {
        if self.asked == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.asked)
        }
    }

    pub fn map_states(&self) -> &MapStates {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog;

    #[test]
    fn themes_alternate_between_their_pair() {
        for theme in Theme::ALL {
            let (a, b) = theme.pair();
            assert_eq!(pick_type(theme, None), a);
            assert_eq!(pick_type(theme, Some(a)), b);
            assert_eq!(pick_type(theme, Some(b)), a);
            assert_eq!(pick_type(theme, Some(QuestionType::TrueFalse)), a);
        }
    }

    #[test]
    fn theme_parses_french_and_english() {
        assert_eq!("Drapeaux".parse::<Theme>().unwrap(), Theme::Flags);
        assert_eq!("capitals".parse::<Theme>().unwrap(), Theme::Capitals);
        assert!("monnaies".parse::<Theme>().is_err());
        assert_eq!(Theme::Countries.to_string(), "Pays");
    }

    #[test]
    fn practice_run_alternates_and_tallies() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = PracticeSession::new(Theme::Capitals, Domain::Oceania);
        let pool = catalog::pool(Domain::Oceania);

        let mut kinds = Vec::new();
        for round in 0..6 {
            let question = session.next_question(&mut rng).unwrap().clone();
            assert!(pool.iter().any(|c| c.iso == question.correct_iso));
            assert_eq!(
                session.map_states().status(&question.correct_iso),
                MapStatus::InProgress
            );
            kinds.push(question.kind);

            let choice = if round % 2 == 0 {
                Choice::Country(question.correct_iso.clone())
            } else {
                Choice::Truth(true)
            };
            let feedback = session.answer(Some(choice)).unwrap();
            assert_eq!(feedback.correct, round % 2 == 0);
            assert!(!feedback.explanation.is_empty());
        }

        for pair in kinds.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(session.asked(), 6);
        assert_eq!(session.correct(), 3);
        assert!((session.accuracy() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn answering_without_a_question_fails() {
        let mut session = PracticeSession::new(Theme::Flags, Domain::World);
        assert_eq!(session.accuracy(), 0.0);
        assert!(matches!(
            session.answer(Some(Choice::Truth(true))),
            Err(GameError::NoActiveQuestion)
        ));

        let mut rng = StdRng::seed_from_u64(5);
        session.next_question(&mut rng).unwrap();
        session.answer(None).unwrap();
        assert!(session.current_question().is_none());
        assert!(session.answer(None).is_err());
    }

    #[test]
    fn map_theme_accepts_region_clicks() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = PracticeSession::new(Theme::Countries, Domain::Europe);
        let question = session.next_question(&mut rng).unwrap().clone();
        assert_eq!(question.kind, QuestionType::MapClick);

        let region = question.correct_iso.to_lowercase();
        let feedback = session.answer(Some(Choice::Region(region))).unwrap();
        assert!(feedback.correct);
        assert_eq!(
            session.map_states().status(&question.correct_iso),
            MapStatus::Correct
        );
    }
}
