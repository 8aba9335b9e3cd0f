//! A single level attempt.
//!
//! The session walks the ten generated questions, judges answers, keeps the
//! score and the map board up to date, and runs the per-question countdown
//! when the level has one.

use rand::Rng;
use serde::Serialize;

use crate::error::GameError;
use crate::levels::{generate_level_questions, level_config, LevelConfig};
use crate::map::{MapStates, MapStatus};
use crate::model::{Choice, Domain, Question, QuestionType};

/// Result of one submitted (or expired) answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    /// `false` when the countdown expired before an answer came in.
    pub answered: bool,
    pub correct_iso: String,
    pub correct_name: String,
    /// Fact about the target, shown whatever the outcome.
    pub explanation: String,
    /// Final score, set on the answer that ends the session.
    pub final_score: Option<u8>,
}

impl AnswerFeedback {
    pub(crate) fn judge(question: &Question, choice: Option<&Choice>) -> Self {
        Self {
            correct: question.is_correct(choice),
            answered: choice.is_some(),
            correct_iso: question.correct_iso.clone(),
            correct_name: question.target_name.clone(),
            explanation: question.explanation.clone(),
            final_score: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Running,
    Ended,
}

/// One attempt at a level.
#[derive(Debug, Clone)]
pub struct LevelSession {
    config: LevelConfig,
    questions: Vec<Question>,
    current: usize,
    score: u8,
    state: SessionState,
    remaining_secs: Option<u32>,
    map: MapStates,
}

impl LevelSession {
    /// Generate the questions of a level and start on the first one.
    pub fn start<R: Rng + ?Sized>(domain: Domain, level: u8, rng: &mut R) -> Result<Self, GameError> {
        let config = level_config(domain, level).ok_or(GameError::UnknownLevel { domain, level })?;
        let questions = generate_level_questions(level, domain, rng)?;
        Ok(Self::with_questions(config, questions))
    }

    /// Start a session over an already generated question list.
    pub fn with_questions(config: LevelConfig, questions: Vec<Question>) -> Self {
        let mut session = Self {
            config,
            questions,
            current: 0,
            score: 0,
            state: SessionState::Running,
            remaining_secs: config.timer_secs,
            map: MapStates::new(),
        };
        if session.questions.is_empty() {
            session.state = SessionState::Ended;
            session.remaining_secs = None;
        }
        session.highlight_current();
        session
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question waiting for an answer, `None` once the session ended.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Running => self.questions.get(self.current),
            SessionState::Ended => None,
        }
    }

    /// Zero-based index of the current question; equals the question count
    /// once ended.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Ended
    }

    /// Seconds left on the countdown, `None` for untimed levels.
    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    pub fn map_states(&self) -> &MapStates {
        &self.map
    }

    /// Submit an answer to the current question. `None` counts as a wrong
    /// answer.
    pub fn answer(&mut self, choice: Option<Choice>) -> Result<AnswerFeedback, GameError> {
        let question = self.current_question().ok_or(GameError::SessionEnded)?;
        let mut feedback = AnswerFeedback::judge(question, choice.as_ref());

        let status = if feedback.correct {
            self.score += 1;
            MapStatus::Correct
        } else {
            MapStatus::Wrong
        };
        self.map.mark(&feedback.correct_iso, status);

        self.current += 1;
        if self.current >= self.questions.len() {
            self.state = SessionState::Ended;
            self.remaining_secs = None;
            feedback.final_score = Some(self.score);
            tracing::debug!(
                "{} level {} finished with {}/{}",
                self.config.domain,
                self.config.id,
                self.score,
                self.questions.len()
            );
        } else {
            self.remaining_secs = self.config.timer_secs;
            self.highlight_current();
        }
        Ok(feedback)
    }

    /// Advance the countdown by one second. When it runs out the current
    /// question is answered with nothing and the feedback is returned.
    pub fn tick(&mut self) -> Option<AnswerFeedback> {
        if self.is_finished() {
            return None;
        }
        let remaining = self.remaining_secs?;
        let left = remaining.saturating_sub(1);
        if left == 0 {
            self.expire().ok()
        } else {
            self.remaining_secs = Some(left);
            None
        }
    }

    /// Force a missing answer on the current question.
    pub fn expire(&mut self) -> Result<AnswerFeedback, GameError> {
        self.answer(None)
    }

    fn highlight_current(&mut self) {
        if let Some(question) = self.current_question() {
            if question.kind == QuestionType::MapClick {
                let iso = question.correct_iso.clone();
                self.map.mark(&iso, MapStatus::InProgress);
            }
        }
    }
}
