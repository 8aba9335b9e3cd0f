//! Engine and account error types.
//!
//! Account errors carry the message shown to the player as their display
//! text, so callers can surface them without translation.

use thiserror::Error;

use crate::model::Domain;

/// Errors raised by the question and progression engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// The pool has no entry to draw a target from.
    #[error("no countries available to draw a question from")]
    EmptyPool,

    /// No level with this id exists in the domain.
    #[error("unknown level {level} in domain {domain}")]
    UnknownLevel { domain: Domain, level: u8 },

    /// The level exists but has not been unlocked yet.
    #[error("level {level} of {domain} is locked")]
    LevelLocked { domain: Domain, level: u8 },

    /// A level score outside 0..=10.
    #[error("score {0} is out of range (0-10)")]
    ScoreOutOfRange(u8),

    /// A level configuration without any allowed question type.
    #[error("level {0} allows no question type")]
    NoQuestionTypes(u8),

    /// An answer was submitted after the last question.
    #[error("the session has already ended")]
    SessionEnded,

    /// A session was handed in before its last answer.
    #[error("the session is still in progress")]
    SessionInProgress,

    /// An answer was submitted with no question pending.
    #[error("no question is waiting for an answer")]
    NoActiveQuestion,
}

/// Account validation and identity failures.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Pseudo invalide (3-15 caractères alphanumériques, sans spéciaux).")]
    InvalidHandle,

    #[error("Pseudo déjà utilisé, choisis-en un autre.")]
    HandleTaken,

    #[error("Mot de passe trop court ({min} caractères minimum).")]
    WeakPassword { min: usize },

    #[error("Saisis ton pseudo ou Email.")]
    MissingIdentifier,

    #[error("Pseudo introuvable. Vérifie l'orthographe ou inscris-toi.")]
    UnknownHandle,

    #[error("Impossible de vérifier ce pseudo. Réessaie.")]
    HandleLookupFailed,

    #[error("Pas d'utilisateur connecté")]
    NotSignedIn,

    /// The identity backend rejected the request; the message comes from it.
    #[error("{0}")]
    Rejected(String),
}
