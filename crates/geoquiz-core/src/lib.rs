//! geoquiz-core: Question generation, level progression and ranks.
//!
//! This crate holds the country catalog, the question generator and level
//! sequencer, the progress tracker and rank calculator, and the traits
//! through which the engine talks to its identity and storage backend.

pub mod account;
pub mod catalog;
pub mod error;
pub mod game;
pub mod levels;
pub mod map;
pub mod mirror;
pub mod model;
pub mod practice;
pub mod progress;
pub mod questions;
pub mod rank;
pub mod session;
pub mod traits;
