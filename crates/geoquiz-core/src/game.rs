//! Player-level state: progress, the map board and optional remote mirror.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::error::GameError;
use crate::map::MapStates;
use crate::mirror::ProgressMirror;
use crate::model::Domain;
use crate::progress::{LevelProgress, ProgressTracker};
use crate::rank::Rank;
use crate::session::LevelSession;
use crate::traits::ProgressRecord;

/// Everything one player carries between level attempts.
pub struct Game {
    progress: ProgressTracker,
    map: MapStates,
    user: Option<Uuid>,
    mirror: Option<ProgressMirror>,
}

impl Default for Game {
    fn default() -> Self {
        Self::offline()
    }
}

impl Game {
    /// A game with fresh progress and no remote copy.
    pub fn offline() -> Self {
        Self {
            progress: ProgressTracker::new(),
            map: MapStates::new(),
            user: None,
            mirror: None,
        }
    }

    /// Load a user's progress through the mirror and keep replicating to it.
    pub async fn connect(user_id: Uuid, mirror: ProgressMirror) -> Self {
        let progress = mirror.load(user_id).await;
        Self {
            progress,
            map: MapStates::new(),
            user: Some(user_id),
            mirror: Some(mirror),
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn map_states(&self) -> &MapStates {
        &self.map
    }

    pub fn user(&self) -> Option<Uuid> {
        self.user
    }

    pub fn is_online(&self) -> bool {
        self.mirror.is_some()
    }

    pub fn rank(&self) -> Rank {
        self.progress.rank()
    }

    /// Start an attempt at an unlocked level. The shared map board is
    /// cleared for the new attempt.
    pub fn start_level<R: Rng + ?Sized>(
        &mut self,
        domain: Domain,
        level: u8,
        rng: &mut R,
    ) -> Result<LevelSession, GameError> {
        let entry = self
            .progress
            .get(domain, level)
            .ok_or(GameError::UnknownLevel { domain, level })?;
        if !entry.unlocked {
            return Err(GameError::LevelLocked { domain, level });
        }
        self.map.reset();
        LevelSession::start(domain, level, rng)
    }

    /// Apply the outcome of a finished session. The session is consumed so
    /// one attempt is recorded at most once.
    pub fn finish_level(&mut self, session: LevelSession) -> Result<&LevelProgress, GameError> {
        if !session.is_finished() {
            return Err(GameError::SessionInProgress);
        }
        for (region, status) in session.map_states().iter() {
            self.map.mark(region, status);
        }
        let config = session.config();
        self.complete_level(config.domain, config.id, session.score())
    }

    /// Record a level score locally, then mirror it remotely when connected.
    pub fn complete_level(
        &mut self,
        domain: Domain,
        level: u8,
        score: u8,
    ) -> Result<&LevelProgress, GameError> {
        self.progress.complete_level(domain, level, score)?;

        if let (Some(user_id), Some(mirror)) = (self.user, &self.mirror) {
            mirror.record(ProgressRecord {
                user_id,
                domain,
                level,
                score,
                updated_at: Utc::now(),
            });
        }

        self.progress
            .get(domain, level)
            .ok_or(GameError::UnknownLevel { domain, level })
    }

    pub fn reset_level(&mut self, domain: Domain, level: u8) -> Result<(), GameError> {
        self.progress.reset_level(domain, level)
    }

    /// Wait for outstanding remote writes.
    pub async fn flush(&self) {
        if let Some(mirror) = &self.mirror {
            mirror.flush().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::traits::ProgressStore;

    #[derive(Default)]
    struct RecordingStore {
        saved: Mutex<Vec<ProgressRecord>>,
    }

    #[async_trait]
    impl ProgressStore for RecordingStore {
        fn name(&self) -> &str {
            "recording"
        }

        async fn load_progress(&self, _user_id: Uuid) -> anyhow::Result<Vec<ProgressRecord>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save_progress(&self, record: &ProgressRecord) -> anyhow::Result<()> {
            self.saved.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[test]
    fn locked_levels_cannot_start() {
        let mut game = Game::offline();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            game.start_level(Domain::Europe, 2, &mut rng),
            Err(GameError::LevelLocked { .. })
        ));
        assert!(matches!(
            game.start_level(Domain::Europe, 9, &mut rng),
            Err(GameError::UnknownLevel { .. })
        ));
        assert!(game.start_level(Domain::Europe, 1, &mut rng).is_ok());
    }

    #[test]
    fn finishing_a_session_updates_progress() {
        let mut game = Game::offline();
        let mut rng = StdRng::seed_from_u64(11);
        let unfinished = game.start_level(Domain::Asia, 1, &mut rng).unwrap();
        assert!(matches!(
            game.finish_level(unfinished),
            Err(GameError::SessionInProgress)
        ));
        assert_eq!(game.progress().total_score(), 0);

        let mut session = game.start_level(Domain::Asia, 1, &mut rng).unwrap();

        while let Some(q) = session.current_question() {
            let iso = q.correct_iso.clone();
            session
                .answer(Some(crate::model::Choice::Country(iso)))
                .unwrap();
        }
        let level = game.finish_level(session).unwrap();
        assert_eq!(level.best_score, 10);
        assert!(game.progress().is_unlocked(Domain::Asia, 2));
        assert_eq!(game.map_states().count(crate::map::MapStatus::Wrong), 0);
    }

    #[tokio::test]
    async fn connected_games_mirror_completions() {
        let store = Arc::new(RecordingStore::default());
        let user = Uuid::new_v4();
        let mut game = Game::connect(user, ProgressMirror::new(store.clone())).await;
        assert!(game.is_online());

        game.complete_level(Domain::World, 1, 7).unwrap();
        assert!(game.progress().is_unlocked(Domain::World, 2));
        game.flush().await;

        let saved = store.saved.lock().unwrap().clone();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].user_id, user);
        assert_eq!((saved[0].domain, saved[0].level, saved[0].score), (Domain::World, 1, 7));

        let reloaded = Game::connect(user, ProgressMirror::new(store)).await;
        assert!(reloaded.progress().is_unlocked(Domain::World, 2));
    }

    #[tokio::test]
    async fn each_attempt_is_mirrored_once() {
        let store = Arc::new(RecordingStore::default());
        let mut game = Game::connect(Uuid::new_v4(), ProgressMirror::new(store.clone())).await;
        let mut rng = StdRng::seed_from_u64(3);

        let mut session = game.start_level(Domain::Africa, 1, &mut rng).unwrap();
        while session.current_question().is_some() {
            session.answer(None).unwrap();
        }
        game.finish_level(session).unwrap();
        game.flush().await;

        assert_eq!(store.saved.lock().unwrap().len(), 1);
        assert_eq!(game.progress().get(Domain::Africa, 1).unwrap().last_score, 0);
    }

    #[test]
    fn offline_games_keep_local_progress_only() {
        let mut game = Game::offline();
        assert!(!game.is_online());
        game.complete_level(Domain::Oceania, 1, 9).unwrap();
        assert_eq!(game.progress().total_score(), 9);
        assert!(game.complete_level(Domain::Oceania, 1, 12).is_err());
    }
}
