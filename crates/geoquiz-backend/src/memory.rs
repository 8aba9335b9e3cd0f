//! In-memory backend for tests and offline runs.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use geoquiz_core::traits::{AuthSession, IdentityService, Profile, ProgressRecord, ProgressStore};

use crate::error::BackendError;

struct Account {
    id: Uuid,
    email: String,
    password: String,
    handle: String,
}

/// A backend that keeps accounts, profiles and progress in process memory.
///
/// Mirrors the remote behaviour that matters to the engine: progress rows
/// are keyed by (user, domain, level) and replaced on upsert.
#[derive(Default)]
pub struct InMemoryBackend {
    accounts: Mutex<Vec<Account>>,
    profiles: Mutex<Vec<Profile>>,
    progress: Mutex<Vec<ProgressRecord>>,
    /// Number of progress writes received.
    writes: AtomicU32,
    /// When set, every call fails with a network error.
    failing: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Every stored progress row.
    pub fn records(&self) -> Vec<ProgressRecord> {
        self.progress
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.failing.load(Ordering::Relaxed) {
            Err(BackendError::NetworkError("backend unavailable".into()))
        } else {
            Ok(())
        }
    }
}

fn poisoned<T>(_: T) -> BackendError {
    BackendError::NetworkError("backend state poisoned".into())
}

#[async_trait]
impl IdentityService for InMemoryBackend {
    async fn sign_up(&self, email: &str, password: &str, handle: &str) -> anyhow::Result<()> {
        self.check()?;
        let mut accounts = self.accounts.lock().map_err(poisoned)?;
        if accounts.iter().any(|a| a.email.eq_ignore_ascii_case(email)) {
            anyhow::bail!(BackendError::ApiError {
                status: 422,
                message: "User already registered".into(),
            });
        }
        accounts.push(Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: password.to_string(),
            handle: handle.to_string(),
        });
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthSession> {
        self.check()?;
        let accounts = self.accounts.lock().map_err(poisoned)?;
        let account = accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .ok_or_else(|| BackendError::AuthenticationFailed("Invalid login credentials".into()))?;
        tracing::debug!("in-memory sign-in for {} ({})", account.email, account.handle);
        Ok(AuthSession {
            user_id: account.id,
            email: account.email.clone(),
            access_token: format!("memory-{}", account.id),
        })
    }

    async fn find_profile_by_handle(&self, handle: &str) -> anyhow::Result<Option<Profile>> {
        self.check()?;
        let profiles = self.profiles.lock().map_err(poisoned)?;
        Ok(profiles
            .iter()
            .find(|p| {
                p.handle
                    .as_deref()
                    .is_some_and(|h| h.eq_ignore_ascii_case(handle))
            })
            .cloned())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        self.check()?;
        let profiles = self.profiles.lock().map_err(poisoned)?;
        Ok(profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &Profile) -> anyhow::Result<()> {
        self.check()?;
        let mut profiles = self.profiles.lock().map_err(poisoned)?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_progress(&self, user_id: Uuid) -> anyhow::Result<Vec<ProgressRecord>> {
        self.check()?;
        let progress = self.progress.lock().map_err(poisoned)?;
        Ok(progress
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save_progress(&self, record: &ProgressRecord) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        let mut progress = self.progress.lock().map_err(poisoned)?;
        let key = |r: &ProgressRecord| (r.user_id, r.domain, r.level);
        match progress.iter_mut().find(|r| key(r) == key(record)) {
            Some(existing) => *existing = record.clone(),
            None => progress.push(record.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use geoquiz_core::account::Accounts;
    use geoquiz_core::game::Game;
    use geoquiz_core::mirror::ProgressMirror;
    use geoquiz_core::model::Domain;

    use super::*;

    fn record(user_id: Uuid, level: u8, score: u8) -> ProgressRecord {
        ProgressRecord {
            user_id,
            domain: Domain::Asia,
            level,
            score,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_replaces_by_key() {
        let backend = InMemoryBackend::new();
        let user = Uuid::new_v4();
        backend.save_progress(&record(user, 1, 5)).await.unwrap();
        backend.save_progress(&record(user, 1, 9)).await.unwrap();
        backend.save_progress(&record(user, 2, 3)).await.unwrap();
        backend
            .save_progress(&record(Uuid::new_v4(), 1, 10))
            .await
            .unwrap();

        let mine = backend.load_progress(user).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine.iter().find(|r| r.level == 1).unwrap().score, 9);
        assert_eq!(backend.write_count(), 4);
    }

    #[tokio::test]
    async fn failing_backend_rejects_calls() {
        let backend = InMemoryBackend::new();
        backend.set_failing(true);
        let err = backend.load_progress(Uuid::new_v4()).await.unwrap_err();
        assert!(err.to_string().contains("network error"));
        assert!(backend.sign_in("a@b.c", "secret1").await.is_err());

        backend.set_failing(false);
        assert!(backend.load_progress(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn account_flow_end_to_end() {
        let backend = Arc::new(InMemoryBackend::new());
        let mut accounts = Accounts::new(backend.clone());
        let session = accounts
            .sign_up("ana@example.com", "secret1", "Ana")
            .await
            .unwrap()
            .clone();

        let mut game = Game::connect(session.user_id, ProgressMirror::new(backend.clone())).await;
        game.complete_level(Domain::Europe, 1, 8).unwrap();
        game.flush().await;
        assert_eq!(backend.records().len(), 1);

        let mut other_device = Accounts::new(backend.clone());
        let again = other_device.sign_in("ana", "secret1").await.unwrap();
        assert_eq!(again.user_id, session.user_id);
        let reloaded = Game::connect(again.user_id, ProgressMirror::new(backend.clone())).await;
        assert!(reloaded.progress().is_unlocked(Domain::Europe, 2));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let backend = InMemoryBackend::new();
        backend.sign_up("a@b.c", "secret1", "Abc").await.unwrap();
        let err = backend.sign_up("A@B.C", "secret1", "Abd").await.unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }
}
