//! Account validation and sign-in flows over an [`IdentityService`].

use std::sync::Arc;

use tracing::instrument;

use crate::error::AccountError;
use crate::traits::{AuthSession, IdentityService, Profile};

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Handles are 3 to 15 ASCII letters or digits.
pub fn validate_handle(handle: &str) -> Result<(), AccountError> {
    let len = handle.len();
    if (3..=15).contains(&len) && handle.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(AccountError::InvalidHandle)
    }
}

pub fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(AccountError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        })
    }
}

/// Account operations for one player.
pub struct Accounts {
    identity: Arc<dyn IdentityService>,
    session: Option<AuthSession>,
}

impl Accounts {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self {
            identity,
            session: None,
        }
    }

    /// The signed-in user, if any.
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Create an account, sign in and store the profile.
    #[instrument(skip(self, password))]
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        handle: &str,
    ) -> Result<&AuthSession, AccountError> {
        validate_handle(handle)?;
        validate_password(password)?;

        match self.identity.find_profile_by_handle(handle).await {
            Ok(Some(_)) => return Err(AccountError::HandleTaken),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("handle lookup failed: {e:#}");
                return Err(AccountError::HandleLookupFailed);
            }
        }

        self.identity
            .sign_up(email, password, handle)
            .await
            .map_err(rejected)?;
        let session = self
            .identity
            .sign_in(email, password)
            .await
            .map_err(rejected)?;

        let profile = Profile {
            id: session.user_id,
            handle: Some(handle.to_string()),
            email: Some(session.email.clone()),
        };
        if let Err(e) = self.identity.upsert_profile(&profile).await {
            tracing::warn!("could not store profile after sign-up: {e:#}");
        }
        tracing::info!("signed up {handle}");
        Ok(self.session.insert(session))
    }

    /// Sign in with an email or a handle.
    #[instrument(skip(self, password))]
    pub async fn sign_in(
        &mut self,
        identifier: &str,
        password: &str,
    ) -> Result<&AuthSession, AccountError> {
        let login = identifier.trim();
        if login.is_empty() {
            return Err(AccountError::MissingIdentifier);
        }

        let email = if login.contains('@') {
            login.to_string()
        } else {
            let profile = self
                .identity
                .find_profile_by_handle(login)
                .await
                .map_err(|e| {
                    tracing::warn!("handle lookup failed: {e:#}");
                    AccountError::HandleLookupFailed
                })?;
            profile
                .and_then(|p| p.email)
                .ok_or(AccountError::UnknownHandle)?
        };

        let session = self
            .identity
            .sign_in(&email, password)
            .await
            .map_err(rejected)?;
        tracing::info!("signed in as {}", session.user_id);
        Ok(self.session.insert(session))
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// Change the handle of the signed-in user.
    #[instrument(skip(self))]
    pub async fn update_handle(&mut self, handle: &str) -> Result<Profile, AccountError> {
        let session = self.session.as_ref().ok_or(AccountError::NotSignedIn)?;
        validate_handle(handle)?;

        match self.identity.find_profile_by_handle(handle).await {
            Ok(Some(owner)) if owner.id != session.user_id => {
                return Err(AccountError::HandleTaken)
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("handle lookup failed: {e:#}");
                return Err(AccountError::HandleLookupFailed);
            }
        }

        let profile = Profile {
            id: session.user_id,
            handle: Some(handle.to_string()),
            email: Some(session.email.clone()),
        };
        self.identity
            .upsert_profile(&profile)
            .await
            .map_err(rejected)?;
        Ok(profile)
    }

    /// Profile of the signed-in user. A missing row falls back to the
    /// session email.
    pub async fn profile(&self) -> Result<Profile, AccountError> {
        let session = self.session.as_ref().ok_or(AccountError::NotSignedIn)?;
        let stored = self
            .identity
            .fetch_profile(session.user_id)
            .await
            .map_err(rejected)?;
        Ok(match stored {
            Some(profile) => Profile {
                email: profile.email.or_else(|| Some(session.email.clone())),
                ..profile
            },
            None => Profile {
                id: session.user_id,
                handle: None,
                email: Some(session.email.clone()),
            },
        })
    }
}

fn rejected(err: anyhow::Error) -> AccountError {
    tracing::warn!("identity backend rejected request: {err:#}");
    AccountError::Rejected(err.to_string())
}
