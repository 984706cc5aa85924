//! Authentication gate
//!
//! PIN-based gate guarding entry to the diary. Two working states
//! (Unauthenticated, Authenticated) plus a first-run SetupRequired state
//! entered when no PIN has been stored yet. The PIN is a plain string in the
//! preference store, compared directly; there is no lockout or attempt
//! counting, every failed attempt is immediately retryable.

use crate::config;
use crate::error::{AppError, Result};
use crate::preferences::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No PIN stored yet; normal entry is blocked until set_pin succeeds.
    SetupRequired,
    Unauthenticated,
    /// Terminal for the session lifetime; a fresh activation resets it.
    Authenticated,
}

pub struct AuthGate {
    preferences: PreferenceStore,
    state: AuthState,
}

impl AuthGate {
    pub fn new(preferences: PreferenceStore) -> Self {
        Self {
            preferences,
            state: AuthState::Unauthenticated,
        }
    }

    /// Read the stored PIN and enter the matching initial state. Called once
    /// when the app comes up; re-entering the app from scratch lands here
    /// again, never in Authenticated.
    pub async fn activate(&mut self) -> Result<AuthState> {
        self.state = match self.stored_pin().await? {
            Some(_) => AuthState::Unauthenticated,
            None => AuthState::SetupRequired,
        };
        Ok(self.state)
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    /// First-run PIN setup. The entry field already restricts input to four
    /// digits, but the gate re-validates length and digits defensively.
    /// Succeeds only when candidate and confirmation are equal; on success
    /// the PIN is persisted and the gate authenticates.
    pub async fn set_pin(&mut self, candidate: &str, confirmation: &str) -> Result<()> {
        if !is_valid_pin(candidate) || candidate != confirmation {
            return Err(AppError::Auth(config::PIN_MISMATCH_MESSAGE.to_string()));
        }

        self.preferences.set(config::PIN_KEY, candidate).await?;
        self.state = AuthState::Authenticated;

        tracing::info!("PIN configured");
        Ok(())
    }

    /// Compare a candidate against the stored PIN. A never-set PIN always
    /// fails. Failure leaves the state untouched: an Unauthenticated gate
    /// stays locked, SetupRequired keeps blocking until set_pin, and an
    /// already-Authenticated gate is never demoted mid-session.
    pub async fn verify_pin(&mut self, candidate: &str) -> Result<()> {
        match self.stored_pin().await? {
            Some(stored) if stored == candidate => {
                self.state = AuthState::Authenticated;
                tracing::debug!("PIN verified");
                Ok(())
            }
            _ => Err(AppError::Auth(config::INCORRECT_PIN_MESSAGE.to_string())),
        }
    }

    /// The stored PIN; an empty string counts as unset.
    async fn stored_pin(&self) -> Result<Option<String>> {
        let pin = self.preferences.get(config::PIN_KEY).await?;
        Ok(pin.filter(|p| !p.is_empty()))
    }
}

fn is_valid_pin(candidate: &str) -> bool {
    candidate.len() == config::PIN_LENGTH && candidate.chars().all(|c| c.is_ascii_digit())
}
