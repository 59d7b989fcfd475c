//! Session state machine for the two-step EduSpace sign-in.
//!
//! The store is the single source of truth for who is signed in, with what
//! role, holding what bearer token. Credentials move it into a
//! verification-pending state; the one-time code commits token and identity
//! in one step; sign-out clears everything, memory and disk.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, SessionAccess, VerifyCodeResponse};

use super::storage::SessionStorage;

/// Coarse permission class gating access to destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Teacher,
}

impl Role {
    /// Parse the backend's role string. Unrecognized strings stay `None`
    /// and are routed to login by the navigation guard.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "RoleAdmin" => Some(Role::Admin),
            "RoleTeacher" => Some(Role::Teacher),
            _ => None,
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Admin => "RoleAdmin",
            Role::Teacher => "RoleTeacher",
        }
    }
}

/// The authenticated identity, persisted alongside the token.
/// `id` is the profile id; the account id comes separately when the backend
/// includes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    #[serde(rename = "accountId", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    pub role: String,
    pub username: String,
}

impl Identity {
    pub fn role(&self) -> Option<Role> {
        Role::from_wire(&self.role)
    }
}

/// Immutable view of the session for the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub role: Option<Role>,
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    identity: Option<Identity>,
    verification_pending: bool,
    pending_username: Option<String>,
}

impl SessionState {
    fn is_authenticated(&self) -> bool {
        // Token and identity only ever change together, so either field
        // would do; checking both keeps the invariant visible.
        matches!(&self.token, Some(t) if !t.is_empty()) && self.identity.is_some()
    }
}

/// Process-wide session store.
///
/// Cheap to clone; all clones share the same state. Constructed explicitly
/// from a [`SessionStorage`] and injected wherever session state is needed.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
    storage: Arc<SessionStorage>,
}

impl SessionStore {
    /// Build the store, restoring a persisted session when one is present
    /// and well-formed. Anything else starts unauthenticated.
    pub fn new(storage: SessionStorage) -> Self {
        let mut state = SessionState::default();
        if let Some((token, identity)) = storage.load() {
            info!(username = %identity.username, "restored persisted session");
            state.token = Some(token);
            state.identity = Some(identity);
        }

        Self {
            inner: Arc::new(RwLock::new(state)),
            storage: Arc::new(storage),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Sign-in flow =====

    /// First step: submit credentials. On success the session becomes
    /// verification-pending; on failure it is left untouched.
    pub async fn sign_in(&self, api: &ApiClient, username: &str, password: &str) -> Result<()> {
        api.sign_in(username, password).await?;
        self.begin_verification(username);
        Ok(())
    }

    /// Second step: submit the one-time code and commit the returned
    /// token and identity.
    pub async fn verify_code(&self, api: &ApiClient, username: &str, code: &str) -> Result<()> {
        let response = api.verify_code(username, code).await?;
        self.complete_verification(username, response)
    }

    /// Move into the verification-pending state for `username`.
    pub fn begin_verification(&self, username: &str) {
        let mut state = self.write();
        state.verification_pending = true;
        state.pending_username = Some(username.to_string());
        info!(username, "credentials accepted, awaiting verification code");
    }

    /// Commit a verification response: persist token and identity, then
    /// publish both to memory in a single transition.
    ///
    /// Fails without any state change when a required field is missing, so
    /// the caller can retry the code or abandon the attempt.
    pub fn complete_verification(
        &self,
        username: &str,
        response: VerifyCodeResponse,
    ) -> Result<()> {
        let token = match response.token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ApiError::missing_field("token").into()),
        };
        let role = response.role.ok_or_else(|| ApiError::missing_field("role"))?;
        let profile_id = response
            .profile_id
            .ok_or_else(|| ApiError::missing_field("profileId"))?;

        let identity = Identity {
            id: profile_id,
            account_id: response.id,
            role,
            username: response.username.unwrap_or_else(|| username.to_string()),
        };

        // Persist first; memory is only updated once the durable write held.
        self.storage.save(&token, &identity)?;
        info!(username = %identity.username, "session established");

        let mut state = self.write();
        state.token = Some(token);
        state.identity = Some(identity);
        state.verification_pending = false;
        state.pending_username = None;
        Ok(())
    }

    /// Abandon an in-flight verification without touching anything else.
    pub fn cancel_verification(&self) {
        let mut state = self.write();
        state.verification_pending = false;
        state.pending_username = None;
    }

    /// Clear the session, memory and disk. Idempotent and infallible:
    /// a storage failure is logged, never raised.
    pub fn sign_out(&self) {
        {
            let mut state = self.write();
            *state = SessionState::default();
        }
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
        info!("signed out");
    }

    // ===== Accessors =====

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.read().identity.as_ref().and_then(Identity::role)
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.read().identity.clone()
    }

    pub fn verification_pending(&self) -> bool {
        self.read().verification_pending
    }

    pub fn pending_username(&self) -> Option<String> {
        self.read().pending_username.clone()
    }

    /// Snapshot for the navigation guard.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read();
        SessionSnapshot {
            is_authenticated: state.is_authenticated(),
            role: state.identity.as_ref().and_then(Identity::role),
        }
    }
}

impl SessionAccess for SessionStore {
    fn token(&self) -> Option<String> {
        SessionStore::token(self)
    }

    fn force_sign_out(&self) {
        self.sign_out();
    }
}
