//! The session store is the root dependency of the client: it owns the
//! current identity and credential, persists them across restarts, and
//! degrades to canned profiles when the backend is offline. Login and
//! registration never fail past this boundary; they always end in an
//! authenticated session.

use once_cell::sync::Lazy;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::auth::RegisterProfile;
use crate::api::{ApiClient, auth};
use crate::error::{Error, Result};
use crate::model::user::{Identity, ProfileUpdate, Role};
use crate::store::{self, KvStore, TOKEN_KEY, USER_KEY};

/// Credential markers stored when a fallback path authenticated locally.
const MOCK_TOKEN: &str = "mock-jwt-token-123";
const MOCK_TOKEN_NEW_USER: &str = "mock-jwt-token-new-user";

static MOCK_ADMIN: Lazy<Identity> = Lazy::new(|| Identity {
    id: "1".to_string(),
    name: "Sarah Connor".to_string(),
    email: "admin@ems.com".to_string(),
    role: Role::Admin,
    department: "Operations".to_string(),
    xp: 0,
    level: 10,
    avatar_url: Some("https://picsum.photos/200".to_string()),
    age: Some(34),
});

static MOCK_EMPLOYEE: Lazy<Identity> = Lazy::new(|| Identity {
    id: "2".to_string(),
    name: "John Doe".to_string(),
    email: "john@ems.com".to_string(),
    role: Role::Employee,
    department: "Engineering".to_string(),
    xp: 2450,
    level: 5,
    avatar_url: Some("https://picsum.photos/201".to_string()),
    age: Some(28),
});

pub struct SessionStore {
    api: ApiClient,
    store: Box<dyn KvStore>,
    current: Option<Identity>,
    token: Option<String>,
}

impl SessionStore {
    /// Builds the store and restores any persisted session. The credential
    /// is adopted without re-validation; an expired token is only
    /// discovered when a remote call rejects it.
    pub fn new(api: ApiClient, store: Box<dyn KvStore>) -> Self {
        let current: Option<Identity> = store::get_value(store.as_ref(), USER_KEY);
        let token = store.get(TOKEN_KEY);
        if let Some(identity) = &current {
            debug!(email = %identity.email, "Restored persisted session");
        }
        Self {
            api,
            store,
            current,
            token,
        }
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn adopt(&mut self, identity: Identity, token: String) {
        store::set_value(self.store.as_mut(), USER_KEY, &identity);
        self.store.set(TOKEN_KEY, &token);
        self.current = Some(identity);
        self.token = Some(token);
    }

    /// Authenticates against the backend, falling back to the canned
    /// profile for `role` when the backend is unreachable. Always resolves
    /// to an updated current identity.
    pub async fn login(&mut self, email: &str, role: Role) -> &Identity {
        info!(email, %role, "Login request");

        match auth::login(&self.api, email, role).await {
            Ok(resp) => {
                info!(email, "Login succeeded against backend");
                self.adopt(resp.user, resp.token);
            }
            Err(e) => {
                warn!(error = %e, "Backend connection failed, using mock fallback");
                let base = match role {
                    Role::Admin => &*MOCK_ADMIN,
                    Role::Employee => &*MOCK_EMPLOYEE,
                };
                let name = if email != base.email {
                    email.split('@').next().unwrap_or(email).to_string()
                } else {
                    base.name.clone()
                };
                let identity = Identity {
                    email: email.to_string(),
                    name,
                    ..base.clone()
                };
                self.adopt(identity, MOCK_TOKEN.to_string());
            }
        }

        self.current.as_ref().unwrap()
    }

    /// Registers a new account. Success and fallback both synthesize a
    /// fresh identity and treat it as the active session; the remote
    /// outcome only changes a log line.
    pub async fn register(&mut self, profile: RegisterProfile) -> bool {
        info!("Registration request");

        match auth::register(&self.api, &profile).await {
            Ok(()) => info!("Registration accepted by backend"),
            Err(e) => warn!(error = %e, "Backend register failed, using mock fallback"),
        }

        let name = profile.name.unwrap_or_else(|| "New User".to_string());
        let identity = Identity {
            id: Uuid::new_v4().to_string(),
            avatar_url: Some(format!(
                "https://ui-avatars.com/api/?name={name}&background=random"
            )),
            name,
            email: profile.email.unwrap_or_default(),
            role: profile.role.unwrap_or(Role::Employee),
            department: profile.department.unwrap_or_else(|| "General".to_string()),
            xp: 0,
            level: 1,
            age: Some(profile.age.unwrap_or(25)),
        };
        self.adopt(identity, MOCK_TOKEN_NEW_USER.to_string());
        true
    }

    /// Merges `update` into the current identity and persists it. The
    /// remote update is best-effort; only a missing session fails.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> bool {
        match self.try_update_profile(update).await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Profile update rejected");
                false
            }
        }
    }

    async fn try_update_profile(&mut self, update: ProfileUpdate) -> Result<()> {
        if self.current.is_none() {
            return Err(Error::NoActiveSession);
        }

        if let Err(e) = auth::update_profile(&self.api, &update, self.token.as_deref()).await {
            warn!(error = %e, "Backend update failed, updating local state only");
        }

        let identity = self.current.as_mut().unwrap();
        identity.apply(update);
        let identity = identity.clone();
        store::set_value(self.store.as_mut(), USER_KEY, &identity);
        Ok(())
    }

    /// Invalidates the credential (best-effort remotely) and clears all
    /// persisted session state.
    pub async fn logout(&mut self) {
        if self.token.is_some() {
            if let Err(e) = auth::logout(&self.api, self.token()).await {
                debug!(error = %e, "Remote logout failed; clearing local session anyway");
            }
        }
        self.store.remove(USER_KEY);
        self.store.remove(TOKEN_KEY);
        self.current = None;
        self.token = None;
        info!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn profile_update_without_session_is_a_typed_error() {
        let api = ApiClient::new("http://127.0.0.1:1/api");
        let mut session = SessionStore::new(api, Box::new(MemoryStore::new()));

        let result = session.try_update_profile(ProfileUpdate::default()).await;
        assert!(matches!(result, Err(Error::NoActiveSession)));
        assert!(!session.is_authenticated());
    }
}
