use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ClientResult;
use crate::models::User;
use crate::session::storage::LocalStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// The signed-in user and their bearer credential.
///
/// Cheap to clone; every clone sees the same state. Changes are written
/// through to the backing [`LocalStorage`] under [`TOKEN_KEY`] and
/// [`USER_KEY`].
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn LocalStorage>,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Read the persisted credential and user record.
    ///
    /// The session counts as authenticated only if both are present and the
    /// user record parses. There is no expiry check.
    pub fn restore(storage: Arc<dyn LocalStorage>) -> Self {
        let token = storage.get_item(TOKEN_KEY);
        let user = storage
            .get_item(USER_KEY)
            .and_then(|json| match serde_json::from_str::<User>(&json) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable stored user");
                    None
                }
            });

        let state = match (token, user) {
            (Some(token), Some(user)) => SessionState {
                token: Some(token),
                user: Some(user),
            },
            _ => SessionState::default(),
        };

        Self {
            storage,
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().user.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.state().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user.clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.state().user.as_ref().map(|u| u.id)
    }

    pub fn is_admin(&self) -> bool {
        self.state().user.as_ref().is_some_and(|u| u.is_admin)
    }

    /// Persist a freshly issued credential and mark the session authenticated.
    pub fn establish(&self, token: &str, user: User) -> ClientResult<()> {
        let user_json = serde_json::to_string(&user)?;
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage.set_item(USER_KEY, &user_json)?;

        let mut state = self.state();
        state.token = Some(token.to_string());
        state.user = Some(user);
        Ok(())
    }

    /// Forget the credential and user record, in memory and on disk.
    pub fn clear(&self) -> ClientResult<()> {
        {
            let mut state = self.state();
            state.token = None;
            state.user = None;
        }
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        Ok(())
    }

    /// Merge the fields of `patch` into the stored user record.
    ///
    /// Purely local: nothing is re-fetched from the server. Fields absent
    /// from `patch` keep their current values.
    pub fn update_user<P: Serialize>(&self, patch: &P) -> ClientResult<Option<User>> {
        let mut state = self.state();
        let Some(current) = state.user.as_ref() else {
            return Ok(None);
        };

        let mut merged = serde_json::to_value(current)?;
        if let (Some(target), serde_json::Value::Object(fields)) =
            (merged.as_object_mut(), serde_json::to_value(patch)?)
        {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        let updated: User = serde_json::from_value(merged)?;

        self.storage
            .set_item(USER_KEY, &serde_json::to_string(&updated)?)?;
        state.user = Some(updated.clone());
        Ok(Some(updated))
    }
}
