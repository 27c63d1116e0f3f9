use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{RegisterRequest, User};
use crate::routes::{Navigator, Route};
use crate::session::{FileStorage, LocalStorage, Session};

/// Everything a screen needs: the session, the navigator and the gateway.
#[derive(Clone)]
pub struct App {
    pub session: Session,
    pub nav: Navigator,
    pub api: ApiClient,
}

impl App {
    /// Restore the session from `storage` and wire up the gateway.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        storage: Arc<dyn LocalStorage>,
    ) -> ClientResult<Self> {
        let session = Session::restore(storage);
        let nav = Navigator::new(session.clone());
        let api = ApiClient::new(base_url, timeout, session.clone(), nav.clone())?;

        tracing::debug!(
            base_url,
            authenticated = session.is_authenticated(),
            "Client initialised"
        );

        Ok(Self { session, nav, api })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let storage = FileStorage::open(config.session_path())?;
        Self::new(
            &config.api.base_url,
            config.api.timeout_secs.map(Duration::from_secs),
            Arc::new(storage),
        )
    }

    /// Sign in and persist the returned credential, then go to the feed.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let response = self.api.login(email, password).await?;
        self.session.establish(&response.token, response.user.clone())?;
        tracing::info!(user_id = response.user.id, "Signed in");
        self.nav.navigate(Route::Feed);
        Ok(response.user)
    }

    /// Create an account and sign straight into it.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        self.api.register(request).await?;
        self.login(&request.email, &request.password).await
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        tracing::info!("Signed out");
        self.nav.navigate(Route::Login);
        Ok(())
    }

    /// The signed-in user, or [`ClientError::NotAuthenticated`].
    pub fn require_user(&self) -> ClientResult<User> {
        self.session.user().ok_or(ClientError::NotAuthenticated)
    }
}
