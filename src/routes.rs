use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use crate::models::{User, UserId};
use crate::session::Session;

/// Screens of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Feed,
    Profile(UserId),
    /// Messages, optionally with a conversation preselected.
    Messages(Option<ConversationTarget>),
    Groups,
    Friends,
    Settings,
    Admin,
}

/// Conversation to open when arriving at the messages screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTarget {
    pub conversation_id: i64,
    pub participant: Option<ParticipantRef>,
}

/// Minimal participant info carried across navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRef {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
}

impl From<&User> for ParticipantRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Feed => "/".to_string(),
            Route::Profile(id) => format!("/profile/{}", id),
            Route::Messages(_) => "/messages".to_string(),
            Route::Groups => "/groups".to_string(),
            Route::Friends => "/friends".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Admin => "/admin".to_string(),
        }
    }

    fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Apply the route guards for the given user.
///
/// Anonymous users only reach the login and register screens. Signed-in
/// users are bounced from those to the feed, and non-admins from the
/// admin console.
pub fn resolve(requested: Route, user: Option<&User>) -> Route {
    match user {
        None if requested.is_public() => requested,
        None => Route::Login,
        Some(_) if requested.is_public() => Route::Feed,
        Some(u) if requested == Route::Admin && !u.is_admin => Route::Feed,
        Some(_) => requested,
    }
}

/// Sidebar entries shown to `user`.
pub fn nav_items(user: Option<&User>) -> Vec<(&'static str, Route)> {
    let mut items = vec![
        ("Feed", Route::Feed),
        ("Messages", Route::Messages(None)),
        ("Friends", Route::Friends),
        ("Groups", Route::Groups),
        ("Settings", Route::Settings),
    ];
    if let Some(u) = user {
        items.insert(1, ("Profile", Route::Profile(u.id)));
        if u.is_admin {
            items.push(("Admin", Route::Admin));
        }
    }
    items
}

/// Current screen, observable by whatever renders the client.
#[derive(Clone)]
pub struct Navigator {
    session: Session,
    tx: Arc<watch::Sender<Route>>,
}

impl Navigator {
    pub fn new(session: Session) -> Self {
        let initial = resolve(Route::Feed, session.user().as_ref());
        let (tx, _rx) = watch::channel(initial);
        Self {
            session,
            tx: Arc::new(tx),
        }
    }

    pub fn current(&self) -> Route {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }

    /// Navigate to `route`, subject to the guards. Returns where we ended up.
    pub fn navigate(&self, route: Route) -> Route {
        let resolved = resolve(route, self.session.user().as_ref());
        tracing::debug!(route = %resolved, "Navigating");
        self.tx.send_replace(resolved.clone());
        resolved
    }

    /// Jump to the login screen regardless of the current route.
    pub fn redirect_to_login(&self) {
        tracing::info!("Redirecting to login");
        self.tx.send_replace(Route::Login);
    }
}
