use crate::app::App;
use crate::error::ClientResult;
use crate::models::{Notification, User};
use crate::views::logged;

/// Queries shorter than this clear the results instead of searching.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Default)]
pub struct NotificationsPanel {
    pub notifications: Vec<Notification>,
}

impl NotificationsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        self.notifications = logged("load notifications", app.api.get_notifications().await)?;
        Ok(())
    }

    /// Unread badge count, from what is loaded.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Unread count as the server sees it.
    pub async fn fetch_unread_count(&self, app: &App) -> ClientResult<i64> {
        logged("load unread count", app.api.get_unread_count().await)
    }

    pub async fn mark_read(&mut self, app: &App, id: i64) -> ClientResult<()> {
        logged(
            "mark notification read",
            app.api.mark_notification_read(id).await,
        )?;
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
        Ok(())
    }

    pub async fn clear_all(&mut self, app: &App) -> ClientResult<()> {
        logged("clear notifications", app.api.clear_notifications().await)?;
        self.notifications.clear();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct UserSearch {
    pub query: String,
    pub results: Vec<User>,
}

impl UserSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the query and refresh results. A failed search shows nothing.
    pub async fn set_query(&mut self, app: &App, query: &str) {
        self.query = query.to_string();

        if query.chars().count() < MIN_QUERY_LEN {
            self.results.clear();
            return;
        }

        self.results = logged("search users", app.api.search_users(query).await)
            .unwrap_or_default();
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
    }
}
