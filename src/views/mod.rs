//! One view model per screen.
//!
//! Each view owns its state, fetches what it needs through
//! [`App`](crate::app::App) and updates itself from the responses. Failures
//! with no inline message are logged and handed back to the caller; screens
//! with inline errors keep the message in their own `error` field.

pub mod admin;
pub mod auth;
pub mod feed;
pub mod friends;
pub mod groups;
pub mod messages;
pub mod navbar;
pub mod post_card;
pub mod profile;
pub mod settings;

pub use admin::AdminView;
pub use auth::{LoginView, RegisterView};
pub use feed::FeedView;
pub use friends::{FriendsTab, FriendsView};
pub use groups::GroupsView;
pub use messages::MessagesView;
pub use navbar::{NotificationsPanel, UserSearch};
pub use post_card::PostCard;
pub use profile::ProfileView;
pub use settings::SettingsView;

use crate::error::{ClientError, ClientResult};

/// Log a failed action and pass the result through.
pub(crate) fn logged<T>(action: &'static str, result: ClientResult<T>) -> ClientResult<T> {
    if let Err(e) = &result {
        tracing::warn!(action, error = %e, "Action failed");
    }
    result
}

/// Reject blank input before any request is made.
pub(crate) fn require_text(value: &str, what: &str) -> ClientResult<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Invalid(format!("{} must not be empty", what)));
    }
    Ok(())
}
