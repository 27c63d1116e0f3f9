use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::models::{User, UserId};
use crate::routes::{ConversationTarget, ParticipantRef, Route};
use crate::views::logged;

#[derive(Debug)]
pub struct ProfileView {
    pub user_id: UserId,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub request_sent: bool,
}

impl ProfileView {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            user: None,
            loading: true,
            error: None,
            request_sent: false,
        }
    }

    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        self.error = None;
        let result = app.api.get_profile(self.user_id).await;
        self.loading = false;
        match result {
            Ok(user) => {
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message("User not found"));
                Err(e)
            }
        }
    }

    pub fn is_own(&self, app: &App) -> bool {
        app.session.user_id() == Some(self.user_id)
    }

    pub async fn add_friend(&mut self, app: &App) -> ClientResult<()> {
        if self.is_own(app) {
            return Err(ClientError::Invalid(
                "You cannot befriend yourself".to_string(),
            ));
        }
        logged(
            "send friend request",
            app.api.send_friend_request(self.user_id).await,
        )?;
        self.request_sent = true;
        Ok(())
    }

    /// Start a conversation with this user and go to Messages.
    pub async fn message(&self, app: &App) -> ClientResult<Route> {
        let conversation = logged(
            "start conversation",
            app.api.create_conversation(self.user_id).await,
        )?;
        let route = Route::Messages(Some(ConversationTarget {
            conversation_id: conversation.id,
            participant: self.user.as_ref().map(ParticipantRef::from),
        }));
        Ok(app.nav.navigate(route))
    }
}
