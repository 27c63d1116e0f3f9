use futures::future::try_join;

use crate::app::App;
use crate::error::ClientResult;
use crate::models::{FriendRequest, User, UserId};
use crate::routes::{ConversationTarget, ParticipantRef, Route};
use crate::views::logged;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FriendsTab {
    #[default]
    Friends,
    Pending,
}

#[derive(Debug)]
pub struct FriendsView {
    pub friends: Vec<User>,
    pub pending: Vec<FriendRequest>,
    pub active_tab: FriendsTab,
    pub loading: bool,
}

impl Default for FriendsView {
    fn default() -> Self {
        Self::new()
    }
}

impl FriendsView {
    pub fn new() -> Self {
        Self {
            friends: Vec::new(),
            pending: Vec::new(),
            active_tab: FriendsTab::Friends,
            loading: true,
        }
    }

    /// Fetch friends and pending requests together.
    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        let result = logged(
            "load friends",
            try_join(app.api.get_friends(), app.api.get_pending_requests()).await,
        );
        self.loading = false;
        let (friends, pending) = result?;
        self.friends = friends;
        self.pending = pending;
        Ok(())
    }

    /// Accept a request: it leaves the pending list and its requester joins
    /// the friends list, once.
    pub async fn accept(&mut self, app: &App, request_id: i64) -> ClientResult<()> {
        logged(
            "accept friend request",
            app.api.accept_friend_request(request_id).await,
        )?;

        let accepted = self
            .pending
            .iter()
            .position(|r| r.id == request_id)
            .map(|idx| self.pending.remove(idx));

        if let Some(requester) = accepted.and_then(|r| r.requester) {
            if !self.friends.iter().any(|f| f.id == requester.id) {
                self.friends.push(requester);
            }
        }
        Ok(())
    }

    pub async fn block(&mut self, app: &App, request_id: i64) -> ClientResult<()> {
        logged(
            "block friend request",
            app.api.block_friend_request(request_id).await,
        )?;
        self.pending.retain(|r| r.id != request_id);
        Ok(())
    }

    pub async fn send_request(&self, app: &App, user_id: UserId) -> ClientResult<()> {
        logged(
            "send friend request",
            app.api.send_friend_request(user_id).await,
        )
    }

    /// Open (or create) a conversation with `friend` and go to Messages.
    pub async fn message(&self, app: &App, friend: &User) -> ClientResult<Route> {
        let conversation = logged(
            "start conversation",
            app.api.create_conversation(friend.id).await,
        )?;
        let route = Route::Messages(Some(ConversationTarget {
            conversation_id: conversation.id,
            participant: Some(ParticipantRef::from(friend)),
        }));
        Ok(app.nav.navigate(route))
    }
}
