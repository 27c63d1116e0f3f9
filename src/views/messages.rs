use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::models::{Conversation, Message, User};
use crate::routes::ConversationTarget;
use crate::views::{logged, require_text};

#[derive(Debug)]
pub struct MessagesView {
    pub conversations: Vec<Conversation>,
    pub active: Option<Conversation>,
    pub messages: Vec<Message>,
    pub draft: String,
    pub loading: bool,
}

impl Default for MessagesView {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagesView {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            active: None,
            messages: Vec::new(),
            draft: String::new(),
            loading: true,
        }
    }

    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        let result = logged("load conversations", app.api.get_conversations().await);
        self.loading = false;
        self.conversations = result?;
        Ok(())
    }

    /// Make `conversation` active and load its messages.
    pub async fn select(&mut self, app: &App, conversation: Conversation) -> ClientResult<()> {
        let id = conversation.id;
        self.active = Some(conversation);
        self.messages.clear();
        self.messages = logged("load messages", app.api.get_messages(id).await)?;
        Ok(())
    }

    /// Open the conversation a navigation asked for.
    ///
    /// Uses the loaded entry when there is one; otherwise a placeholder with
    /// the participant carried by the route. Already active: nothing to do.
    pub async fn open_target(&mut self, app: &App, target: &ConversationTarget) -> ClientResult<()> {
        if self.active.as_ref().map(|c| c.id) == Some(target.conversation_id) {
            return Ok(());
        }

        let conversation = self
            .conversations
            .iter()
            .find(|c| c.id == target.conversation_id)
            .cloned()
            .unwrap_or_else(|| Conversation {
                id: target.conversation_id,
                participant: target.participant.as_ref().map(|p| User {
                    id: p.id,
                    username: p.username.clone(),
                    full_name: p.full_name.clone(),
                    ..User::default()
                }),
                ..Conversation::default()
            });

        self.select(app, conversation).await
    }

    pub async fn send(&mut self, app: &App) -> ClientResult<()> {
        require_text(&self.draft, "Message")?;
        let Some(active) = self.active.as_ref() else {
            return Err(ClientError::Invalid("No conversation selected".to_string()));
        };

        let message = logged(
            "send message",
            app.api.send_message(active.id, &self.draft).await,
        )?;
        self.messages.push(message);
        self.draft.clear();
        Ok(())
    }

    pub fn is_own(message: &Message, user: Option<&User>) -> bool {
        user.is_some_and(|u| u.id == message.user_id)
    }
}
