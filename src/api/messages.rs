use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Conversation, Message, NewConversation, NewMessage, UserId};

impl ApiClient {
    pub async fn get_conversations(&self) -> ClientResult<Vec<Conversation>> {
        self.get_list("/conversations").await
    }

    /// Start a conversation with `participant_id`, or get the existing one.
    pub async fn create_conversation(&self, participant_id: UserId) -> ClientResult<Conversation> {
        let body = NewConversation { participant_id };
        self.send_json(Method::POST, "/conversations", &body).await
    }

    pub async fn get_messages(&self, conversation_id: i64) -> ClientResult<Vec<Message>> {
        self.get_list(&format!("/conversations/{}/messages", conversation_id))
            .await
    }

    pub async fn send_message(&self, conversation_id: i64, body: &str) -> ClientResult<Message> {
        let body = NewMessage {
            body: body.to_string(),
        };
        self.send_json(
            Method::POST,
            &format!("/conversations/{}/messages", conversation_id),
            &body,
        )
        .await
    }
}
