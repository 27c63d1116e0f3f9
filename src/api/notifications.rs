use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Notification, UnreadCount};

impl ApiClient {
    pub async fn get_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.get_list("/notifications").await
    }

    pub async fn mark_notification_read(&self, id: i64) -> ClientResult<()> {
        self.call(Method::PUT, &format!("/notifications/{}/read", id))
            .await
    }

    pub async fn get_unread_count(&self) -> ClientResult<i64> {
        let unread: UnreadCount = self.get("/notifications/unread").await?;
        Ok(unread.count)
    }

    pub async fn clear_notifications(&self) -> ClientResult<()> {
        self.call(Method::DELETE, "/notifications").await
    }
}
