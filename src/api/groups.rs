use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{ContentBody, Group, GroupPost, NewGroup};

impl ApiClient {
    pub async fn get_groups(&self) -> ClientResult<Vec<Group>> {
        self.get_list("/groups").await
    }

    pub async fn create_group(&self, group: &NewGroup) -> ClientResult<Group> {
        self.send_json(Method::POST, "/groups", group).await
    }

    pub async fn get_group(&self, id: i64) -> ClientResult<Group> {
        self.get(&format!("/groups/{}", id)).await
    }

    pub async fn join_group(&self, id: i64) -> ClientResult<()> {
        self.call(Method::POST, &format!("/groups/{}/join", id)).await
    }

    pub async fn leave_group(&self, id: i64) -> ClientResult<()> {
        self.call(Method::DELETE, &format!("/groups/{}/leave", id))
            .await
    }

    pub async fn get_group_posts(&self, id: i64) -> ClientResult<Vec<GroupPost>> {
        self.get_list(&format!("/groups/{}/posts", id)).await
    }

    pub async fn create_group_post(&self, id: i64, content: &str) -> ClientResult<GroupPost> {
        let body = ContentBody {
            content: content.to_string(),
        };
        self.send_json(Method::POST, &format!("/groups/{}/posts", id), &body)
            .await
    }
}
