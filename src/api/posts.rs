use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Comment, ContentBody, NewPost, NewReport, Post, PostId, ReportTarget};

impl ApiClient {
    pub async fn get_feed(&self) -> ClientResult<Vec<Post>> {
        self.get_list("/feed").await
    }

    pub async fn create_post(&self, post: &NewPost) -> ClientResult<Post> {
        self.send_json(Method::POST, "/posts", post).await
    }

    pub async fn get_post(&self, id: PostId) -> ClientResult<Post> {
        self.get(&format!("/posts/{}", id)).await
    }

    /// `PUT /posts/:id`. The server only acknowledges; callers update
    /// their copy themselves.
    pub async fn update_post(&self, id: PostId, post: &NewPost) -> ClientResult<()> {
        self.send_empty(Method::PUT, &format!("/posts/{}", id), Some(post))
            .await
    }

    pub async fn delete_post(&self, id: PostId) -> ClientResult<()> {
        self.call(Method::DELETE, &format!("/posts/{}", id)).await
    }

    pub async fn like_post(&self, id: PostId) -> ClientResult<()> {
        self.call(Method::POST, &format!("/posts/{}/like", id)).await
    }

    pub async fn unlike_post(&self, id: PostId) -> ClientResult<()> {
        self.call(Method::DELETE, &format!("/posts/{}/like", id)).await
    }

    pub async fn get_comments(&self, id: PostId) -> ClientResult<Vec<Comment>> {
        self.get_list(&format!("/posts/{}/comments", id)).await
    }

    pub async fn add_comment(&self, id: PostId, content: &str) -> ClientResult<Comment> {
        let body = ContentBody {
            content: content.to_string(),
        };
        self.send_json(Method::POST, &format!("/posts/{}/comments", id), &body)
            .await
    }

    /// `POST /reports`: flag content for moderator review.
    pub async fn create_report(
        &self,
        target_type: ReportTarget,
        target_id: i64,
        reason: &str,
    ) -> ClientResult<()> {
        let body = NewReport {
            target_type,
            target_id,
            reason: reason.to_string(),
        };
        self.send_empty(Method::POST, "/reports", Some(&body)).await
    }
}
