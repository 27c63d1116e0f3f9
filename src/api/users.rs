use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{ProfileUpdate, User, UserId};

impl ApiClient {
    pub async fn get_profile(&self, id: UserId) -> ClientResult<User> {
        self.get(&format!("/users/{}", id)).await
    }

    pub async fn update_profile(&self, id: UserId, update: &ProfileUpdate) -> ClientResult<()> {
        self.send_empty(Method::PUT, &format!("/users/{}", id), Some(update))
            .await
    }

    pub async fn search_users(&self, query: &str) -> ClientResult<Vec<User>> {
        let mut url = self.url("/users/search")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get_list_url(url).await
    }
}
