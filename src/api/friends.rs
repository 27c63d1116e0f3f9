use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{FriendRequest, FriendRequestBody, User, UserId};

impl ApiClient {
    pub async fn get_friends(&self) -> ClientResult<Vec<User>> {
        self.get_list("/friends").await
    }

    pub async fn get_pending_requests(&self) -> ClientResult<Vec<FriendRequest>> {
        self.get_list("/friends/pending").await
    }

    pub async fn send_friend_request(&self, addressee_id: UserId) -> ClientResult<()> {
        let body = FriendRequestBody { addressee_id };
        self.send_empty(Method::POST, "/friends/request", Some(&body))
            .await
    }

    pub async fn accept_friend_request(&self, request_id: i64) -> ClientResult<()> {
        self.call(Method::PUT, &format!("/friends/{}/accept", request_id))
            .await
    }

    pub async fn block_friend_request(&self, request_id: i64) -> ClientResult<()> {
        self.call(Method::PUT, &format!("/friends/{}/block", request_id))
            .await
    }
}
