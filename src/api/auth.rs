use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, User};

impl ApiClient {
    /// `POST /register`. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        self.send_json(Method::POST, "/register", request).await
    }

    /// `POST /login`. Returns the credential without touching the session.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send_json(Method::POST, "/login", &body).await
    }
}
