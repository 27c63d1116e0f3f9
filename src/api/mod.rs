//! HTTP gateway to the SocialNet REST API.
//!
//! Every call goes through [`ApiClient::send`], which attaches the session's
//! bearer token and turns a `401` into a global sign-out: the session is
//! cleared and the navigator is sent to the login screen. Endpoint methods
//! live in the per-area submodules as additional `impl ApiClient` blocks.

pub mod admin;
pub mod auth;
pub mod friends;
pub mod groups;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod users;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::error::{read_error_body, ClientError, ClientResult};
use crate::routes::Navigator;
use crate::session::Session;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    nav: Navigator,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        session: Session,
        nav: Navigator,
    ) -> ClientResult<Self> {
        // Validate once up front; endpoint paths are appended textually so a
        // base like `http://host/api` keeps its prefix.
        Url::parse(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("socialnet-client/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            nav,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Dispatch a request and map non-success statuses to errors.
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        let message = read_error_body(&body);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "Request rejected as unauthorized; signing out");
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "Failed to clear stored session");
            }
            self.nav.redirect_to_login();
            return Err(ClientError::Unauthorized(message));
        }

        tracing::debug!(%url, %status, %message, "Request failed");
        Err(ClientError::Api { status, message })
    }

    pub(crate) async fn get_url<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let response = self.send(self.request(Method::GET, url)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_url(self.url(path)?).await
    }

    /// GET a list endpoint. The server answers an empty list with `null`.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        self.get_list_url(self.url(path)?).await
    }

    pub(crate) async fn get_list_url<T: DeserializeOwned>(&self, url: Url) -> ClientResult<Vec<T>> {
        let items: Option<Vec<T>> = self.get_url(url).await?;
        Ok(items.unwrap_or_default())
    }

    /// Send `body` and decode the JSON response.
    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, self.url(path)?).json(body);
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    /// Fire a request whose response body carries nothing the client needs.
    pub(crate) async fn send_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, self.url(path)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await?;
        Ok(())
    }

    pub(crate) async fn call(&self, method: Method, path: &str) -> ClientResult<()> {
        self.send_empty::<()>(method, path, None).await
    }
}
