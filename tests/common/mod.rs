//! In-process stand-in for the SocialNet REST API.
//!
//! Holds everything in memory, authenticates `Bearer token-<user id>` and
//! counts hits per route so tests can assert that nothing was sent.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{MatchedPath, Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use socialnet::app::App;
use socialnet::session::{LocalStorage, MemoryStorage};

pub const CREATED_AT: &str = "2024-03-01T12:00:00Z";

pub type Shared = Arc<Mutex<Backend>>;

#[derive(Default)]
pub struct Backend {
    pub users: Vec<Value>,
    /// email -> (password, user id)
    pub credentials: HashMap<String, (String, i64)>,
    pub posts: Vec<Value>,
    pub likes: HashSet<(i64, i64)>,
    pub comments: Vec<Value>,
    /// (user id, friend id), stored both ways
    pub friendships: Vec<(i64, i64)>,
    pub requests: Vec<Value>,
    pub conversations: Vec<Value>,
    pub messages: Vec<Value>,
    pub groups: Vec<Value>,
    pub members: HashSet<(i64, i64)>,
    pub group_posts: Vec<Value>,
    pub notifications: Vec<Value>,
    pub reports: Vec<Value>,
    /// Answer like/unlike with a 500.
    pub fail_likes: bool,
    /// "METHOD /route/{param}" -> count
    pub hits: HashMap<String, usize>,
    next_id: i64,
}

impl Backend {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }

    pub fn add_user(&mut self, id: i64, username: &str, email: &str, password: &str, is_admin: bool) {
        self.users.push(json!({
            "id": id,
            "username": username,
            "email": email,
            "full_name": "",
            "bio": "",
            "avatar_url": "",
            "is_admin": is_admin,
            "created_at": CREATED_AT,
        }));
        self.credentials
            .insert(email.to_string(), (password.to_string(), id));
    }

    pub fn user(&self, id: i64) -> Option<Value> {
        self.users.iter().find(|u| u["id"] == id).cloned()
    }

    pub fn add_post(&mut self, id: i64, user_id: i64, content: &str, like_count: i64) {
        self.posts.push(json!({
            "id": id,
            "user_id": user_id,
            "content": content,
            "media_url": "",
            "like_count": like_count,
            "created_at": CREATED_AT,
        }));
    }

    pub fn add_request(&mut self, id: i64, requester_id: i64, addressee_id: i64) {
        self.requests.push(json!({
            "id": id,
            "requester_id": requester_id,
            "addressee_id": addressee_id,
            "status": "pending",
        }));
    }

    pub fn add_group(&mut self, id: i64, owner_id: i64, title: &str, member_count: i64) {
        self.groups.push(json!({
            "id": id,
            "owner_id": owner_id,
            "title": title,
            "description": "",
            "member_count": member_count,
            "created_at": CREATED_AT,
        }));
    }

    pub fn add_report(&mut self, id: i64, target_type: &str, target_id: i64, status: &str) {
        self.reports.push(json!({
            "id": id,
            "reporter_id": 1,
            "target_type": target_type,
            "target_id": target_id,
            "reason": "spam",
            "status": status,
            "created_at": CREATED_AT,
        }));
    }

    pub fn add_notification(&mut self, id: i64, user_id: i64, read: bool) {
        self.notifications.push(json!({
            "id": id,
            "user_id": user_id,
            "type": "like",
            "target_id": 1,
            "message": "Someone liked your post",
            "read": read,
            "created_at": CREATED_AT,
        }));
    }

    fn post_view(&self, post: &Value, viewer: i64) -> Value {
        let mut view = post.clone();
        let id = post["id"].as_i64().unwrap_or_default();
        view["liked"] = json!(self.likes.contains(&(viewer, id)));
        view["author"] = self
            .user(post["user_id"].as_i64().unwrap_or_default())
            .unwrap_or(Value::Null);
        view
    }
}

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    pub async fn start(backend: Backend) -> Self {
        let state: Shared = Arc::new(Mutex::new(backend));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn backend(&self) -> MutexGuard<'_, Backend> {
        self.state.lock().expect("backend lock")
    }

    pub fn hits(&self, route: &str) -> usize {
        self.backend().hits.get(route).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.backend().hits.values().sum()
    }

    /// A client with empty in-memory storage.
    pub fn client(&self) -> (App, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let app = App::new(&self.base_url, None, storage.clone()).expect("client");
        (app, storage)
    }

    /// A client already signed in as `user_id`.
    pub fn client_as(&self, user_id: i64) -> (App, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let user = self.backend().user(user_id).expect("seeded user");
        storage
            .set_item("token", &format!("token-{}", user_id))
            .expect("store token");
        storage
            .set_item("user", &user.to_string())
            .expect("store user");
        let app = App::new(&self.base_url, None, storage.clone()).expect("client");
        (app, storage)
    }
}

/// Two regular users (1 alice, 2 bob) and an admin (3 root).
pub fn seeded() -> Backend {
    let mut backend = Backend::default();
    backend.add_user(1, "alice", "alice@example.com", "secret", false);
    backend.add_user(2, "bob", "bob@example.com", "hunter2", false);
    backend.add_user(3, "root", "root@example.com", "toor", true);
    backend
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/search", get(search_users))
        .route("/users/{id}", get(get_user).put(update_user))
        .route("/feed", get(feed))
        .route("/posts", post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/posts/{id}/like", post(like).delete(unlike))
        .route("/posts/{id}/comments", get(comments).post(add_comment))
        .route("/reports", post(create_report))
        .route("/friends", get(friends))
        .route("/friends/pending", get(pending))
        .route("/friends/request", post(send_request))
        .route("/friends/{id}/accept", put(accept))
        .route("/friends/{id}/block", put(block))
        .route("/conversations", get(conversations).post(create_conversation))
        .route(
            "/conversations/{id}/messages",
            get(messages).post(send_message),
        )
        .route("/groups", get(groups).post(create_group))
        .route("/groups/{id}", get(get_group))
        .route("/groups/{id}/join", post(join_group))
        .route("/groups/{id}/leave", delete(leave_group))
        .route("/groups/{id}/posts", get(group_posts).post(create_group_post))
        .route("/notifications", get(notifications).delete(clear_notifications))
        .route("/notifications/unread", get(unread_count))
        .route("/notifications/{id}/read", put(mark_read))
        .route("/admin/reports", get(reports))
        .route("/admin/reports/{id}", put(review_report))
        .route("/admin/content/{kind}/{id}", delete(delete_content))
        .route_layer(middleware::from_fn_with_state(state.clone(), record_hit))
        .with_state(state)
}

async fn record_hit(State(state): State<Shared>, req: Request, next: Next) -> Response {
    if let Some(path) = req.extensions().get::<MatchedPath>() {
        let key = format!("{} {}", req.method(), path.as_str());
        *state.lock().unwrap().hits.entry(key).or_default() += 1;
    }
    next.run(req).await
}

type Reply = Result<Response, Response>;

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn viewer(headers: &HeaderMap) -> Result<i64, Response> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer token-"))
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| (StatusCode::UNAUTHORIZED, "invalid or expired token").into_response())
}

fn ok(value: Value) -> Reply {
    Ok(Json(value).into_response())
}

/// Lists are sent as `null` when empty.
fn list(items: Vec<Value>) -> Reply {
    if items.is_empty() {
        ok(Value::Null)
    } else {
        ok(Value::Array(items))
    }
}

async fn register(State(s): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut b = s.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if b.credentials.contains_key(&email) {
        return Err(fail(StatusCode::CONFLICT, "email already registered"));
    }
    let id = b.next_id();
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    b.add_user(id, &username, &email, &password, false);
    Ok((StatusCode::CREATED, Json(b.user(id).unwrap_or_default())).into_response())
}

async fn login(State(s): State<Shared>, Json(body): Json<Value>) -> Reply {
    let b = s.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match b.credentials.get(email) {
        Some((expected, id)) if expected == password => ok(json!({
            "token": format!("token-{}", id),
            "user": b.user(*id),
        })),
        _ => Err((StatusCode::UNAUTHORIZED, "invalid credentials").into_response()),
    }
}

async fn search_users(
    State(s): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    viewer(&headers)?;
    let b = s.lock().unwrap();
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let found = b
        .users
        .iter()
        .filter(|u| {
            u["username"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&q))
        })
        .cloned()
        .collect();
    list(found)
}

async fn get_user(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    viewer(&headers)?;
    let b = s.lock().unwrap();
    b.user(id)
        .map(|u| Json(u).into_response())
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "user not found"))
}

async fn update_user(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = viewer(&headers)?;
    if me != id {
        return Err(fail(StatusCode::FORBIDDEN, "cannot edit another user"));
    }
    let mut b = s.lock().unwrap();
    if let Some(user) = b.users.iter_mut().find(|u| u["id"] == id) {
        for key in ["full_name", "bio", "avatar_url"] {
            if let Some(v) = body.get(key) {
                user[key] = v.clone();
            }
        }
    }
    ok(json!({ "message": "profile updated" }))
}

async fn feed(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    let posts = b.posts.iter().rev().map(|p| b.post_view(p, me)).collect();
    list(posts)
}

async fn create_post(State(s): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let id = b.next_id();
    let content = body["content"].as_str().unwrap_or_default().to_string();
    b.add_post(id, me, &content, 0);
    let view = b.post_view(b.posts.last().unwrap_or(&Value::Null), me);
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn get_post(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    b.posts
        .iter()
        .find(|p| p["id"] == id)
        .map(|p| Json(b.post_view(p, me)).into_response())
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "post not found"))
}

async fn update_post(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let post = b
        .posts
        .iter_mut()
        .find(|p| p["id"] == id && p["user_id"] == me)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "post not found"))?;
    post["content"] = body["content"].clone();
    ok(json!({ "message": "post updated" }))
}

async fn delete_post(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let before = b.posts.len();
    b.posts.retain(|p| !(p["id"] == id && p["user_id"] == me));
    if b.posts.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "post not found"));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn adjust_likes(b: &mut Backend, id: i64, delta: i64) {
    if let Some(post) = b.posts.iter_mut().find(|p| p["id"] == id) {
        let count = post["like_count"].as_i64().unwrap_or_default();
        post["like_count"] = json!(count + delta);
    }
}

async fn like(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    if b.fail_likes {
        return Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "like failed"));
    }
    if b.likes.insert((me, id)) {
        adjust_likes(&mut b, id, 1);
    }
    ok(json!({ "message": "liked" }))
}

async fn unlike(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    if b.fail_likes {
        return Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "unlike failed"));
    }
    if b.likes.remove(&(me, id)) {
        adjust_likes(&mut b, id, -1);
    }
    ok(json!({ "message": "unliked" }))
}

async fn comments(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    viewer(&headers)?;
    let b = s.lock().unwrap();
    list(
        b.comments
            .iter()
            .filter(|c| c["post_id"] == id)
            .cloned()
            .collect(),
    )
}

async fn add_comment(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let comment = json!({
        "id": b.next_id(),
        "post_id": id,
        "user_id": me,
        "content": body["content"],
        "created_at": CREATED_AT,
    });
    b.comments.push(comment.clone());
    Ok((StatusCode::CREATED, Json(comment)).into_response())
}

async fn create_report(State(s): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let id = b.next_id();
    b.reports.push(json!({
        "id": id,
        "reporter_id": me,
        "target_type": body["target_type"],
        "target_id": body["target_id"],
        "reason": body["reason"],
        "status": "pending",
        "created_at": CREATED_AT,
    }));
    Ok((StatusCode::CREATED, Json(json!({ "message": "report submitted" }))).into_response())
}

async fn friends(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    let found = b
        .friendships
        .iter()
        .filter(|(a, _)| *a == me)
        .filter_map(|(_, friend)| b.user(*friend))
        .collect();
    list(found)
}

async fn pending(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    let found = b
        .requests
        .iter()
        .filter(|r| r["addressee_id"] == me && r["status"] == "pending")
        .map(|r| {
            let mut r = r.clone();
            r["requester"] = b
                .user(r["requester_id"].as_i64().unwrap_or_default())
                .unwrap_or(Value::Null);
            r
        })
        .collect();
    list(found)
}

async fn send_request(State(s): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let me = viewer(&headers)?;
    let addressee = body["addressee_id"].as_i64().unwrap_or_default();
    if addressee == me {
        return Err(fail(StatusCode::BAD_REQUEST, "cannot befriend yourself"));
    }
    let mut b = s.lock().unwrap();
    let id = b.next_id();
    b.add_request(id, me, addressee);
    Ok((StatusCode::CREATED, Json(json!({ "message": "request sent" }))).into_response())
}

fn answer_request(s: &Shared, me: i64, id: i64, status: &str) -> Result<(i64, i64), Response> {
    let mut b = s.lock().unwrap();
    let request = b
        .requests
        .iter_mut()
        .find(|r| r["id"] == id && r["addressee_id"] == me && r["status"] == "pending")
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "request not found"))?;
    request["status"] = json!(status);
    let requester = request["requester_id"].as_i64().unwrap_or_default();
    Ok((requester, me))
}

async fn accept(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let (requester, addressee) = answer_request(&s, me, id, "accepted")?;
    let mut b = s.lock().unwrap();
    b.friendships.push((requester, addressee));
    b.friendships.push((addressee, requester));
    ok(json!({ "message": "accepted" }))
}

async fn block(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    answer_request(&s, me, id, "blocked")?;
    ok(json!({ "message": "blocked" }))
}

async fn conversations(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    let found = b
        .conversations
        .iter()
        .filter(|c| c["members"].as_array().is_some_and(|m| m.contains(&json!(me))))
        .map(|c| {
            let other = c["members"]
                .as_array()
                .and_then(|m| m.iter().find(|id| **id != me))
                .and_then(Value::as_i64)
                .unwrap_or_default();
            let last = b
                .messages
                .iter()
                .filter(|m| m["conversation_id"] == c["id"])
                .last()
                .cloned();
            json!({
                "id": c["id"],
                "participant": b.user(other),
                "last_message": last,
                "created_at": CREATED_AT,
            })
        })
        .collect();
    list(found)
}

async fn create_conversation(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let me = viewer(&headers)?;
    let other = body["participant_id"].as_i64().unwrap_or_default();
    let mut b = s.lock().unwrap();
    let existing = b
        .conversations
        .iter()
        .find(|c| {
            c["members"]
                .as_array()
                .is_some_and(|m| m.contains(&json!(me)) && m.contains(&json!(other)))
        })
        .map(|c| c["id"].clone());
    let id = match existing {
        Some(id) => id,
        None => {
            let id = json!(b.next_id());
            b.conversations
                .push(json!({ "id": id, "members": [me, other] }));
            id
        }
    };
    ok(json!({
        "id": id,
        "participant": b.user(other),
        "created_at": CREATED_AT,
    }))
}

async fn messages(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    viewer(&headers)?;
    let b = s.lock().unwrap();
    list(
        b.messages
            .iter()
            .filter(|m| m["conversation_id"] == id)
            .cloned()
            .collect(),
    )
}

async fn send_message(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let message = json!({
        "id": b.next_id(),
        "conversation_id": id,
        "user_id": me,
        "body": body["body"],
        "created_at": CREATED_AT,
    });
    b.messages.push(message.clone());
    Ok((StatusCode::CREATED, Json(message)).into_response())
}

fn group_view(b: &Backend, group: &Value, viewer: i64) -> Value {
    let mut view = group.clone();
    let id = group["id"].as_i64().unwrap_or_default();
    view["is_member"] = json!(b.members.contains(&(viewer, id)));
    view
}

async fn groups(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    list(b.groups.iter().map(|g| group_view(&b, g, me)).collect())
}

async fn create_group(State(s): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let me = viewer(&headers)?;
    let title = body["title"].as_str().unwrap_or_default().to_string();
    if title.trim().is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "title is required"));
    }
    let mut b = s.lock().unwrap();
    let id = b.next_id();
    b.add_group(id, me, &title, 1);
    if let Some(group) = b.groups.last_mut() {
        group["description"] = body["description"].clone();
    }
    b.members.insert((me, id));
    let view = group_view(&b, b.groups.last().unwrap_or(&Value::Null), me);
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

async fn get_group(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    b.groups
        .iter()
        .find(|g| g["id"] == id)
        .map(|g| Json(group_view(&b, g, me)).into_response())
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "group not found"))
}

async fn join_group(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    if !b.members.insert((me, id)) {
        return Err(fail(StatusCode::CONFLICT, "already a member"));
    }
    ok(json!({ "message": "joined" }))
}

async fn leave_group(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    b.members.remove(&(me, id));
    ok(json!({ "message": "left" }))
}

async fn group_posts(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    viewer(&headers)?;
    let b = s.lock().unwrap();
    list(
        b.group_posts
            .iter()
            .filter(|p| p["group_id"] == id)
            .cloned()
            .collect(),
    )
}

async fn create_group_post(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    let post = json!({
        "id": b.next_id(),
        "group_id": id,
        "user_id": me,
        "content": body["content"],
        "created_at": CREATED_AT,
        "author": b.user(me),
    });
    b.group_posts.push(post.clone());
    Ok((StatusCode::CREATED, Json(post)).into_response())
}

async fn notifications(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    list(
        b.notifications
            .iter()
            .filter(|n| n["user_id"] == me)
            .cloned()
            .collect(),
    )
}

async fn unread_count(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let b = s.lock().unwrap();
    let count = b
        .notifications
        .iter()
        .filter(|n| n["user_id"] == me && n["read"] == false)
        .count();
    ok(json!({ "count": count }))
}

async fn mark_read(State(s): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    if let Some(n) = b
        .notifications
        .iter_mut()
        .find(|n| n["id"] == id && n["user_id"] == me)
    {
        n["read"] = json!(true);
    }
    ok(json!({ "message": "marked read" }))
}

async fn clear_notifications(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    let me = viewer(&headers)?;
    let mut b = s.lock().unwrap();
    b.notifications.retain(|n| n["user_id"] != me);
    ok(json!({ "message": "cleared" }))
}

fn require_admin(s: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let me = viewer(headers)?;
    let is_admin = s
        .lock()
        .unwrap()
        .user(me)
        .is_some_and(|u| u["is_admin"] == true);
    if is_admin {
        Ok(())
    } else {
        Err(fail(StatusCode::FORBIDDEN, "admin access required"))
    }
}

/// Returns every report whatever the `status` query says.
async fn reports(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    require_admin(&s, &headers)?;
    let b = s.lock().unwrap();
    list(b.reports.clone())
}

async fn review_report(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    require_admin(&s, &headers)?;
    let mut b = s.lock().unwrap();
    let report = b
        .reports
        .iter_mut()
        .find(|r| r["id"] == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "report not found"))?;
    report["status"] = body["status"].clone();
    ok(json!({ "message": "report updated" }))
}

async fn delete_content(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path((kind, id)): Path<(String, i64)>,
) -> Reply {
    require_admin(&s, &headers)?;
    let mut b = s.lock().unwrap();
    match kind.as_str() {
        "post" => b.posts.retain(|p| p["id"] != id),
        "comment" => b.comments.retain(|c| c["id"] != id),
        _ => return Err(fail(StatusCode::BAD_REQUEST, "unsupported content type")),
    }
    for report in b.reports.iter_mut() {
        if report["target_type"] == kind.as_str() && report["target_id"] == id {
            report["status"] = json!("resolved");
        }
    }
    ok(json!({ "message": "content deleted" }))
}
