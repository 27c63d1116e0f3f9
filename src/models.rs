use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i64;
pub type PostId = i64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
    pub bio: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub media_url: String,
    pub like_count: i64,
    pub liked: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: i64,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub author: Option<User>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    #[default]
    Pending,
    Accepted,
    Blocked,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendRequest {
    pub id: i64,
    pub requester_id: UserId,
    pub addressee_id: UserId,
    pub status: FriendshipStatus,
    pub requester: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    pub id: i64,
    pub participant: Option<User>,
    pub last_message: Option<Message>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub user_id: UserId,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub id: i64,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub member_count: i64,
    pub is_member: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupPost {
    pub id: i64,
    pub group_id: i64,
    pub user_id: UserId,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub author: Option<User>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    FriendRequest,
    Like,
    Comment,
    #[default]
    Message,
    GroupInvite,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub target_id: i64,
    pub message: String,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportTarget {
    #[default]
    Post,
    Comment,
    User,
}

impl ReportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportTarget::Post => "post",
            ReportTarget::Comment => "comment",
            ReportTarget::User => "user",
        }
    }

    /// Only posts and comments can be removed from the moderation console.
    pub fn is_deletable(&self) -> bool {
        matches!(self, ReportTarget::Post | ReportTarget::Comment)
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(ReportTarget::Post),
            "comment" => Ok(ReportTarget::Comment),
            "user" => Ok(ReportTarget::User),
            other => Err(format!("unknown report target: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Reviewed,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::Reviewed,
        ReportStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "reviewed" => Ok(ReportStatus::Reviewed),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!("unknown report status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub id: i64,
    pub reporter_id: UserId,
    pub target_type: ReportTarget,
    pub target_id: i64,
    pub reason: String,
    pub status: ReportStatus,
    pub reporter: Option<User>,
    pub created_at: Option<DateTime<Utc>>,
}

// Request and response bodies

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub bio: String,
    pub avatar_url: String,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPost {
    pub content: String,
    pub media_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentBody {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendRequestBody {
    pub addressee_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewConversation {
    pub participant_id: UserId,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewGroup {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReport {
    pub target_type: ReportTarget,
    pub target_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    pub status: ReportStatus,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UnreadCount {
    #[serde(default)]
    pub count: i64,
}
