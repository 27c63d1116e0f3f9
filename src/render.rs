//! Display strings shared by the screens.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Conversation, Group, Report, User};

pub fn display_name(user: Option<&User>) -> String {
    match user {
        Some(u) if !u.full_name.is_empty() => u.full_name.clone(),
        Some(u) if !u.username.is_empty() => u.username.clone(),
        _ => "User".to_string(),
    }
}

/// Avatar placeholder letter.
pub fn initial(user: Option<&User>) -> char {
    user.and_then(|u| u.username.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('U')
}

/// "Just now", "5m ago", "3h ago", "2d ago", or the date after a week.
pub fn relative_time(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return String::new();
    };
    let elapsed = now - at;
    if elapsed < Duration::minutes(1) {
        "Just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed < Duration::days(7) {
        format!("{}d ago", elapsed.num_days())
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}

pub fn clock_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

pub fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

pub fn conversation_preview(conversation: &Conversation) -> String {
    conversation
        .last_message
        .as_ref()
        .map(|m| m.body.clone())
        .filter(|body| !body.is_empty())
        .unwrap_or_else(|| "No messages".to_string())
}

pub fn group_description(group: &Group) -> &str {
    if group.description.is_empty() {
        "No description"
    } else {
        &group.description
    }
}

pub fn reporter_label(report: &Report) -> String {
    match report.reporter.as_ref() {
        Some(_) => display_name(report.reporter.as_ref()),
        None => format!("User #{}", report.reporter_id),
    }
}
