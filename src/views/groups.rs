use std::collections::{HashMap, HashSet};

use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::models::{Group, GroupPost, NewGroup};
use crate::views::{logged, require_text};

#[derive(Debug)]
pub struct GroupsView {
    pub groups: Vec<Group>,
    pub loading: bool,
    pub show_create: bool,
    pub new_group: NewGroup,
    /// Groups whose posts panel is open.
    pub expanded: HashSet<i64>,
    /// Posts per group, fetched the first time its panel opens.
    pub posts: HashMap<i64, Vec<GroupPost>>,
    pub drafts: HashMap<i64, String>,
}

impl Default for GroupsView {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupsView {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            loading: true,
            show_create: false,
            new_group: NewGroup::default(),
            expanded: HashSet::new(),
            posts: HashMap::new(),
            drafts: HashMap::new(),
        }
    }

    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        let result = logged("load groups", app.api.get_groups().await);
        self.loading = false;
        self.groups = result?;
        Ok(())
    }

    pub fn group(&self, id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: i64) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Create a group from `new_group`. A blank title never reaches the server.
    pub async fn create_group(&mut self, app: &App) -> ClientResult<Group> {
        if self.new_group.title.trim().is_empty() {
            return Err(ClientError::Invalid("Group name is required".to_string()));
        }

        let group = logged("create group", app.api.create_group(&self.new_group).await)?;
        self.groups.insert(0, group.clone());
        self.new_group = NewGroup::default();
        self.show_create = false;
        Ok(group)
    }

    pub async fn join(&mut self, app: &App, id: i64) -> ClientResult<()> {
        logged("join group", app.api.join_group(id).await)?;
        if let Some(group) = self.group_mut(id) {
            group.is_member = true;
            group.member_count += 1;
        }
        Ok(())
    }

    pub async fn leave(&mut self, app: &App, id: i64) -> ClientResult<()> {
        logged("leave group", app.api.leave_group(id).await)?;
        if let Some(group) = self.group_mut(id) {
            group.is_member = false;
            group.member_count = (group.member_count - 1).max(0);
        }
        self.expanded.remove(&id);
        Ok(())
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    /// Open or close a group's posts panel, fetching posts on first open.
    /// A failed fetch leaves an empty list rather than an error.
    pub async fn toggle_posts(&mut self, app: &App, id: i64) {
        if self.expanded.remove(&id) {
            return;
        }
        self.expanded.insert(id);

        if !self.posts.contains_key(&id) {
            let posts = logged("load group posts", app.api.get_group_posts(id).await)
                .unwrap_or_default();
            self.posts.insert(id, posts);
        }
    }

    pub fn set_draft(&mut self, id: i64, content: impl Into<String>) {
        self.drafts.insert(id, content.into());
    }

    pub async fn create_post(&mut self, app: &App, id: i64) -> ClientResult<GroupPost> {
        let content = self
            .drafts
            .get(&id)
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        require_text(&content, "Post")?;

        let post = logged(
            "create group post",
            app.api.create_group_post(id, &content).await,
        )?;
        self.posts.entry(id).or_default().insert(0, post.clone());
        self.drafts.insert(id, String::new());
        self.expanded.insert(id);
        Ok(post)
    }
}
