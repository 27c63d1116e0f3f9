use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::models::{Comment, Post, ReportTarget, User};
use crate::views::{logged, require_text};

/// A post as shown in the feed, with its own like and comment state.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub post: Post,
    pub liked: bool,
    pub like_count: i64,
    pub comments: Vec<Comment>,
    pub comments_loaded: bool,
    pub show_comments: bool,
    pub comment_draft: String,
    pub show_menu: bool,
}

impl PostCard {
    pub fn new(post: Post) -> Self {
        Self {
            liked: post.liked,
            like_count: post.like_count,
            post,
            comments: Vec::new(),
            comments_loaded: false,
            show_comments: false,
            comment_draft: String::new(),
            show_menu: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.post.id
    }

    pub fn is_owner(&self, user: Option<&User>) -> bool {
        let Some(user) = user else {
            return false;
        };
        user.id == self.post.user_id || self.post.author.as_ref().is_some_and(|a| a.id == user.id)
    }

    fn apply_like(&mut self, liked: bool) {
        self.liked = liked;
        self.like_count += if liked { 1 } else { -1 };
    }

    /// Flip the like state.
    ///
    /// The count moves by one immediately; the request follows, and if it
    /// fails this click is undone.
    pub async fn toggle_like(&mut self, app: &App) -> ClientResult<()> {
        let liking = !self.liked;
        self.apply_like(liking);

        let result = if liking {
            app.api.like_post(self.post.id).await
        } else {
            app.api.unlike_post(self.post.id).await
        };

        if result.is_err() {
            self.apply_like(!liking);
        }
        logged("toggle like", result)
    }

    /// Show or hide comments, fetching them the first time.
    pub async fn toggle_comments(&mut self, app: &App) -> ClientResult<()> {
        if self.comments_loaded {
            self.show_comments = !self.show_comments;
            return Ok(());
        }

        let comments = logged("load comments", app.api.get_comments(self.post.id).await)?;
        self.comments = comments;
        self.comments_loaded = true;
        self.show_comments = true;
        Ok(())
    }

    pub async fn add_comment(&mut self, app: &App) -> ClientResult<()> {
        require_text(&self.comment_draft, "Comment")?;

        let mut comment = logged(
            "add comment",
            app.api.add_comment(self.post.id, &self.comment_draft).await,
        )?;
        if comment.author.is_none() {
            comment.author = app.session.user();
        }
        self.comments.push(comment);
        self.comment_draft.clear();
        Ok(())
    }

    /// Delete the post. Only its author may do so.
    pub async fn delete(&self, app: &App) -> ClientResult<()> {
        if !self.is_owner(app.session.user().as_ref()) {
            return Err(ClientError::Invalid(
                "Only the author can delete this post".to_string(),
            ));
        }
        logged("delete post", app.api.delete_post(self.post.id).await)
    }

    /// Report this post, or one of its comments, with a reason.
    pub async fn report(
        &mut self,
        app: &App,
        target_type: ReportTarget,
        target_id: i64,
        reason: &str,
    ) -> ClientResult<()> {
        require_text(reason, "Reason")?;
        logged(
            "report content",
            app.api
                .create_report(target_type, target_id, reason.trim())
                .await,
        )?;
        self.show_menu = false;
        Ok(())
    }
}
