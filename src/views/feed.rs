use crate::app::App;
use crate::error::{ClientError, ClientResult};
use crate::models::{NewPost, Post, PostId};
use crate::views::{logged, require_text, PostCard};

#[derive(Debug)]
pub struct FeedView {
    pub cards: Vec<PostCard>,
    pub loading: bool,
    pub draft: String,
}

impl Default for FeedView {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedView {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            loading: true,
            draft: String::new(),
        }
    }

    pub async fn load(&mut self, app: &App) -> ClientResult<()> {
        let result = logged("load feed", app.api.get_feed().await);
        self.loading = false;
        self.cards = result?.into_iter().map(PostCard::new).collect();
        Ok(())
    }

    pub fn card(&self, id: PostId) -> Option<&PostCard> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn card_mut(&mut self, id: PostId) -> Option<&mut PostCard> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    fn card_or_missing(&mut self, id: PostId) -> ClientResult<&mut PostCard> {
        self.card_mut(id)
            .ok_or_else(|| ClientError::Invalid(format!("Post {} is not in the feed", id)))
    }

    /// Publish the draft. Blank drafts are rejected without a request.
    pub async fn submit_post(&mut self, app: &App) -> ClientResult<Post> {
        require_text(&self.draft, "Post")?;

        let new_post = NewPost {
            content: self.draft.clone(),
            media_url: String::new(),
        };
        let post = logged("create post", app.api.create_post(&new_post).await)?;
        self.prepend(post.clone());
        self.draft.clear();
        Ok(post)
    }

    pub fn prepend(&mut self, post: Post) {
        self.cards.insert(0, PostCard::new(post));
    }

    pub async fn edit_post(&mut self, app: &App, id: PostId, content: &str) -> ClientResult<()> {
        require_text(content, "Post")?;
        let media_url = self.card_or_missing(id)?.post.media_url.clone();

        let update = NewPost {
            content: content.to_string(),
            media_url,
        };
        logged("update post", app.api.update_post(id, &update).await)?;

        self.card_or_missing(id)?.post.content = update.content;
        Ok(())
    }

    pub async fn delete_post(&mut self, app: &App, id: PostId) -> ClientResult<()> {
        self.card_or_missing(id)?.delete(app).await?;
        self.cards.retain(|c| c.id() != id);
        Ok(())
    }
}
