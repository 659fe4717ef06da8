//! Board service
//!
//! Categories and posts of the community board. View counting is a separate
//! explicit call; reading a post never bumps it.

use std::collections::HashMap;

use cine_core::entities::{Post, PostAttachment};
use cine_core::{
    CommentThread, DomainError, OwnedResource, Page, PageRequest, PostFilter, ReactionKind,
    Snowflake,
};
use tracing::{info, instrument};

use crate::dto::{
    CategoryResponse, CreatePostRequest, PostListQuery, PostResponse, PostWithDetails,
    UpdatePostRequest, ViewCountResponse,
};

use super::context::ServiceContext;
use super::derived::{authors, comment_counts, ReactionLookup};
use super::error::{ServiceError, ServiceResult};

/// Trim a required text field, rejecting blanks
fn required(field: &'static str, value: &str) -> ServiceResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::field(field, format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

/// Board service
pub struct BoardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn ensure_category(&self, category_id: Snowflake) -> ServiceResult<()> {
        match self.ctx.category_repo().find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::field(
                "category",
                format!("unknown category: {category_id}"),
            )),
        }
    }

    /// Attach counts, votes, attachments and names to a batch of posts
    async fn render(
        &self,
        posts: Vec<Post>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Snowflake> = posts.iter().map(|p| p.id).collect();

        let reactions = ReactionLookup::load(self.ctx, ReactionKind::Post, &ids, viewer).await?;
        let comments = comment_counts(self.ctx, CommentThread::Post, &ids).await?;
        let directory = authors(self.ctx, posts.iter().map(|p| p.author_id)).await?;

        let mut attachments: HashMap<Snowflake, Vec<PostAttachment>> = HashMap::new();
        for attachment in self.ctx.post_repo().attachments_for(&ids).await? {
            attachments.entry(attachment.post_id).or_default().push(attachment);
        }

        let mut category_ids: Vec<Snowflake> = posts.iter().map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();
        let categories: HashMap<Snowflake, String> = self
            .ctx
            .category_repo()
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let id = post.id;
                PostResponse::from(PostWithDetails {
                    category_name: categories.get(&post.category_id).cloned(),
                    author: directory.get(post.author_id),
                    tally: reactions.tally(id),
                    my_vote: reactions.state(id),
                    comment_count: comments.get(&id).copied().unwrap_or(0),
                    attachments: attachments.remove(&id).unwrap_or_default(),
                    post,
                })
            })
            .collect())
    }

    async fn render_one(&self, post: Post, viewer: Option<Snowflake>) -> ServiceResult<PostResponse> {
        self.render(vec![post], viewer)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal("post vanished while rendering"))
    }

    /// All board categories
    #[instrument(skip(self))]
    pub async fn categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self.ctx.category_repo().list().await?;
        Ok(categories.iter().map(CategoryResponse::from).collect())
    }

    /// Paged post list with category, hot and search filters
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        query: PostListQuery,
        page: PageRequest,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Page<PostResponse>> {
        let filter = PostFilter::from_query(
            query.category.as_deref(),
            query.search_type.as_deref(),
            query.search.as_deref(),
            self.ctx.community().hot_like_threshold,
        );

        let Page {
            count,
            page,
            page_size,
            has_next,
            results,
        } = self.ctx.post_repo().list(&filter, page).await?;
        let results = self.render(results, viewer).await?;

        Ok(Page {
            count,
            page,
            page_size,
            has_next,
            results,
        })
    }

    /// One post; the view counter is left alone
    #[instrument(skip(self))]
    pub async fn get_post(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostResponse> {
        let post = self.load(post_id).await?;
        self.render_one(post, viewer).await
    }

    /// Create a post with its attachments
    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let title = required("title", &request.title)?;
        let content = required("content", &request.content)?;
        self.ensure_category(request.category).await?;

        let post = Post::new(
            self.ctx.generate_id(),
            request.category,
            author_id,
            title,
            content,
        );

        let mut attachments = Vec::with_capacity(request.attachments.len());
        for input in request.attachments {
            attachments.push(PostAttachment::new(
                self.ctx.generate_id(),
                post.id,
                required("file_url", &input.file_url)?,
                required("file_name", &input.file_name)?,
            ));
        }

        self.ctx.post_repo().create(&post, &attachments).await?;

        info!(post_id = %post.id, author_id = %author_id, attachments = attachments.len(), "Post created");

        self.render_one(post, Some(author_id)).await
    }

    /// Edit title, content or category (author only)
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        actor_id: Snowflake,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.load(post_id).await?;
        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::Post(&post).ensure_can_modify(&actor)?;

        let title = request.title.as_deref().map(|t| required("title", t)).transpose()?;
        let content = request
            .content
            .as_deref()
            .map(|c| required("content", c))
            .transpose()?;
        if let Some(category_id) = request.category {
            self.ensure_category(category_id).await?;
        }

        post.edit(title, content, request.category);
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, "Post updated");

        self.render_one(post, Some(actor_id)).await
    }

    /// Delete a post (author or staff)
    #[instrument(skip(self))]
    pub async fn delete_post(&self, actor_id: Snowflake, post_id: Snowflake) -> ServiceResult<()> {
        let post = self.load(post_id).await?;
        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::Post(&post).ensure_can_delete(&actor)?;

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, actor_id = %actor_id, "Post deleted");
        Ok(())
    }

    /// Bump the view counter by one
    #[instrument(skip(self))]
    pub async fn record_view(&self, post_id: Snowflake) -> ServiceResult<ViewCountResponse> {
        let view_count = self
            .ctx
            .post_repo()
            .increment_views(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        Ok(ViewCountResponse {
            id: post_id,
            view_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::AttachmentInput;
    use crate::services::testing;
    use cine_core::{ReactionTarget, Vote};

    fn create_request(category: Snowflake, title: &str) -> CreatePostRequest {
        CreatePostRequest {
            category,
            title: title.to_string(),
            content: "body".to_string(),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("title", "  hi ").unwrap(), "hi");
        let err = required("title", "   ").unwrap_err();
        assert_eq!(err.field_error().map(|(f, _)| f), Some("title"));
    }

    #[tokio::test]
    async fn test_create_post_with_attachment_thumbnail() {
        let ctx = testing::context();
        let author = testing::user(&ctx, "critic", false).await;
        let category = testing::category(&ctx, "free").await;

        let mut request = create_request(category.id, "Poster drop");
        request.attachments.push(AttachmentInput {
            file_url: "/media/notes.txt".into(),
            file_name: "notes.txt".into(),
        });
        request.attachments.push(AttachmentInput {
            file_url: "/media/poster.PNG".into(),
            file_name: "poster.PNG".into(),
        });

        let post = BoardService::new(&ctx)
            .create_post(author.id, request)
            .await
            .unwrap();

        assert_eq!(post.category_name.as_deref(), Some("free"));
        assert_eq!(post.attachments.len(), 2);
        assert_eq!(post.thumbnail_url.as_deref(), Some("/media/poster.PNG"));
        assert_eq!(post.view_count, 0);
        assert_eq!(post.my_like, None);
    }

    #[tokio::test]
    async fn test_create_post_unknown_category() {
        let ctx = testing::context();
        let author = testing::user(&ctx, "critic", false).await;
        let err = BoardService::new(&ctx)
            .create_post(author.id, create_request(Snowflake::new(404), "title"))
            .await
            .unwrap_err();
        assert_eq!(err.field_error().map(|(f, _)| f), Some("category"));
    }

    #[tokio::test]
    async fn test_get_does_not_count_views() {
        let ctx = testing::context();
        let author = testing::user(&ctx, "critic", false).await;
        let post = testing::post(&ctx, author.id, "hello").await;
        let service = BoardService::new(&ctx);

        service.get_post(post.id, None).await.unwrap();
        assert_eq!(service.get_post(post.id, None).await.unwrap().view_count, 0);

        assert_eq!(service.record_view(post.id).await.unwrap().view_count, 1);
        assert_eq!(service.record_view(post.id).await.unwrap().view_count, 2);
        assert_eq!(service.get_post(post.id, None).await.unwrap().view_count, 2);

        let err = service.record_view(Snowflake::new(404)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_viewer_sees_own_vote() {
        let ctx = testing::context();
        let author = testing::user(&ctx, "critic", false).await;
        let voter = testing::user(&ctx, "voter", false).await;
        let post = testing::post(&ctx, author.id, "hello").await;
        testing::react(&ctx, ReactionTarget::post(post.id), voter.id, Vote::Dislike).await;

        let service = BoardService::new(&ctx);
        let seen = service.get_post(post.id, Some(voter.id)).await.unwrap();
        assert_eq!(seen.my_like, Some(false));
        assert_eq!(seen.dislike_count, 1);

        let anonymous = service.get_post(post.id, None).await.unwrap();
        assert_eq!(anonymous.my_like, None);
    }

    #[tokio::test]
    async fn test_only_author_edits_and_staff_deletes() {
        let ctx = testing::context();
        let author = testing::user(&ctx, "critic", false).await;
        let stranger = testing::user(&ctx, "stranger", false).await;
        let staff = testing::user(&ctx, "moderator", true).await;
        let post = testing::post(&ctx, author.id, "hello").await;
        let service = BoardService::new(&ctx);

        let edit = UpdatePostRequest {
            title: Some("edited".into()),
            ..Default::default()
        };
        let err = service
            .update_post(stranger.id, post.id, edit.clone())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        let err = service
            .update_post(staff.id, post.id, edit.clone())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let updated = service.update_post(author.id, post.id, edit).await.unwrap();
        assert_eq!(updated.title, "edited");

        let err = service.delete_post(stranger.id, post.id).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
        service.delete_post(staff.id, post.id).await.unwrap();
        assert_eq!(service.get_post(post.id, None).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_list_hot_posts() {
        let ctx = testing::context();
        let author = testing::user(&ctx, "critic", false).await;
        let cold = testing::post(&ctx, author.id, "cold").await;
        let hot = testing::post(&ctx, author.id, "hot").await;
        for i in 0..10 {
            let voter = testing::user(&ctx, &format!("fan{i}"), false).await;
            testing::react(&ctx, ReactionTarget::post(hot.id), voter.id, Vote::Like).await;
        }

        let service = BoardService::new(&ctx);
        let all = service
            .list_posts(PostListQuery::default(), PageRequest::new(1, 10), None)
            .await
            .unwrap();
        assert_eq!(all.count, 2);
        assert_eq!(all.results[0].id, hot.id);
        assert_eq!(all.results[1].id, cold.id);

        let query = PostListQuery {
            category: Some("hot".into()),
            ..Default::default()
        };
        let hot_only = service
            .list_posts(query, PageRequest::new(1, 10), None)
            .await
            .unwrap();
        assert_eq!(hot_only.count, 1);
        assert_eq!(hot_only.results[0].like_count, 10);
        assert!(!hot_only.has_next);
    }
}
