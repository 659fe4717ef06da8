//! Review service
//!
//! Handles reviews, their edit history and attached images.

use std::collections::{HashMap, HashSet};

use cine_core::entities::{Review, ReviewImage, ReviewOrdering};
use cine_core::traits::{ReviewQuery, ReviewUpdate};
use cine_core::{
    CommentThread, DomainError, OwnedResource, Page, PageRequest, ReactionKind, Rating, Snowflake,
};
use tracing::{info, instrument};

use crate::dto::{
    AddReviewImageRequest, CreateReviewRequest, ReviewHistoryResponse, ReviewImageResponse,
    ReviewListQuery, ReviewResponse, ReviewWithDetails, UpdateReviewRequest,
};

use super::context::ServiceContext;
use super::derived::{authors, comment_counts, ReactionLookup};
use super::error::{ServiceError, ServiceResult};

/// Trim and drop blank image URLs
fn clean_urls(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect()
}

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, review_id: Snowflake) -> ServiceResult<Review> {
        self.ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| DomainError::ReviewNotFound(review_id).into())
    }

    fn new_images(&self, review_id: Snowflake, urls: Vec<String>) -> Vec<ReviewImage> {
        clean_urls(urls)
            .into_iter()
            .map(|url| ReviewImage::new(self.ctx.generate_id(), review_id, url))
            .collect()
    }

    /// Attach counts, votes, images and authors to a batch of reviews
    async fn render(
        &self,
        reviews: Vec<Review>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<ReviewResponse>> {
        let ids: Vec<Snowflake> = reviews.iter().map(|r| r.id).collect();

        let reactions = ReactionLookup::load(self.ctx, ReactionKind::Review, &ids, viewer).await?;
        let comments = comment_counts(self.ctx, CommentThread::Review, &ids).await?;
        let directory = authors(self.ctx, reviews.iter().map(|r| r.author_id)).await?;

        let (edited, images) = if ids.is_empty() {
            (HashSet::new(), HashMap::new())
        } else {
            let edited: HashSet<Snowflake> =
                self.ctx.review_repo().edited_ids(&ids).await?.into_iter().collect();
            let mut images: HashMap<Snowflake, Vec<ReviewImage>> = HashMap::new();
            for image in self.ctx.review_repo().images_for(&ids).await? {
                images.entry(image.review_id).or_default().push(image);
            }
            (edited, images)
        };

        Ok(reviews
            .into_iter()
            .map(|review| {
                let id = review.id;
                ReviewResponse::from(ReviewWithDetails {
                    author: directory.get(review.author_id),
                    tally: reactions.tally(id),
                    my_vote: reactions.state(id),
                    is_edited: edited.contains(&id),
                    images: images.get(&id).cloned().unwrap_or_default(),
                    comment_count: comments.get(&id).copied().unwrap_or(0),
                    review,
                })
            })
            .collect())
    }

    async fn render_one(
        &self,
        review: Review,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ReviewResponse> {
        self.render(vec![review], viewer)
            .await?
            .pop()
            .ok_or_else(|| ServiceError::internal("review vanished while rendering"))
    }

    /// Paged review list, optionally for one movie
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        query: ReviewListQuery,
        page: PageRequest,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Page<ReviewResponse>> {
        let ordering = match query.ordering.as_deref().map(str::trim) {
            None | Some("") => ReviewOrdering::default(),
            Some(raw) => ReviewOrdering::parse(raw).ok_or_else(|| {
                ServiceError::field("ordering", format!("unsupported ordering: {raw}"))
            })?,
        };

        let reviews = self
            .ctx
            .review_repo()
            .list(
                ReviewQuery {
                    movie_id: query.movie,
                    ordering,
                },
                page,
            )
            .await?;

        let Page {
            count,
            page,
            page_size,
            has_next,
            results,
        } = reviews;
        let results = self.render(results, viewer).await?;

        Ok(Page {
            count,
            page,
            page_size,
            has_next,
            results,
        })
    }

    /// One review
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        review_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ReviewResponse> {
        let review = self.load(review_id).await?;
        self.render_one(review, viewer).await
    }

    /// Create a review; one per (author, movie)
    #[instrument(skip(self, request), fields(movie_id = %request.movie_id))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let rating = Rating::new(request.rating).map_err(DomainError::from)?;

        if self
            .ctx
            .movie_repo()
            .find_by_id(request.movie_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::field("movie_id", "unknown movie"));
        }

        if self
            .ctx
            .review_repo()
            .exists_for(author_id, request.movie_id)
            .await?
        {
            return Err(DomainError::DuplicateReview.into());
        }

        let review = Review::new(
            self.ctx.generate_id(),
            request.movie_id,
            author_id,
            rating,
            request.comment.trim().to_string(),
            request.is_spoiler,
        );
        let images = self.new_images(review.id, request.image_urls);

        self.ctx.review_repo().create(&review, &images).await?;

        info!(review_id = %review.id, author_id = %author_id, "Review created");

        self.render_one(review, Some(author_id)).await
    }

    /// Edit a review; the previous rating and comment are kept in history
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor_id: Snowflake,
        review_id: Snowflake,
        request: UpdateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let rating = request
            .rating
            .map(Rating::new)
            .transpose()
            .map_err(DomainError::from)?;

        let mut review = self.load(review_id).await?;
        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::Review(&review).ensure_can_modify(&actor)?;

        if !request.delete_image_ids.is_empty() {
            let existing: HashSet<Snowflake> = self
                .ctx
                .review_repo()
                .images_for(&[review_id])
                .await?
                .into_iter()
                .map(|i| i.id)
                .collect();
            if let Some(stray) = request
                .delete_image_ids
                .iter()
                .find(|id| !existing.contains(id))
            {
                return Err(ServiceError::field(
                    "delete_image_ids",
                    format!("image {stray} does not belong to this review"),
                ));
            }
        }

        let new_images = self.new_images(review.id, request.image_urls);
        let history = review.edit(
            self.ctx.generate_id(),
            actor.id,
            rating,
            request.comment.map(|c| c.trim().to_string()),
            request.is_spoiler,
        );

        self.ctx
            .review_repo()
            .update(ReviewUpdate {
                review: &review,
                history: &history,
                new_images: &new_images,
                delete_image_ids: &request.delete_image_ids,
            })
            .await?;

        info!(review_id = %review.id, history_id = %history.id, "Review updated");

        self.render_one(review, Some(actor_id)).await
    }

    /// Delete a review (author or staff)
    #[instrument(skip(self))]
    pub async fn delete(&self, actor_id: Snowflake, review_id: Snowflake) -> ServiceResult<()> {
        let review = self.load(review_id).await?;
        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::Review(&review).ensure_can_delete(&actor)?;

        self.ctx.review_repo().delete(review_id).await?;

        info!(review_id = %review_id, actor_id = %actor_id, "Review deleted");
        Ok(())
    }

    /// Edit history, newest first
    #[instrument(skip(self))]
    pub async fn histories(&self, review_id: Snowflake) -> ServiceResult<Vec<ReviewHistoryResponse>> {
        self.load(review_id).await?;
        let histories = self.ctx.review_repo().histories(review_id).await?;
        Ok(histories.iter().map(ReviewHistoryResponse::from).collect())
    }

    /// Attach an image URL (author only)
    #[instrument(skip(self, request))]
    pub async fn add_image(
        &self,
        actor_id: Snowflake,
        review_id: Snowflake,
        request: AddReviewImageRequest,
    ) -> ServiceResult<ReviewImageResponse> {
        let url = request.image_url.trim().to_string();
        if url.is_empty() {
            return Err(ServiceError::field("image_url", "image_url is required"));
        }

        let review = self.load(review_id).await?;
        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::Review(&review).ensure_can_modify(&actor)?;

        let image = ReviewImage::new(self.ctx.generate_id(), review.id, url);
        self.ctx.review_repo().add_image(&image).await?;

        info!(review_id = %review_id, image_id = %image.id, "Review image added");
        Ok(ReviewImageResponse::from(&image))
    }

    /// Remove an image (review author or staff)
    #[instrument(skip(self))]
    pub async fn delete_image(
        &self,
        actor_id: Snowflake,
        review_id: Snowflake,
        image_id: Snowflake,
    ) -> ServiceResult<()> {
        let review = self.load(review_id).await?;
        let image = self
            .ctx
            .review_repo()
            .find_image(image_id)
            .await?
            .filter(|i| i.review_id == review.id)
            .ok_or(DomainError::ReviewImageNotFound(image_id))?;

        let actor = self.ctx.actor(actor_id).await?;
        OwnedResource::ReviewImage {
            image: &image,
            review: &review,
        }
        .ensure_can_delete(&actor)?;

        self.ctx.review_repo().delete_image(image_id).await?;

        info!(review_id = %review_id, image_id = %image_id, "Review image deleted");
        Ok(())
    }
}
