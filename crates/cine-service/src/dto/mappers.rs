//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Views with derived fields are assembled from the helper structs below,
//! which the services fill per request.

use std::collections::HashMap;

use cine_core::entities::{
    Category, Comment, Movie, MovieStats, Ott, Post, PostAttachment, ReactionTally, Review,
    ReviewHistory, ReviewImage, User, Vote, VoteState,
};
use cine_core::{resolve_thumbnail, Snowflake};

use super::responses::{
    AttachmentResponse, AuthorResponse, CategoryResponse, CommentResponse, CurrentUserResponse,
    MovieResponse, OttResponse, PostResponse, ProfileResponse, ReviewHistoryResponse,
    ReviewImageResponse, ReviewResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            is_staff: user.is_staff,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl ProfileResponse {
    pub fn new(user: &User, subscriptions: &[Ott]) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            is_staff: user.is_staff,
            subscribed_ott: subscriptions.iter().map(OttResponse::from).collect(),
        }
    }
}

/// Usernames of the authors referenced by one response
#[derive(Debug, Default)]
pub struct AuthorDirectory {
    names: HashMap<Snowflake, String>,
}

impl AuthorDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            names: users.into_iter().map(|u| (u.id, u.username)).collect(),
        }
    }

    /// Author reference; an account deleted mid-request renders with an empty name
    pub fn get(&self, id: Snowflake) -> AuthorResponse {
        AuthorResponse {
            id,
            username: self.names.get(&id).cloned().unwrap_or_default(),
        }
    }
}

// ============================================================================
// Catalog Mappers
// ============================================================================

impl From<&Ott> for OttResponse {
    fn from(ott: &Ott) -> Self {
        Self {
            id: ott.id,
            name: ott.name.clone(),
            logo_url: ott.logo_url.clone(),
            link_url: ott.link_url.clone(),
        }
    }
}

/// Movie with its review aggregates
pub struct MovieWithStats {
    pub movie: Movie,
    pub stats: MovieStats,
}

impl From<MovieWithStats> for MovieResponse {
    fn from(mws: MovieWithStats) -> Self {
        let MovieWithStats { movie, stats } = mws;
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_date: movie.release_date,
            thumbnail_url: movie.thumbnail_url,
            ott_services: movie.ott_ids,
            average_rating: stats.average_rating,
            review_count: stats.review_count,
        }
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&ReviewImage> for ReviewImageResponse {
    fn from(image: &ReviewImage) -> Self {
        Self {
            id: image.id,
            image_url: image.image_url.clone(),
            created_at: image.created_at,
        }
    }
}

impl From<&ReviewHistory> for ReviewHistoryResponse {
    fn from(history: &ReviewHistory) -> Self {
        Self {
            id: history.id,
            review_id: history.review_id,
            editor_id: history.editor_id,
            previous_rating: history.previous_rating,
            previous_comment: history.previous_comment.clone(),
            edited_at: history.edited_at,
        }
    }
}

/// Review plus everything derived for one viewer
pub struct ReviewWithDetails {
    pub review: Review,
    pub author: AuthorResponse,
    pub tally: ReactionTally,
    pub my_vote: VoteState,
    pub is_edited: bool,
    pub images: Vec<ReviewImage>,
    pub comment_count: i64,
}

impl From<ReviewWithDetails> for ReviewResponse {
    fn from(details: ReviewWithDetails) -> Self {
        let review = details.review;
        Self {
            id: review.id,
            movie_id: review.movie_id,
            author: details.author,
            rating: review.rating,
            comment: review.comment,
            is_spoiler: review.is_spoiler,
            created_at: review.created_at,
            updated_at: review.updated_at,
            like_count: details.tally.like_count,
            dislike_count: details.tally.dislike_count,
            my_vote: details.my_vote.score(),
            is_edited: details.is_edited,
            images: details.images.iter().map(ReviewImageResponse::from).collect(),
            comment_count: details.comment_count,
        }
    }
}

// ============================================================================
// Board Mappers
// ============================================================================

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
        }
    }
}

impl From<&PostAttachment> for AttachmentResponse {
    fn from(attachment: &PostAttachment) -> Self {
        Self {
            id: attachment.id,
            file_url: attachment.file_url.clone(),
            file_name: attachment.file_name.clone(),
        }
    }
}

/// Post plus everything derived for one viewer
pub struct PostWithDetails {
    pub post: Post,
    pub category_name: Option<String>,
    pub author: AuthorResponse,
    pub tally: ReactionTally,
    pub my_vote: VoteState,
    pub comment_count: i64,
    pub attachments: Vec<PostAttachment>,
}

impl From<PostWithDetails> for PostResponse {
    fn from(details: PostWithDetails) -> Self {
        let thumbnail_url = resolve_thumbnail(&details.attachments, &details.post.content);
        let post = details.post;
        Self {
            id: post.id,
            category: post.category_id,
            category_name: details.category_name,
            title: post.title,
            content: post.content,
            author: details.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
            view_count: post.view_count,
            like_count: details.tally.like_count,
            dislike_count: details.tally.dislike_count,
            my_like: details.my_vote.vote().map(Vote::is_like),
            comment_count: details.comment_count,
            thumbnail_url,
            attachments: details.attachments.iter().map(AttachmentResponse::from).collect(),
        }
    }
}

/// Comment plus everything derived for one viewer
pub struct CommentWithDetails {
    pub comment: Comment,
    pub author: AuthorResponse,
    pub tally: ReactionTally,
    pub my_vote: VoteState,
}

impl From<CommentWithDetails> for CommentResponse {
    fn from(details: CommentWithDetails) -> Self {
        let comment = details.comment;
        Self {
            id: comment.id,
            parent_id: comment.parent_id,
            author: details.author,
            content: comment.content,
            created_at: comment.created_at,
            like_count: details.tally.like_count,
            dislike_count: details.tally.dislike_count,
            my_like: details.my_vote.vote().map(Vote::is_like),
        }
    }
}
