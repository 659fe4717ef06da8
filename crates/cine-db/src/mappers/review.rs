//! Review model -> entity mappers

use cine_core::entities::{Review, ReviewHistory, ReviewImage};
use cine_core::error::DomainError;
use cine_core::value_objects::{Rating, Snowflake};

use crate::models::{ReviewHistoryModel, ReviewImageModel, ReviewModel};

impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        Ok(Review {
            id: Snowflake::new(model.id),
            movie_id: Snowflake::new(model.movie_id),
            author_id: Snowflake::new(model.author_id),
            rating: Rating::new(model.rating)?,
            comment: model.comment,
            is_spoiler: model.is_spoiler,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ReviewHistoryModel> for ReviewHistory {
    type Error = DomainError;

    fn try_from(model: ReviewHistoryModel) -> Result<Self, Self::Error> {
        Ok(ReviewHistory {
            id: Snowflake::new(model.id),
            review_id: Snowflake::new(model.review_id),
            editor_id: Snowflake::new(model.editor_id),
            previous_rating: Rating::new(model.previous_rating)?,
            previous_comment: model.previous_comment,
            edited_at: model.edited_at,
        })
    }
}

impl From<ReviewImageModel> for ReviewImage {
    fn from(model: ReviewImageModel) -> Self {
        ReviewImage {
            id: Snowflake::new(model.id),
            review_id: Snowflake::new(model.review_id),
            image_url: model.image_url,
            created_at: model.created_at,
        }
    }
}
