//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{RatingError, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("OTT provider not found: {0}")]
    OttNotFound(Snowflake),

    #[error("Movie not found: {0}")]
    MovieNotFound(Snowflake),

    #[error("Review not found: {0}")]
    ReviewNotFound(Snowflake),

    #[error("Review image not found: {0}")]
    ReviewImageNotFound(Snowflake),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("You have already reviewed this movie")]
    DuplicateReview,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the author may change this {0}")]
    NotOwner(&'static str),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Reaction already exists")]
    ReactionAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a field-level validation failure
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::OttNotFound(_) => "UNKNOWN_OTT",
            Self::MovieNotFound(_) => "UNKNOWN_MOVIE",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::ReviewImageNotFound(_) => "UNKNOWN_REVIEW_IMAGE",
            Self::CategoryNotFound(_) => "UNKNOWN_CATEGORY",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) | Self::InvalidField { .. } => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::DuplicateReview => "DUPLICATE_REVIEW",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotOwner(_) => "NOT_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::ReactionAlreadyExists => "REACTION_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Field name and message for errors tied to one input field
    pub fn field_error(&self) -> Option<(&'static str, String)> {
        match self {
            Self::InvalidField { field, message } => Some((*field, message.clone())),
            Self::InvalidEmail => Some(("email", self.to_string())),
            Self::InvalidUsername(msg) => Some(("username", msg.clone())),
            Self::WeakPassword(msg) => Some(("password", msg.clone())),
            Self::InvalidRating(err) => Some(("rating", err.to_string())),
            Self::DuplicateReview => Some(("movie_id", self.to_string())),
            Self::ContentTooLong { .. } => Some(("content", self.to_string())),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::OttNotFound(_)
                | Self::MovieNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::ReviewImageNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidField { .. }
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::InvalidRating(_)
                | Self::DuplicateReview
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotOwner(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::UsernameAlreadyExists | Self::ReactionAlreadyExists
        )
    }
}
