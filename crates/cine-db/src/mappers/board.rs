//! Board and comment model -> entity mappers

use cine_core::entities::{Category, Comment, CommentThread, CommentWithLikes, Post, PostAttachment};
use cine_core::value_objects::Snowflake;

use crate::models::{CategoryModel, CommentModel, CommentWithLikesModel, PostAttachmentModel, PostModel};

impl From<CategoryModel> for Category {
    fn from(model: CategoryModel) -> Self {
        Category {
            id: Snowflake::new(model.id),
            name: model.name,
            slug: model.slug,
            description: model.description,
        }
    }
}

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            category_id: Snowflake::new(model.category_id),
            author_id: Snowflake::new(model.author_id),
            title: model.title,
            content: model.content,
            view_count: model.view_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PostAttachmentModel> for PostAttachment {
    fn from(model: PostAttachmentModel) -> Self {
        PostAttachment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            file_url: model.file_url,
            file_name: model.file_name,
            created_at: model.created_at,
        }
    }
}

impl CommentModel {
    pub fn into_entity(self, thread: CommentThread) -> Comment {
        Comment {
            id: Snowflake::new(self.id),
            thread,
            parent_id: Snowflake::new(self.parent_id),
            author_id: Snowflake::new(self.author_id),
            content: self.content,
            created_at: self.created_at,
        }
    }
}

impl CommentWithLikesModel {
    pub fn into_entity(self, thread: CommentThread) -> CommentWithLikes {
        CommentWithLikes {
            comment: self.comment.into_entity(thread),
            like_count: self.like_count,
        }
    }
}
