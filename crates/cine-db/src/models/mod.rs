//! Database models - SQLx-compatible structs for PostgreSQL tables

mod aggregate;
mod board;
mod comment;
mod movie;
mod review;
mod user;

pub use aggregate::{CountModel, TallyModel, VoteModel};
pub use board::{CategoryModel, PostAttachmentModel, PostModel};
pub use comment::{CommentModel, CommentWithLikesModel};
pub use movie::{MovieModel, MovieOttModel, MovieStatsModel, OttModel};
pub use review::{ReviewHistoryModel, ReviewImageModel, ReviewModel};
pub use user::UserModel;
