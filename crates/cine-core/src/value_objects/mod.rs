//! Value objects - immutable types that represent domain concepts

mod page;
mod rating;
mod snowflake;

pub use page::{Page, PageRequest};
pub use rating::{round_average, Rating, RatingError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
