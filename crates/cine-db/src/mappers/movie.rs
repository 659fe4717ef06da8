//! Movie catalog model -> entity mappers

use cine_core::entities::{Movie, MovieStats, Ott};
use cine_core::value_objects::Snowflake;

use crate::models::{MovieModel, MovieStatsModel, OttModel};

impl From<OttModel> for Ott {
    fn from(model: OttModel) -> Self {
        Ott {
            id: Snowflake::new(model.id),
            name: model.name,
            logo_url: model.logo_url,
            link_url: model.link_url,
        }
    }
}

impl MovieModel {
    /// Attach the provider ids loaded from movie_otts
    pub fn into_entity(self, ott_ids: Vec<Snowflake>) -> Movie {
        Movie {
            id: Snowflake::new(self.id),
            title: self.title,
            description: self.description,
            release_date: self.release_date,
            thumbnail_url: self.thumbnail_url,
            ott_ids,
            created_at: self.created_at,
        }
    }
}

impl MovieStatsModel {
    pub fn into_pair(self) -> (Snowflake, MovieStats) {
        (
            Snowflake::new(self.movie_id),
            MovieStats::new(self.average_rating, self.review_count),
        )
    }
}
