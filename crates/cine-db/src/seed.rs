//! Reference data loaded by the `cine-seed` binary
//!
//! Every insert is an upsert keyed on a natural key (provider name, category
//! slug, movie title), so running the seed twice leaves the data unchanged.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use cine_core::entities::{Category, Movie, Ott};
use cine_core::traits::{CategoryRepository, MovieRepository, OttRepository, RepoResult};
use cine_core::value_objects::{Snowflake, SnowflakeGenerator};

use crate::pool::PgPool;
use crate::repositories::{PgCategoryRepository, PgMovieRepository, PgOttRepository};

struct OttSeed {
    name: &'static str,
    logo_url: &'static str,
    link_url: &'static str,
}

struct CategorySeed {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct MovieSeed {
    title: &'static str,
    description: &'static str,
    released: (i32, u32, u32),
    thumbnail_url: &'static str,
    otts: &'static [&'static str],
}

const OTTS: &[OttSeed] = &[
    OttSeed {
        name: "Netflix",
        logo_url: "https://upload.wikimedia.org/wikipedia/commons/0/08/Netflix_2015_logo.svg",
        link_url: "https://www.netflix.com/kr",
    },
    OttSeed {
        name: "Tving",
        logo_url: "https://upload.wikimedia.org/wikipedia/commons/7/7e/TVING.png",
        link_url: "https://www.tving.com/",
    },
    OttSeed {
        name: "Wavve",
        logo_url: "https://www.wavve.com/img/wavve_logo.png",
        link_url: "https://www.wavve.com/",
    },
    OttSeed {
        name: "Coupang Play",
        logo_url: "https://www.coupangplay.com/images/logo.png",
        link_url: "https://www.coupangplay.com/",
    },
    OttSeed {
        name: "Disney+",
        logo_url: "https://upload.wikimedia.org/wikipedia/commons/3/3e/Disney%2B_logo.svg",
        link_url: "https://www.disneyplus.com/ko-kr",
    },
    OttSeed {
        name: "Watcha",
        logo_url: "https://watcha.com/images/logo.png",
        link_url: "https://watcha.com/",
    },
    OttSeed {
        name: "Apple TV+",
        logo_url: "https://upload.wikimedia.org/wikipedia/commons/2/28/Apple_TV_Plus_Logo.svg",
        link_url: "https://tv.apple.com/kr",
    },
];

const CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        name: "Free",
        slug: "free",
        description: "Anything goes",
    },
    CategorySeed {
        name: "Review Talk",
        slug: "review-talk",
        description: "Discuss reviews and ratings",
    },
    CategorySeed {
        name: "News",
        slug: "news",
        description: "Release and industry news",
    },
    CategorySeed {
        name: "Q&A",
        slug: "qna",
        description: "Ask the community",
    },
];

const MOVIES: &[MovieSeed] = &[
    MovieSeed {
        title: "Blade Runner 2049",
        description: "A young blade runner uncovers a long-buried secret.",
        released: (2017, 10, 6),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/aMpyrCizvSdc0UIMblJ1srVgAEF.jpg",
        otts: &["Netflix", "Wavve"],
    },
    MovieSeed {
        title: "Inside Out",
        description: "Emotions steer a girl through a move to a new city.",
        released: (2015, 6, 19),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/aAmfIX3TT40zUHGcCKrlOZRKC7u.jpg",
        otts: &["Disney+"],
    },
    MovieSeed {
        title: "La La Land",
        description: "A jazz pianist and an aspiring actress fall in love in Los Angeles.",
        released: (2016, 12, 7),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/Rz7uL91tKXQwshkm2tqk6PHS37f.jpg",
        otts: &["Netflix", "Watcha"],
    },
    MovieSeed {
        title: "The Grand Budapest Hotel",
        description: "A concierge and his lobby boy are caught up in a theft.",
        released: (2014, 3, 28),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/88brC2hIbf5msQObnE4xE1ayYwv.jpg",
        otts: &["Watcha", "Disney+"],
    },
    MovieSeed {
        title: "Arrival",
        description: "A linguist is recruited to talk with visitors from elsewhere.",
        released: (2016, 11, 11),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/h2OejtI4qluopQ2OeYUlI4ddX7m.jpg",
        otts: &["Coupang Play"],
    },
    MovieSeed {
        title: "Dunkirk",
        description: "Allied soldiers are evacuated from the beaches of Dunkirk.",
        released: (2017, 7, 21),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/ebSnODDg9lbsMIaWg2uAbjn7TO5.jpg",
        otts: &["Netflix", "Tving"],
    },
    MovieSeed {
        title: "Soul",
        description: "A music teacher gets a second look at what makes life worth living.",
        released: (2020, 12, 25),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/hm58Jw4Lw8OIeECIq5qyPYhAeRJ.jpg",
        otts: &["Disney+"],
    },
    MovieSeed {
        title: "CODA",
        description: "The only hearing member of a deaf family finds her voice.",
        released: (2021, 8, 13),
        thumbnail_url: "https://image.tmdb.org/t/p/w500/BzVjmm8l23rPsijLiNLUzuQtyd.jpg",
        otts: &["Apple TV+"],
    },
];

/// What a seed run touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub otts: usize,
    pub categories: usize,
    pub movies: usize,
}

/// Insert the default providers, board categories and sample movies
#[instrument(skip_all)]
pub async fn seed(pool: &PgPool, ids: &SnowflakeGenerator) -> RepoResult<SeedReport> {
    let ott_repo = PgOttRepository::new(pool.clone());
    let category_repo = PgCategoryRepository::new(pool.clone());
    let movie_repo = PgMovieRepository::new(pool.clone());

    let mut report = SeedReport::default();

    let mut ott_ids: HashMap<&str, Snowflake> = HashMap::new();
    for seed in OTTS {
        let ott = Ott {
            id: ids.generate(),
            name: seed.name.to_string(),
            logo_url: Some(seed.logo_url.to_string()),
            link_url: Some(seed.link_url.to_string()),
        };
        let stored = ott_repo.upsert(&ott).await?;
        ott_ids.insert(seed.name, stored.id);
        report.otts += 1;
    }

    for seed in CATEGORIES {
        let category = Category {
            id: ids.generate(),
            name: seed.name.to_string(),
            slug: seed.slug.to_string(),
            description: Some(seed.description.to_string()),
        };
        category_repo.upsert(&category).await?;
        report.categories += 1;
    }

    for seed in MOVIES {
        let (year, month, day) = seed.released;
        let movie = Movie {
            id: ids.generate(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            release_date: NaiveDate::from_ymd_opt(year, month, day),
            thumbnail_url: Some(seed.thumbnail_url.to_string()),
            ott_ids: seed
                .otts
                .iter()
                .filter_map(|name| ott_ids.get(name).copied())
                .collect(),
            created_at: Utc::now(),
        };
        movie_repo.upsert(&movie).await?;
        report.movies += 1;
    }

    info!(
        otts = report.otts,
        categories = report.categories,
        movies = report.movies,
        "Seed data loaded"
    );

    Ok(report)
}
