//! In-memory repositories for service tests
//!
//! A single [`MemoryStore`] backs every repository trait so that counts,
//! cascades and reaction lookups see the same rows, as they would in
//! PostgreSQL. Redis and the pool are lazy and never touched.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use cine_cache::{RedisPool, RedisPoolConfig};
use cine_common::auth::JwtService;
use cine_core::entities::{
    Category, CategoryFilter, Comment, CommentThread, CommentWithLikes, Movie, MovieFilter,
    MovieStats, Ott, Post, PostAttachment, PostFilter, Reaction, ReactionKind, ReactionTally,
    ReactionTarget, Review, ReviewHistory, ReviewImage, ReviewOrdering, SearchType, User, Vote,
};
use cine_core::traits::{
    CategoryRepository, CommentRepository, MovieRepository, OttRepository, PostRepository,
    ReactionRepository, RepoResult, ReviewQuery, ReviewRepository, ReviewUpdate, UserRepository,
};
use cine_core::{DomainError, Page, PageRequest, Rating, Snowflake, SnowflakeGenerator};
use cine_db::PgPool;

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    subscriptions: HashMap<Snowflake, Vec<Snowflake>>,
    otts: Vec<Ott>,
    movies: Vec<Movie>,
    reviews: Vec<Review>,
    histories: Vec<ReviewHistory>,
    images: Vec<ReviewImage>,
    comments: Vec<Comment>,
    categories: Vec<Category>,
    posts: Vec<Post>,
    attachments: Vec<PostAttachment>,
    reactions: HashMap<(ReactionTarget, Snowflake), Vote>,
}

impl State {
    fn tally(&self, target: ReactionTarget) -> ReactionTally {
        let mut tally = ReactionTally::default();
        for ((t, _), vote) in &self.reactions {
            if *t == target {
                match vote {
                    Vote::Like => tally.like_count += 1,
                    Vote::Dislike => tally.dislike_count += 1,
                }
            }
        }
        tally
    }

    fn drop_reactions(&mut self, target: ReactionTarget) {
        self.reactions.retain(|(t, _), _| *t != target);
    }

    fn drop_comments(&mut self, thread: CommentThread, parent_id: Snowflake) {
        let kind = match thread {
            CommentThread::Post => ReactionTarget::post_comment,
            CommentThread::Review => ReactionTarget::review_comment,
        };
        let doomed: Vec<Snowflake> = self
            .comments
            .iter()
            .filter(|c| c.thread == thread && c.parent_id == parent_id)
            .map(|c| c.id)
            .collect();
        for id in doomed {
            self.drop_reactions(kind(id));
        }
        self.comments
            .retain(|c| !(c.thread == thread && c.parent_id == parent_id));
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(rows: Vec<T>, page: PageRequest) -> Page<T> {
    let count = rows.len() as i64;
    let results = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    Page::new(page, count, results)
}

/// Shared in-memory storage implementing every repository
#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|(u, _)| ids.contains(&u.id))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.lock().users.iter().any(|(u, _)| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self.lock().users.iter().any(|(u, _)| u.username == username))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists);
        }
        state.users.push((user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.lock();
        let row = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        row.0 = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.lock().users.iter().find(|(u, _)| u.id == id).map(|(_, h)| h.clone()))
    }

    async fn subscriptions(&self, user_id: Snowflake) -> RepoResult<Vec<Ott>> {
        let state = self.lock();
        let ids = state.subscriptions.get(&user_id).cloned().unwrap_or_default();
        Ok(state.otts.iter().filter(|o| ids.contains(&o.id)).cloned().collect())
    }

    async fn replace_subscriptions(
        &self,
        user_id: Snowflake,
        ott_ids: &[Snowflake],
    ) -> RepoResult<()> {
        self.lock().subscriptions.insert(user_id, ott_ids.to_vec());
        Ok(())
    }
}

#[async_trait]
impl OttRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<Ott>> {
        let mut otts = self.lock().otts.clone();
        otts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(otts)
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Ott>> {
        Ok(self.lock().otts.iter().filter(|o| ids.contains(&o.id)).cloned().collect())
    }

    async fn upsert(&self, ott: &Ott) -> RepoResult<Ott> {
        let mut state = self.lock();
        if let Some(existing) = state.otts.iter().find(|o| o.name == ott.name) {
            return Ok(existing.clone());
        }
        state.otts.push(ott.clone());
        Ok(ott.clone())
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Movie>> {
        Ok(self.lock().movies.iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self, filter: &MovieFilter) -> RepoResult<Vec<Movie>> {
        let mut movies: Vec<Movie> = self
            .lock()
            .movies
            .iter()
            .filter(|m| {
                filter.ott_ids.is_empty() || m.ott_ids.iter().any(|id| filter.ott_ids.contains(id))
            })
            .filter(|m| filter.title.as_deref().map_or(true, |t| contains(&m.title, t)))
            .cloned()
            .collect();
        movies.sort_by_key(|m| Reverse(m.release_date));
        Ok(movies)
    }

    async fn stats(&self, movie_id: Snowflake) -> RepoResult<MovieStats> {
        let state = self.lock();
        let ratings: Vec<f64> = state
            .reviews
            .iter()
            .filter(|r| r.movie_id == movie_id)
            .map(|r| r.rating.value())
            .collect();
        if ratings.is_empty() {
            return Ok(MovieStats::default());
        }
        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
        Ok(MovieStats::new(Some(average), ratings.len() as i64))
    }

    async fn stats_for(&self, movie_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, MovieStats)>> {
        let mut out = Vec::new();
        for id in movie_ids {
            let stats = MovieRepository::stats(self, *id).await?;
            if stats.review_count > 0 {
                out.push((*id, stats));
            }
        }
        Ok(out)
    }

    async fn upsert(&self, movie: &Movie) -> RepoResult<Movie> {
        let mut state = self.lock();
        if let Some(existing) = state.movies.iter().find(|m| m.title == movie.title) {
            return Ok(existing.clone());
        }
        state.movies.push(movie.clone());
        Ok(movie.clone())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Review>> {
        Ok(self.lock().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn exists_for(&self, author_id: Snowflake, movie_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .lock()
            .reviews
            .iter()
            .any(|r| r.author_id == author_id && r.movie_id == movie_id))
    }

    async fn list(&self, query: ReviewQuery, page: PageRequest) -> RepoResult<Page<Review>> {
        let state = self.lock();
        let mut rows: Vec<(Review, i64)> = state
            .reviews
            .iter()
            .filter(|r| query.movie_id.map_or(true, |m| r.movie_id == m))
            .map(|r| (r.clone(), state.tally(ReactionTarget::review(r.id)).like_count))
            .collect();

        rows.sort_by(|(a, a_likes), (b, b_likes)| {
            let newest = b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id));
            match query.ordering {
                ReviewOrdering::NewestFirst => newest,
                ReviewOrdering::OldestFirst => newest.reverse(),
                ReviewOrdering::RatingDesc => b.rating.cmp(&a.rating).then(newest),
                ReviewOrdering::RatingAsc => a.rating.cmp(&b.rating).then(newest),
                ReviewOrdering::MostLiked => b_likes.cmp(a_likes).then(newest),
                ReviewOrdering::LeastLiked => a_likes.cmp(b_likes).then(newest),
            }
        });

        Ok(paginate(rows.into_iter().map(|(r, _)| r).collect(), page))
    }

    async fn create(&self, review: &Review, images: &[ReviewImage]) -> RepoResult<()> {
        let mut state = self.lock();
        if state
            .reviews
            .iter()
            .any(|r| r.author_id == review.author_id && r.movie_id == review.movie_id)
        {
            return Err(DomainError::DuplicateReview);
        }
        state.reviews.push(review.clone());
        state.images.extend_from_slice(images);
        Ok(())
    }

    async fn update(&self, update: ReviewUpdate<'_>) -> RepoResult<()> {
        let mut state = self.lock();
        let row = state
            .reviews
            .iter_mut()
            .find(|r| r.id == update.review.id)
            .ok_or(DomainError::ReviewNotFound(update.review.id))?;
        *row = update.review.clone();
        state.histories.push(update.history.clone());
        state.images.retain(|i| !update.delete_image_ids.contains(&i.id));
        state.images.extend_from_slice(update.new_images);
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.lock();
        let before = state.reviews.len();
        state.reviews.retain(|r| r.id != id);
        if state.reviews.len() == before {
            return Err(DomainError::ReviewNotFound(id));
        }
        state.images.retain(|i| i.review_id != id);
        state.histories.retain(|h| h.review_id != id);
        state.drop_reactions(ReactionTarget::review(id));
        state.drop_comments(CommentThread::Review, id);
        Ok(())
    }

    async fn histories(&self, review_id: Snowflake) -> RepoResult<Vec<ReviewHistory>> {
        let mut rows: Vec<ReviewHistory> = self
            .lock()
            .histories
            .iter()
            .filter(|h| h.review_id == review_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.edited_at.cmp(&a.edited_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn edited_ids(&self, review_ids: &[Snowflake]) -> RepoResult<Vec<Snowflake>> {
        let state = self.lock();
        Ok(review_ids
            .iter()
            .copied()
            .filter(|id| state.histories.iter().any(|h| h.review_id == *id))
            .collect())
    }

    async fn images_for(&self, review_ids: &[Snowflake]) -> RepoResult<Vec<ReviewImage>> {
        Ok(self
            .lock()
            .images
            .iter()
            .filter(|i| review_ids.contains(&i.review_id))
            .cloned()
            .collect())
    }

    async fn find_image(&self, image_id: Snowflake) -> RepoResult<Option<ReviewImage>> {
        Ok(self.lock().images.iter().find(|i| i.id == image_id).cloned())
    }

    async fn add_image(&self, image: &ReviewImage) -> RepoResult<()> {
        self.lock().images.push(image.clone());
        Ok(())
    }

    async fn delete_image(&self, image_id: Snowflake) -> RepoResult<()> {
        let mut state = self.lock();
        let before = state.images.len();
        state.images.retain(|i| i.id != image_id);
        if state.images.len() == before {
            return Err(DomainError::ReviewImageNotFound(image_id));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, thread: CommentThread, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self
            .lock()
            .comments
            .iter()
            .find(|c| c.thread == thread && c.id == id)
            .cloned())
    }

    async fn list_with_likes(
        &self,
        thread: CommentThread,
        parent_id: Snowflake,
    ) -> RepoResult<Vec<CommentWithLikes>> {
        let state = self.lock();
        let mut rows: Vec<CommentWithLikes> = state
            .comments
            .iter()
            .filter(|c| c.thread == thread && c.parent_id == parent_id)
            .map(|c| {
                let target = match thread {
                    CommentThread::Post => ReactionTarget::post_comment(c.id),
                    CommentThread::Review => ReactionTarget::review_comment(c.id),
                };
                CommentWithLikes {
                    comment: c.clone(),
                    like_count: state.tally(target).like_count,
                }
            })
            .collect();
        rows.sort_by_key(|c| (c.comment.created_at, c.comment.id));
        Ok(rows)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.lock().comments.push(comment.clone());
        Ok(())
    }

    async fn delete(&self, thread: CommentThread, id: Snowflake) -> RepoResult<()> {
        let mut state = self.lock();
        let before = state.comments.len();
        state.comments.retain(|c| !(c.thread == thread && c.id == id));
        if state.comments.len() == before {
            return Err(DomainError::CommentNotFound(id));
        }
        let target = match thread {
            CommentThread::Post => ReactionTarget::post_comment(id),
            CommentThread::Review => ReactionTarget::review_comment(id),
        };
        state.drop_reactions(target);
        Ok(())
    }

    async fn count_by_parents(
        &self,
        thread: CommentThread,
        parent_ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for comment in self.lock().comments.iter() {
            if comment.thread == thread && parent_ids.contains(&comment.parent_id) {
                *counts.entry(comment.parent_id).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let mut categories = self.lock().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<Category>> {
        Ok(self
            .lock()
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn upsert(&self, category: &Category) -> RepoResult<Category> {
        let mut state = self.lock();
        if let Some(existing) = state.categories.iter().find(|c| c.slug == category.slug) {
            return Ok(existing.clone());
        }
        state.categories.push(category.clone());
        Ok(category.clone())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self.lock().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: &PostFilter, page: PageRequest) -> RepoResult<Page<Post>> {
        let state = self.lock();
        let slug_of = |category_id: Snowflake| {
            state
                .categories
                .iter()
                .find(|c| c.id == category_id)
                .map(|c| c.slug.clone())
        };
        let author_of = |author_id: Snowflake| {
            state
                .users
                .iter()
                .find(|(u, _)| u.id == author_id)
                .map(|(u, _)| u.username.clone())
                .unwrap_or_default()
        };

        let mut rows: Vec<(Post, i64)> = state
            .posts
            .iter()
            .map(|p| (p.clone(), state.tally(ReactionTarget::post(p.id)).like_count))
            .filter(|(p, likes)| match &filter.category {
                CategoryFilter::All => true,
                CategoryFilter::Hot { min_likes } => likes >= min_likes,
                CategoryFilter::Slug(slug) => slug_of(p.category_id).as_deref() == Some(slug),
            })
            .filter(|(p, _)| match &filter.search {
                None => true,
                Some((SearchType::Title, term)) => contains(&p.title, term),
                Some((SearchType::TitleContent, term)) => {
                    contains(&p.title, term) || contains(&p.content, term)
                }
                Some((SearchType::Author, term)) => contains(&author_of(p.author_id), term),
            })
            .collect();

        let hot = matches!(filter.category, CategoryFilter::Hot { .. });
        rows.sort_by(|(a, a_likes), (b, b_likes)| {
            let newest = b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id));
            if hot {
                b_likes.cmp(a_likes).then(newest)
            } else {
                newest
            }
        });

        Ok(paginate(rows.into_iter().map(|(p, _)| p).collect(), page))
    }

    async fn create(&self, post: &Post, attachments: &[PostAttachment]) -> RepoResult<()> {
        let mut state = self.lock();
        state.posts.push(post.clone());
        state.attachments.extend_from_slice(attachments);
        Ok(())
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        let mut state = self.lock();
        let row = state
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(DomainError::PostNotFound(post.id))?;
        *row = post.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.lock();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(DomainError::PostNotFound(id));
        }
        state.attachments.retain(|a| a.post_id != id);
        state.drop_reactions(ReactionTarget::post(id));
        state.drop_comments(CommentThread::Post, id);
        Ok(())
    }

    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>> {
        let mut state = self.lock();
        Ok(state.posts.iter_mut().find(|p| p.id == id).map(|p| {
            p.view_count += 1;
            p.view_count
        }))
    }

    async fn attachments_for(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<PostAttachment>> {
        Ok(self
            .lock()
            .attachments
            .iter()
            .filter(|a| post_ids.contains(&a.post_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find_vote(
        &self,
        target: ReactionTarget,
        user_id: Snowflake,
    ) -> RepoResult<Option<Vote>> {
        Ok(self.lock().reactions.get(&(target, user_id)).copied())
    }

    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut state = self.lock();
        let key = (reaction.target, reaction.user_id);
        if state.reactions.contains_key(&key) {
            return Err(DomainError::ReactionAlreadyExists);
        }
        state.reactions.insert(key, reaction.vote);
        Ok(())
    }

    async fn update_vote(
        &self,
        target: ReactionTarget,
        user_id: Snowflake,
        vote: Vote,
    ) -> RepoResult<()> {
        if let Some(stored) = self.lock().reactions.get_mut(&(target, user_id)) {
            *stored = vote;
        }
        Ok(())
    }

    async fn delete(&self, target: ReactionTarget, user_id: Snowflake) -> RepoResult<()> {
        self.lock().reactions.remove(&(target, user_id));
        Ok(())
    }

    async fn tally(&self, target: ReactionTarget) -> RepoResult<ReactionTally> {
        Ok(self.lock().tally(target))
    }

    async fn tallies(
        &self,
        kind: ReactionKind,
        ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, ReactionTally)>> {
        let state = self.lock();
        Ok(ids
            .iter()
            .map(|id| (*id, state.tally(ReactionTarget::new(kind, *id))))
            .filter(|(_, t)| t.like_count + t.dislike_count > 0)
            .collect())
    }

    async fn votes_of(
        &self,
        kind: ReactionKind,
        ids: &[Snowflake],
        user_id: Snowflake,
    ) -> RepoResult<Vec<(Snowflake, Vote)>> {
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| {
                state
                    .reactions
                    .get(&(ReactionTarget::new(kind, *id), user_id))
                    .map(|v| (*id, *v))
            })
            .collect())
    }
}

/// A service context over a fresh in-memory store
pub(crate) fn context() -> ServiceContext {
    let store = Arc::new(MemoryStore::default());
    let redis = RedisPool::new(RedisPoolConfig::default()).expect("lazy redis pool");
    let pool = PgPool::connect_lazy("postgres://localhost/cine_test").expect("lazy pg pool");

    ServiceContextBuilder::new()
        .pool(pool)
        .redis_pool(Arc::new(redis))
        .user_repo(store.clone())
        .ott_repo(store.clone())
        .movie_repo(store.clone())
        .review_repo(store.clone())
        .comment_repo(store.clone())
        .category_repo(store.clone())
        .post_repo(store.clone())
        .reaction_repo(store)
        .jwt_service(Arc::new(JwtService::new("service-test-secret", 300, 86_400)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .expect("complete context")
}

pub(crate) async fn user(ctx: &ServiceContext, name: &str, is_staff: bool) -> User {
    let mut user = User::new(ctx.generate_id(), name.to_string(), format!("{name}@example.com"));
    user.is_staff = is_staff;
    ctx.user_repo().create(&user, "unused-hash").await.unwrap();
    user
}

pub(crate) async fn category(ctx: &ServiceContext, slug: &str) -> Category {
    let category = Category {
        id: ctx.generate_id(),
        name: slug.to_string(),
        slug: slug.to_string(),
        description: None,
    };
    ctx.category_repo().upsert(&category).await.unwrap()
}

pub(crate) async fn post(ctx: &ServiceContext, author_id: Snowflake, title: &str) -> Post {
    let category = category(ctx, "free").await;
    let post = Post::new(
        ctx.generate_id(),
        category.id,
        author_id,
        title.to_string(),
        "body".to_string(),
    );
    ctx.post_repo().create(&post, &[]).await.unwrap();
    post
}

/// A review on a movie of its own so one author can hold several
pub(crate) async fn review(ctx: &ServiceContext, author_id: Snowflake, rating: f64) -> Review {
    let movie_id = ctx.generate_id();
    let movie = Movie {
        id: movie_id,
        title: format!("Movie {movie_id}"),
        description: String::new(),
        release_date: None,
        thumbnail_url: None,
        ott_ids: Vec::new(),
        created_at: chrono::Utc::now(),
    };
    ctx.movie_repo().upsert(&movie).await.unwrap();

    let review = Review::new(
        ctx.generate_id(),
        movie_id,
        author_id,
        Rating::new(rating).unwrap(),
        "first impressions".to_string(),
        false,
    );
    ctx.review_repo().create(&review, &[]).await.unwrap();
    review
}

pub(crate) async fn comment(
    ctx: &ServiceContext,
    thread: CommentThread,
    parent_id: Snowflake,
    author_id: Snowflake,
) -> Comment {
    let comment = Comment::new(
        ctx.generate_id(),
        thread,
        parent_id,
        author_id,
        "a comment".to_string(),
    );
    ctx.comment_repo().create(&comment).await.unwrap();
    comment
}

pub(crate) async fn react(ctx: &ServiceContext, target: ReactionTarget, user_id: Snowflake, vote: Vote) {
    ctx.reaction_repo()
        .insert(&Reaction::new(target, user_id, vote))
        .await
        .unwrap();
}
