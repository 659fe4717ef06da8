//! Ranked comment retrieval
//!
//! A thread is rendered as a bounded "top" bucket ordered by likes followed
//! by every other comment in chronological order. Each comment appears in
//! exactly one of the two buckets.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::entities::CommentWithLikes;
use crate::value_objects::Snowflake;

/// Anything that can be ranked by likes and recency
pub trait Rankable {
    fn rank_id(&self) -> Snowflake;
    fn like_count(&self) -> i64;
    fn created_at(&self) -> DateTime<Utc>;
}

impl Rankable for CommentWithLikes {
    fn rank_id(&self) -> Snowflake {
        self.comment.id
    }

    fn like_count(&self) -> i64 {
        self.like_count
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.comment.created_at
    }
}

/// Size of the top bucket and the optional like floor to enter it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingPolicy {
    pub top_k: usize,
    pub min_likes: Option<i64>,
}

/// Top bucket followed by the chronological remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedComments<T> {
    pub top: Vec<T>,
    pub rest: Vec<T>,
}

impl<T> RankedComments<T> {
    /// Flatten into display order
    pub fn into_ordered(self) -> Vec<T> {
        let mut all = self.top;
        all.extend(self.rest);
        all
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.rest.is_empty()
    }
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RankingPolicy {
    /// Top `top_k` by likes, no floor
    pub const fn new(top_k: usize) -> Self {
        Self {
            top_k,
            min_likes: None,
        }
    }

    /// Only comments with at least `min_likes` likes may enter the top bucket
    pub const fn with_floor(top_k: usize, min_likes: i64) -> Self {
        Self {
            top_k,
            min_likes: Some(min_likes),
        }
    }

    fn qualifies<T: Rankable>(&self, item: &T) -> bool {
        self.min_likes.map_or(true, |floor| item.like_count() >= floor)
    }

    /// Likes desc, then newest first, then highest id
    fn by_rank<T: Rankable>(a: &T, b: &T) -> Ordering {
        b.like_count()
            .cmp(&a.like_count())
            .then_with(|| b.created_at().cmp(&a.created_at()))
            .then_with(|| b.rank_id().cmp(&a.rank_id()))
    }

    fn chronological<T: Rankable>(a: &T, b: &T) -> Ordering {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.rank_id().cmp(&b.rank_id()))
    }

    /// Split a thread into the top bucket and the remainder
    pub fn rank<T: Rankable>(&self, items: Vec<T>) -> RankedComments<T> {
        let mut candidates: Vec<&T> = items.iter().filter(|c| self.qualifies(*c)).collect();
        candidates.sort_by(|a, b| Self::by_rank(*a, *b));

        let top_ids: HashSet<Snowflake> = candidates
            .iter()
            .take(self.top_k)
            .map(|c| c.rank_id())
            .collect();

        let (mut top, mut rest): (Vec<T>, Vec<T>) = items
            .into_iter()
            .partition(|c| top_ids.contains(&c.rank_id()));

        top.sort_by(Self::by_rank);
        rest.sort_by(Self::chronological);

        RankedComments { top, rest }
    }
}
