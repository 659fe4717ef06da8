//! Reactions - one like/dislike vote per (user, target)
//!
//! A row exists only while the user holds a vote on the target; the row's
//! polarity encodes like or dislike and absence encodes neutral. Toggling is
//! modelled as a pure state machine so that the storage layer only has to
//! perform the single write named by the resulting [`Transition`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Kind of entity a reaction applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Post,
    PostComment,
    Review,
    ReviewComment,
}

impl ReactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::PostComment => "post_comment",
            Self::Review => "review",
            Self::ReviewComment => "review_comment",
        }
    }
}

/// Entity a reaction applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReactionTarget {
    pub kind: ReactionKind,
    pub id: Snowflake,
}

impl ReactionTarget {
    pub const fn new(kind: ReactionKind, id: Snowflake) -> Self {
        Self { kind, id }
    }

    pub const fn post(id: Snowflake) -> Self {
        Self::new(ReactionKind::Post, id)
    }

    pub const fn post_comment(id: Snowflake) -> Self {
        Self::new(ReactionKind::PostComment, id)
    }

    pub const fn review(id: Snowflake) -> Self {
        Self::new(ReactionKind::Review, id)
    }

    pub const fn review_comment(id: Snowflake) -> Self {
        Self::new(ReactionKind::ReviewComment, id)
    }

    /// Review comments only accept likes
    #[inline]
    pub fn accepts(&self, vote: Vote) -> bool {
        !(self.kind == ReactionKind::ReviewComment && vote == Vote::Dislike)
    }
}

/// A requested vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    #[inline]
    pub fn from_is_like(is_like: bool) -> Self {
        if is_like {
            Self::Like
        } else {
            Self::Dislike
        }
    }

    #[inline]
    pub fn is_like(self) -> bool {
        matches!(self, Self::Like)
    }

    /// Parse the reaction path segment (`like` / `dislike`)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "like" => Some(Self::Like),
            "dislike" => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// A user's standing vote on one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoteState {
    #[default]
    Absent,
    Liked,
    Disliked,
}

/// The single storage write a toggle requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No prior row: insert one
    Created(Vote),
    /// Same vote repeated: delete the row
    Retracted,
    /// Opposite vote: update the row's polarity
    Flipped(Vote),
}

impl Transition {
    #[inline]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Outcome of applying a vote to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub previous: VoteState,
    pub next: VoteState,
    pub transition: Transition,
}

impl VoteState {
    /// State encoded by an optional stored row
    pub fn from_stored(existing: Option<Vote>) -> Self {
        match existing {
            None => Self::Absent,
            Some(Vote::Like) => Self::Liked,
            Some(Vote::Dislike) => Self::Disliked,
        }
    }

    fn holding(vote: Vote) -> Self {
        match vote {
            Vote::Like => Self::Liked,
            Vote::Dislike => Self::Disliked,
        }
    }

    /// Vote currently held, if any
    pub fn vote(self) -> Option<Vote> {
        match self {
            Self::Absent => None,
            Self::Liked => Some(Vote::Like),
            Self::Disliked => Some(Vote::Dislike),
        }
    }

    /// -1, 0 or +1
    pub fn score(self) -> i8 {
        match self {
            Self::Absent => 0,
            Self::Liked => 1,
            Self::Disliked => -1,
        }
    }

    /// Apply a requested vote
    pub fn apply(self, requested: Vote) -> Toggle {
        let (next, transition) = match self.vote() {
            None => (Self::holding(requested), Transition::Created(requested)),
            Some(held) if held == requested => (Self::Absent, Transition::Retracted),
            Some(_) => (Self::holding(requested), Transition::Flipped(requested)),
        };

        Toggle {
            previous: self,
            next,
            transition,
        }
    }
}

/// Stored reaction row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub target: ReactionTarget,
    pub user_id: Snowflake,
    pub vote: Vote,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(target: ReactionTarget, user_id: Snowflake, vote: Vote) -> Self {
        Self {
            target,
            user_id,
            vote,
            created_at: Utc::now(),
        }
    }
}

/// Like/dislike counts of one target, counted from rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReactionTally {
    pub like_count: i64,
    pub dislike_count: i64,
}
