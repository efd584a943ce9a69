//! Vote ledger entities and the vote-toggle state machine
//!
//! Each (subject, voter) pair is in one of three states: no vote, up, or down.
//! Casting a direction moves between them:
//!
//! | current | cast | next  | ledger row | upvotes | downvotes |
//! |---------|------|-------|------------|---------|-----------|
//! | none    | up   | up    | insert     | +1      |  0        |
//! | none    | down | down  | insert     |  0      | +1        |
//! | up      | up   | none  | delete     | -1      |  0        |
//! | down    | down | none  | delete     |  0      | -1        |
//! | up      | down | down  | update     | -1      | +1        |
//! | down    | up   | up    | update     | +1      | -1        |
//!
//! The same machine drives posts and comments; storage applies the planned
//! row change and counter deltas in one transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Id;

// ============================================================================
// Direction
// ============================================================================

/// Direction of a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// (upvote delta, downvote delta) for adding one vote in this direction
    const fn unit(self) -> (i32, i32) {
        match self {
            Self::Up => (1, 0),
            Self::Down => (0, 1),
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Subject
// ============================================================================

/// Kind of content a vote is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Post,
    Comment,
}

impl SubjectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

/// The post or comment being voted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoteSubject {
    pub kind: SubjectKind,
    pub id: Id,
}

impl VoteSubject {
    #[inline]
    pub const fn post(id: Id) -> Self {
        Self {
            kind: SubjectKind::Post,
            id,
        }
    }

    #[inline]
    pub const fn comment(id: Id) -> Self {
        Self {
            kind: SubjectKind::Comment,
            id,
        }
    }
}

impl fmt::Display for VoteSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// One row of the vote ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub subject: VoteSubject,
    pub voter_id: Id,
    pub direction: VoteDirection,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Transition
// ============================================================================

/// Row-level change the ledger must make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    /// No row existed; insert one
    Insert(VoteDirection),
    /// Row existed with `from`; rewrite it to `to`
    Flip {
        from: VoteDirection,
        to: VoteDirection,
    },
    /// Row existed with the requested direction; remove it
    Retract(VoteDirection),
}

/// Outcome of casting a vote against the current ledger state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub previous: Option<VoteDirection>,
    pub next: Option<VoteDirection>,
    pub change: LedgerChange,
    pub upvote_delta: i32,
    pub downvote_delta: i32,
}

impl VoteTransition {
    /// Decide what casting `requested` does given the voter's `current` vote.
    pub fn plan(current: Option<VoteDirection>, requested: VoteDirection) -> Self {
        let (change, next) = match current {
            None => (LedgerChange::Insert(requested), Some(requested)),
            Some(existing) if existing == requested => (LedgerChange::Retract(existing), None),
            Some(existing) => (
                LedgerChange::Flip {
                    from: existing,
                    to: requested,
                },
                Some(requested),
            ),
        };

        let (add_up, add_down) = next.map_or((0, 0), VoteDirection::unit);
        let (sub_up, sub_down) = current.map_or((0, 0), VoteDirection::unit);

        Self {
            previous: current,
            next,
            change,
            upvote_delta: add_up - sub_up,
            downvote_delta: add_down - sub_down,
        }
    }

    /// True when the call removed the voter's vote
    #[inline]
    pub fn is_retraction(&self) -> bool {
        self.next.is_none()
    }
}

// ============================================================================
// Tally
// ============================================================================

/// Counters of a subject after a vote, plus the voter's resulting vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub upvotes: i32,
    pub downvotes: i32,
    pub viewer_vote: Option<VoteDirection>,
}

impl VoteTally {
    /// Apply a planned transition to these counters
    pub fn apply(&self, transition: &VoteTransition) -> Self {
        Self {
            upvotes: self.upvotes + transition.upvote_delta,
            downvotes: self.downvotes + transition.downvote_delta,
            viewer_vote: transition.next,
        }
    }
}
