//! PostgreSQL vote ledger
//!
//! One generic implementation serves posts and comments. A [`SubjectTable`]
//! supplies the statements for each subject kind; [`VoteTransition::plan`]
//! decides what a cast does. The ledger row and the subject's counters change
//! in the same transaction, with counters adjusted relatively.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument, warn};

use forum_core::{
    DomainError, Id, LedgerChange, RepoResult, SubjectKind, VoteDirection, VoteRepository,
    VoteSubject, VoteTally, VoteTransition,
};

use super::error::{comment_not_found, map_db_error, post_not_found};

/// Attempts before a contended vote gives up
pub const MAX_VOTE_ATTEMPTS: u32 = 3;

/// SQL for one subject kind: its table, its ledger table and the ledger's
/// subject key column.
#[derive(Debug, Clone, Copy)]
struct SubjectTable {
    lock_subject: &'static str,
    select_vote: &'static str,
    insert_vote: &'static str,
    flip_vote: &'static str,
    retract_vote: &'static str,
    adjust_counters: &'static str,
}

macro_rules! subject_table {
    ($subject:literal, $votes:literal, $key:literal) => {
        SubjectTable {
            lock_subject: concat!("SELECT id FROM ", $subject, " WHERE id = $1 FOR UPDATE"),
            select_vote: concat!(
                "SELECT direction FROM ", $votes, " WHERE ", $key, " = $1 AND user_id = $2"
            ),
            insert_vote: concat!(
                "INSERT INTO ", $votes, " (", $key, ", user_id, direction) VALUES ($1, $2, $3) ",
                "ON CONFLICT (", $key, ", user_id) DO NOTHING"
            ),
            flip_vote: concat!(
                "UPDATE ", $votes, " SET direction = $3 ",
                "WHERE ", $key, " = $1 AND user_id = $2 AND direction = $4"
            ),
            retract_vote: concat!(
                "DELETE FROM ", $votes, " WHERE ", $key, " = $1 AND user_id = $2 AND direction = $3"
            ),
            adjust_counters: concat!(
                "UPDATE ", $subject, " SET upvotes = upvotes + $2, downvotes = downvotes + $3 ",
                "WHERE id = $1 RETURNING upvotes, downvotes"
            ),
        }
    };
}

const POST_TABLE: SubjectTable = subject_table!("posts", "post_votes", "post_id");
const COMMENT_TABLE: SubjectTable = subject_table!("comments", "comment_votes", "comment_id");

impl SubjectTable {
    const fn of(kind: SubjectKind) -> Self {
        match kind {
            SubjectKind::Post => POST_TABLE,
            SubjectKind::Comment => COMMENT_TABLE,
        }
    }
}

fn subject_not_found(subject: VoteSubject) -> DomainError {
    match subject.kind {
        SubjectKind::Post => post_not_found(subject.id),
        SubjectKind::Comment => comment_not_found(subject.id),
    }
}

fn parse_direction(raw: &str) -> RepoResult<VoteDirection> {
    VoteDirection::parse(raw)
        .ok_or_else(|| DomainError::DatabaseError(format!("unknown vote direction '{raw}'")))
}

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One read-decide-write round. `Ok(None)` means the ledger row changed
    /// under us and nothing was committed.
    async fn try_apply(
        &self,
        table: SubjectTable,
        subject: VoteSubject,
        voter_id: Id,
        direction: VoteDirection,
    ) -> RepoResult<Option<(VoteTransition, VoteTally)>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes votes per subject; also proves it exists.
        let locked = sqlx::query_scalar::<_, i64>(table.lock_subject)
            .bind(subject.id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if locked.is_none() {
            return Err(subject_not_found(subject));
        }

        let current = sqlx::query_scalar::<_, String>(table.select_vote)
            .bind(subject.id.into_inner())
            .bind(voter_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .as_deref()
            .map(parse_direction)
            .transpose()?;

        let transition = VoteTransition::plan(current, direction);

        if !Self::write_ledger(&mut tx, table, subject, voter_id, transition.change).await? {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        }

        let (upvotes, downvotes) = sqlx::query_as::<_, (i32, i32)>(table.adjust_counters)
            .bind(subject.id.into_inner())
            .bind(transition.upvote_delta)
            .bind(transition.downvote_delta)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some((
            transition,
            VoteTally {
                upvotes,
                downvotes,
                viewer_vote: transition.next,
            },
        )))
    }

    /// Apply the planned row change, guarded by the state it was planned
    /// from. Returns false if the guard did not match.
    async fn write_ledger(
        tx: &mut Transaction<'_, Postgres>,
        table: SubjectTable,
        subject: VoteSubject,
        voter_id: Id,
        change: LedgerChange,
    ) -> RepoResult<bool> {
        let query = match change {
            LedgerChange::Insert(dir) => sqlx::query(table.insert_vote)
                .bind(subject.id.into_inner())
                .bind(voter_id.into_inner())
                .bind(dir.as_str()),
            LedgerChange::Flip { from, to } => sqlx::query(table.flip_vote)
                .bind(subject.id.into_inner())
                .bind(voter_id.into_inner())
                .bind(to.as_str())
                .bind(from.as_str()),
            LedgerChange::Retract(dir) => sqlx::query(table.retract_vote)
                .bind(subject.id.into_inner())
                .bind(voter_id.into_inner())
                .bind(dir.as_str()),
        };

        let result = query.execute(&mut **tx).await.map_err(map_db_error)?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self), fields(subject = %subject))]
    async fn apply_vote(
        &self,
        subject: VoteSubject,
        voter_id: Id,
        direction: VoteDirection,
    ) -> RepoResult<VoteTally> {
        let table = SubjectTable::of(subject.kind);

        for attempt in 1..=MAX_VOTE_ATTEMPTS {
            if let Some((transition, tally)) =
                self.try_apply(table, subject, voter_id, direction).await?
            {
                info!(
                    voter_id = %voter_id,
                    change = ?transition.change,
                    upvotes = tally.upvotes,
                    downvotes = tally.downvotes,
                    "Vote applied"
                );
                return Ok(tally);
            }
            debug!(attempt, "Vote row changed concurrently, retrying");
        }

        warn!(voter_id = %voter_id, "Vote abandoned after repeated conflicts");
        Err(DomainError::VoteContention {
            attempts: MAX_VOTE_ATTEMPTS,
        })
    }

    #[instrument(skip(self), fields(subject = %subject))]
    async fn find_direction(
        &self,
        subject: VoteSubject,
        voter_id: Id,
    ) -> RepoResult<Option<VoteDirection>> {
        let table = SubjectTable::of(subject.kind);

        sqlx::query_scalar::<_, String>(table.select_vote)
            .bind(subject.id.into_inner())
            .bind(voter_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .as_deref()
            .map(parse_direction)
            .transpose()
    }
}
