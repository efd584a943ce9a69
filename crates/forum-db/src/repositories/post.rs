//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use forum_core::{
    Id, NewPost, Page, PageRequest, Post, PostRepository, PostSort, PostUpdate, RepoResult,
};

use crate::models::PostModel;

use super::error::{map_db_error, map_foreign_key_violation, post_not_found, user_not_found};

/// Projection shared by every post read; `p` must be a posts row.
const POST_PROJECTION: &str = r"
    p.id, p.user_id, u.username AS author_username, p.title, p.content,
    p.upvotes, p.downvotes,
    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
    p.created_at, p.updated_at
";

/// ORDER BY clause for a listing; `p.id` makes paging stable across ties.
fn order_by(sort: PostSort) -> &'static str {
    match sort {
        PostSort::Recent => "p.created_at DESC, p.id DESC",
        PostSort::Upvotes => "p.upvotes DESC, p.created_at DESC, p.id DESC",
        PostSort::Downvotes => "p.downvotes DESC, p.created_at DESC, p.id DESC",
        PostSort::CommentCount => "comment_count DESC, p.created_at DESC, p.id DESC",
    }
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>> {
        let sql = format!(
            "SELECT {POST_PROJECTION} FROM posts p JOIN users u ON u.id = p.user_id WHERE p.id = $1"
        );
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Id) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest, sort: PostSort) -> RepoResult<Page<Post>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let sql = format!(
            r"
            SELECT {POST_PROJECTION}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY {order}
            LIMIT $1 OFFSET $2
            ",
            order = order_by(sort),
        );
        let rows = sqlx::query_as::<_, PostModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(Post::from).collect(), total, page))
    }

    #[instrument(skip(self, post), fields(user_id = %post.user_id))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let sql = format!(
            r"
            WITH p AS (
                INSERT INTO posts (user_id, title, content)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {POST_PROJECTION}
            FROM p
            JOIN users u ON u.id = p.user_id
            "
        );
        let model = sqlx::query_as::<_, PostModel>(&sql)
            .bind(post.user_id.into_inner())
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_foreign_key_violation(e, || user_not_found(post.user_id)))?;

        Ok(Post::from(model))
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: Id, update: &PostUpdate) -> RepoResult<Post> {
        let sql = format!(
            r"
            WITH p AS (
                UPDATE posts
                SET title = $2, content = $3, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_PROJECTION}
            FROM p
            JOIN users u ON u.id = p.user_id
            "
        );
        let model = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .bind(&update.title)
            .bind(&update.content)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        model.map(Post::from).ok_or_else(|| post_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Id) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock blocks new comments and votes on this post until commit.
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if locked.is_none() {
            return Err(post_not_found(id));
        }

        // Comment votes lock the comment row, not the post; wait for any in
        // flight so their ledger rows are visible below.
        sqlx::query("SELECT id FROM comments WHERE post_id = $1 FOR UPDATE")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let comment_votes = sqlx::query(
            r"
            DELETE FROM comment_votes
            WHERE comment_id IN (SELECT id FROM comments WHERE post_id = $1)
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let comments = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        sqlx::query("DELETE FROM post_votes WHERE post_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(post_id = %id, comments, comment_votes, "Post deleted with its comments");
        Ok(())
    }
}
