use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{MemberId, PostId};

/// Post - an AI-drafted LinkedIn post moving through the publication pipeline
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub member_id: MemberId,

    // Content
    pub content: String,
    pub content_hash: Option<String>,

    // Image - exactly one of "has image" / "explicitly skipped" is needed
    // before the post can be scheduled
    pub image_url: Option<String>,
    pub image_skipped: bool,

    // Lifecycle
    pub status: String, // see PostStatus
    pub approved: bool, // human sign-off, orthogonal to status

    // Scheduling and dispatch
    pub scheduled_time: Option<DateTime<Utc>>,
    pub tracking_id: Option<Uuid>, // correlation token for extension acks

    // Outcome
    pub posted_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Status enum for type-safe lifecycle handling
// =============================================================================

/// Publication status of a post.
///
/// `Published` is a legacy alias of `Posted` kept for records written by
/// earlier extension versions; both are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Approved,
    Scheduled,
    QueuedInExtension,
    Posting,
    Posted,
    Published,
    Failed,
}

impl PostStatus {
    /// All statuses, for exhaustive iteration in checks and tests.
    pub const ALL: [PostStatus; 8] = [
        PostStatus::Draft,
        PostStatus::Approved,
        PostStatus::Scheduled,
        PostStatus::QueuedInExtension,
        PostStatus::Posting,
        PostStatus::Posted,
        PostStatus::Published,
        PostStatus::Failed,
    ];
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Approved => write!(f, "approved"),
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::QueuedInExtension => write!(f, "queued_in_extension"),
            PostStatus::Posting => write!(f, "posting"),
            PostStatus::Posted => write!(f, "posted"),
            PostStatus::Published => write!(f, "published"),
            PostStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "approved" => Ok(PostStatus::Approved),
            "scheduled" => Ok(PostStatus::Scheduled),
            "queued_in_extension" => Ok(PostStatus::QueuedInExtension),
            "posting" => Ok(PostStatus::Posting),
            "posted" => Ok(PostStatus::Posted),
            "published" => Ok(PostStatus::Published),
            "failed" => Ok(PostStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid post status: {}", s)),
        }
    }
}

impl Post {
    /// Parse the stored status string into the typed enum.
    ///
    /// Unknown strings are an error rather than a silent "no transitions
    /// allowed" state.
    pub fn current_status(&self) -> Result<PostStatus> {
        self.status.parse()
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Post {
    /// Find post by ID
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    /// Find posts for a member, newest first
    pub async fn find_by_member(
        member_id: MemberId,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE member_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(member_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Most recent posts across all members (admin dashboard)
    pub async fn find_recent(limit: i64, offset: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Find posts by status
    pub async fn find_by_status(
        status: &str,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE status = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Find the post a relay acknowledgement belongs to
    pub async fn find_by_tracking_id(tracking_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE tracking_id = $1")
            .bind(tracking_id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    /// Find scheduled posts whose time has arrived
    pub async fn find_due_for_dispatch(now: DateTime<Utc>, pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE status = 'scheduled' AND scheduled_time <= $1
             ORDER BY scheduled_time ASC",
        )
        .bind(now)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Find an already-published post with the same content fingerprint
    /// (coarse duplicate detection within one member's history)
    pub async fn find_posted_duplicate(
        member_id: MemberId,
        content_hash: &str,
        exclude: PostId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE member_id = $1
               AND content_hash = $2
               AND id != $3
               AND status IN ('posted', 'published')
             LIMIT 1",
        )
        .bind(member_id)
        .bind(content_hash)
        .bind(exclude)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// Create a new draft post (returns inserted record with defaults applied).
    ///
    /// The ID is generated here (v7, time-ordered) rather than by the
    /// database default, so primary keys sort chronologically.
    pub async fn create(
        member_id: MemberId,
        content: String,
        content_hash: String,
        image_url: Option<String>,
        image_skipped: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, member_id, content, content_hash, image_url, image_skipped, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'draft')
            RETURNING *
            "#,
        )
        .bind(PostId::new())
        .bind(member_id)
        .bind(content)
        .bind(content_hash)
        .bind(image_url)
        .bind(image_skipped)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    /// Update post content and image fields (for edit)
    pub async fn update_content(
        id: PostId,
        content: Option<String>,
        content_hash: Option<String>,
        image_url: Option<String>,
        image_skipped: Option<bool>,
        pool: &PgPool,
    ) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET
                content = COALESCE($2, content),
                content_hash = COALESCE($3, content_hash),
                image_url = COALESCE($4, image_url),
                image_skipped = COALESCE($5, image_skipped),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(content_hash)
        .bind(image_url)
        .bind(image_skipped)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Update post status
    pub async fn update_status(id: PostId, status: &str, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Mark as approved (human sign-off)
    pub async fn mark_approved(id: PostId, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET approved = TRUE, status = 'approved', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Persist the scheduled time and move to scheduled status
    pub async fn set_schedule(
        id: PostId,
        scheduled_time: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET scheduled_time = $1, status = 'scheduled', updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(scheduled_time)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Assign a tracking ID if the post does not already have one
    pub async fn ensure_tracking_id(id: PostId, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET tracking_id = COALESCE(tracking_id, $2), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Uuid::new_v4())
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Mark the post as successfully published
    pub async fn mark_posted(id: PostId, status: &str, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET status = $2, posted_at = NOW(), error_message = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Mark the post as failed with the reason reported by the extension
    pub async fn mark_failed(id: PostId, error_message: &str, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET status = 'failed', error_message = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(error_message)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Delete a post by ID
    pub async fn delete(id: PostId, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Count posts by status (for pagination)
    pub async fn count_by_status(status: &str, pool: &PgPool) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
