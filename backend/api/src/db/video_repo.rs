use crate::models::VideoRecord;
use sqlx::PgPool;
use uuid::Uuid;

/// Column list shared by every video query: the row itself, the owner's
/// email, and like/comment counts computed at read time so they can never
/// drift from the underlying tables.
const VIDEO_COLUMNS: &str = r#"
    v.id, v.title, v.description, v.genre, v.file_name, v.thumbnail,
    v.owner_id, u.email AS owner_email, v.views,
    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS like_count,
    (SELECT COUNT(*) FROM comments c WHERE c.video_id = v.id) AS comment_count
"#;

/// Insert video metadata. View count starts at zero; counts on a fresh row
/// are zero by definition.
pub async fn create_video(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: &str,
    genre: &str,
    file_name: &str,
    thumbnail: Option<&str>,
) -> Result<VideoRecord, sqlx::Error> {
    sqlx::query_as::<_, VideoRecord>(
        r#"
        INSERT INTO videos (title, description, genre, file_name, thumbnail, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, description, genre, file_name, thumbnail, owner_id,
                  (SELECT email FROM users WHERE id = $6) AS owner_email,
                  views, 0::BIGINT AS like_count, 0::BIGINT AS comment_count,
                  NULL::TIMESTAMPTZ AS liked_at, created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(genre)
    .bind(file_name)
    .bind(thumbnail)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// List all videos, newest first.
pub async fn list_videos(pool: &PgPool) -> Result<Vec<VideoRecord>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {VIDEO_COLUMNS}, NULL::TIMESTAMPTZ AS liked_at, v.created_at
        FROM videos v
        JOIN users u ON u.id = v.owner_id
        ORDER BY v.created_at DESC
        "#
    );
    sqlx::query_as::<_, VideoRecord>(&query).fetch_all(pool).await
}

/// List one owner's videos, newest first.
pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<VideoRecord>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {VIDEO_COLUMNS}, NULL::TIMESTAMPTZ AS liked_at, v.created_at
        FROM videos v
        JOIN users u ON u.id = v.owner_id
        WHERE v.owner_id = $1
        ORDER BY v.created_at DESC
        "#
    );
    sqlx::query_as::<_, VideoRecord>(&query)
        .bind(owner_id)
        .fetch_all(pool)
        .await
}

/// List videos a user has liked, most recently liked first, annotated with
/// the like's creation time.
pub async fn list_liked_by(pool: &PgPool, user_id: Uuid) -> Result<Vec<VideoRecord>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {VIDEO_COLUMNS}, lk.created_at AS liked_at, v.created_at
        FROM likes lk
        JOIN videos v ON v.id = lk.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE lk.user_id = $1
        ORDER BY lk.created_at DESC
        "#
    );
    sqlx::query_as::<_, VideoRecord>(&query)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Fetch a video and increment its view counter in one atomic statement.
/// Viewing is defined as this call; the returned count is post-increment.
pub async fn get_and_count_view(
    pool: &PgPool,
    video_id: Uuid,
) -> Result<Option<VideoRecord>, sqlx::Error> {
    sqlx::query_as::<_, VideoRecord>(
        r#"
        UPDATE videos v
        SET views = v.views + 1
        FROM users u
        WHERE v.id = $1 AND u.id = v.owner_id
        RETURNING v.id, v.title, v.description, v.genre, v.file_name, v.thumbnail,
                  v.owner_id, u.email AS owner_email, v.views,
                  (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS like_count,
                  (SELECT COUNT(*) FROM comments c WHERE c.video_id = v.id) AS comment_count,
                  NULL::TIMESTAMPTZ AS liked_at, v.created_at
        "#,
    )
    .bind(video_id)
    .fetch_optional(pool)
    .await
}

/// Fetch the stored file name of a video owned by the given user, or `None`
/// when the video is absent or owned by someone else. Existence and
/// ownership are deliberately indistinguishable to the caller.
pub async fn find_owned_file_name(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT file_name FROM videos WHERE id = $1 AND owner_id = $2")
            .bind(video_id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(name,)| name))
}

/// Delete a video row if owned by the given user. Associated likes and
/// comments go with it via the cascade constraint.
pub async fn delete_owned(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1 AND owner_id = $2")
        .bind(video_id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Existence check without the view-count side effect.
pub async fn exists(pool: &PgPool, video_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM videos WHERE id = $1")
        .bind(video_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}
