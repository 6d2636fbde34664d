use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Insert a like for (video, user). The unique constraint closes the race
/// between concurrent toggles; a conflicting insert is a no-op.
pub async fn create_like(
    pool: &PgPool,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO likes (video_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (video_id, user_id) DO NOTHING
        "#,
    )
    .bind(video_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete the like for (video, user). Returns whether a row was removed.
pub async fn delete_like(
    pool: &PgPool,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE video_id = $1 AND user_id = $2")
        .bind(video_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count likes for a video. Zero for an unknown video.
pub async fn count_likes(pool: &PgPool, video_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM likes WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}

/// Check whether a user has liked a video.
pub async fn has_liked(pool: &PgPool, video_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM likes WHERE video_id = $1 AND user_id = $2")
            .bind(video_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.is_some())
}
