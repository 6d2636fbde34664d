use crate::models::Comment;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a comment. The author's email is resolved inside the same
/// statement so the response reflects the identity at post time.
pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (video_id, user_id, content)
        VALUES ($1, $2, $3)
        RETURNING id, video_id, user_id,
                  (SELECT email FROM users WHERE id = $2) AS author_email,
                  content, created_at
        "#,
    )
    .bind(video_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// All comments on a video, oldest first. Comments are the one ascending
/// ordering in the system.
pub async fn list_comments(pool: &PgPool, video_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.video_id, c.user_id, u.email AS author_email, c.content, c.created_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.video_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(video_id)
    .fetch_all(pool)
    .await
}
