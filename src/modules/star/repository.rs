use super::model::{NewStar, Star};
use sqlx::PgPool;

const STAR_COLUMNS: &str = "id, name, sex, birth_date, created_at, updated_at, deleted_at";

pub struct StarRepository;

impl StarRepository {
    pub async fn create(pool: &PgPool, star: &NewStar) -> Result<Star, sqlx::Error> {
        sqlx::query_as::<_, Star>(&format!(
            r#"
            INSERT INTO stars (name, sex, birth_date)
            VALUES ($1, $2, $3)
            RETURNING {STAR_COLUMNS}
            "#
        ))
        .bind(&star.name)
        .bind(star.sex)
        .bind(star.birth_date)
        .fetch_one(pool)
        .await
    }

    /// Includes soft-deleted rows; callers inspect `deleted_at`.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Star>, sqlx::Error> {
        sqlx::query_as::<_, Star>(&format!("SELECT {STAR_COLUMNS} FROM stars WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Live stars, newest first, with the total live count.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<(Vec<Star>, i64), sqlx::Error> {
        let stars = sqlx::query_as::<_, Star>(&format!(
            r#"
            SELECT {STAR_COLUMNS}
            FROM stars
            WHERE deleted_at IS NULL
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stars WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;

        Ok((stars, total))
    }

    /// Writes every field of `star`. `None` when the row is gone or deleted.
    pub async fn update(pool: &PgPool, star: &Star) -> Result<Option<Star>, sqlx::Error> {
        sqlx::query_as::<_, Star>(&format!(
            r#"
            UPDATE stars
            SET name = $1, sex = $2, birth_date = $3, updated_at = NOW()
            WHERE id = $4 AND deleted_at IS NULL
            RETURNING {STAR_COLUMNS}
            "#
        ))
        .bind(&star.name)
        .bind(star.sex)
        .bind(star.birth_date)
        .bind(star.id)
        .fetch_optional(pool)
        .await
    }

    /// Rows affected: zero means already deleted or never existed.
    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stars SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM stars WHERE id = $1 AND deleted_at IS NULL)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
