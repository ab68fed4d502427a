use super::model::{Movie, NewMovie};
use super::query::{self, MovieListParams};
use crate::modules::star::model::Star;
use sqlx::{PgConnection, PgPool};

const MOVIE_COLUMNS: &str =
    "id, title, description, release_date, rating, created_at, updated_at, deleted_at";

pub struct MovieRepository;

impl MovieRepository {
    pub async fn insert(conn: &mut PgConnection, movie: &NewMovie) -> Result<Movie, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            r#"
            INSERT INTO movies (title, description, release_date, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.release_date)
        .bind(movie.rating)
        .fetch_one(conn)
        .await
    }

    /// Links one star to a movie. Returns `false` when the star is missing or
    /// soft-deleted, in which case nothing was written.
    pub async fn link_star(conn: &mut PgConnection, movie_id: i64, star_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO movie_stars (movie_id, star_id)
            SELECT $1, id FROM stars WHERE id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(movie_id)
        .bind(star_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn unlink_all(conn: &mut PgConnection, movie_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_stars WHERE movie_id = $1")
            .bind(movie_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Includes soft-deleted rows; callers inspect `deleted_at`.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reads a live movie and holds its row lock until the transaction ends.
    pub async fn find_for_update(conn: &mut PgConnection, id: i64) -> Result<Option<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    pub async fn update(conn: &mut PgConnection, movie: &Movie) -> Result<Movie, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            r#"
            UPDATE movies
            SET title = $1, description = $2, release_date = $3, rating = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.release_date)
        .bind(movie.rating)
        .bind(movie.id)
        .fetch_one(conn)
        .await
    }

    /// Rows affected: zero means already deleted or never existed.
    pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// One page of live movies plus the total matching the same filter.
    pub async fn list(pool: &PgPool, params: &MovieListParams) -> Result<(Vec<Movie>, i64), sqlx::Error> {
        let mut select = query::select_query(params);
        let movies = select.build_query_as::<Movie>().fetch_all(pool).await?;

        let mut count = query::count_query(params);
        let total = count.build_query_scalar::<i64>().fetch_one(pool).await?;

        Ok((movies, total))
    }

    /// Live stars linked to a movie.
    pub async fn find_stars(pool: &PgPool, movie_id: i64) -> Result<Vec<Star>, sqlx::Error> {
        sqlx::query_as::<_, Star>(
            r#"
            SELECT s.id, s.name, s.sex, s.birth_date, s.created_at, s.updated_at, s.deleted_at
            FROM stars s
            JOIN movie_stars ms ON ms.star_id = s.id
            WHERE ms.movie_id = $1 AND s.deleted_at IS NULL
            ORDER BY s.id
            "#,
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Live movies a star appears in.
    pub async fn find_by_star(pool: &PgPool, star_id: i64) -> Result<Vec<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.description, m.release_date, m.rating, m.created_at, m.updated_at, m.deleted_at
            FROM movies m
            JOIN movie_stars ms ON ms.movie_id = m.id
            WHERE ms.star_id = $1 AND m.deleted_at IS NULL
            ORDER BY m.id
            "#,
        )
        .bind(star_id)
        .fetch_all(pool)
        .await
    }
}
