use std::collections::HashSet;

use super::dto::{CreateMovieRequest, ListMoviesQuery, MovieResponse, UpdateMovieRequest};
use super::model::{Movie, MovieChanges, NewMovie};
use super::query::{MovieListParams, MovieOrder};
use super::repository::MovieRepository;
use crate::common::error::{has_sqlstate, AppError, AppResult, FOREIGN_KEY_VIOLATION};
use crate::common::pagination::{Pagination, PaginationMeta};
use crate::common::validation::parse_rfc3339;
use crate::modules::star::repository::StarRepository;
use crate::state::AppState;
use sqlx::PgConnection;

pub struct MovieService;

impl MovieService {
    /// Inserts the movie and its star links in one transaction. Any missing
    /// or deleted star rolls the whole thing back.
    pub async fn create(state: AppState, req: CreateMovieRequest) -> AppResult<MovieResponse> {
        let movie = NewMovie {
            title: req.title,
            description: req.description,
            release_date: parse_rfc3339(&req.release_date, "release_date")?,
            rating: req.rating,
        };
        let star_ids = distinct_ids(req.stars_id);

        let mut tx = state.db.begin().await?;
        let movie = MovieRepository::insert(&mut tx, &movie).await?;
        link_stars(&mut tx, movie.id, &star_ids).await?;
        tx.commit().await?;

        let stars = MovieRepository::find_stars(&state.db, movie.id).await?;
        Ok(MovieResponse { movie, stars })
    }

    pub async fn list(state: AppState, query: ListMoviesQuery) -> AppResult<(Vec<Movie>, PaginationMeta)> {
        let pagination = Pagination::new(query.page, query.limit);
        let params = MovieListParams {
            search: query
                .q
                .as_deref()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string),
            order: MovieOrder::from_param(query.sort.as_deref()),
            limit: pagination.limit(),
            offset: pagination.offset(),
        };

        let (movies, total) = MovieRepository::list(&state.db, &params).await?;
        Ok((movies, pagination.meta(total)))
    }

    /// Soft-deleted movies are still returned, with `deleted_at` set.
    pub async fn find_by_id(state: AppState, id: i64) -> AppResult<MovieResponse> {
        let movie = MovieRepository::find_by_id(&state.db, id)
            .await?
            .ok_or(AppError::MovieNotFound)?;
        let stars = MovieRepository::find_stars(&state.db, id).await?;

        Ok(MovieResponse { movie, stars })
    }

    /// Applies the provided fields under a row lock. A non-empty `stars_id`
    /// replaces the star set inside the same transaction.
    pub async fn update(state: AppState, id: i64, req: UpdateMovieRequest) -> AppResult<MovieResponse> {
        let changes = MovieChanges {
            title: req.title,
            description: req.description,
            release_date: req
                .release_date
                .as_deref()
                .map(|value| parse_rfc3339(value, "release_date"))
                .transpose()?,
            rating: req.rating,
        };
        let star_ids = distinct_ids(req.stars_id.unwrap_or_default());

        for star_id in &star_ids {
            if !StarRepository::exists(&state.db, *star_id).await? {
                return Err(AppError::StarNotFound);
            }
        }

        let mut tx = state.db.begin().await?;
        let mut movie = MovieRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or(AppError::MovieNotFound)?;
        changes.apply(&mut movie);
        let movie = MovieRepository::update(&mut tx, &movie).await?;

        if !star_ids.is_empty() {
            MovieRepository::unlink_all(&mut tx, id).await?;
            link_stars(&mut tx, id, &star_ids).await?;
        }
        tx.commit().await?;

        let stars = MovieRepository::find_stars(&state.db, id).await?;
        Ok(MovieResponse { movie, stars })
    }

    pub async fn delete(state: AppState, id: i64) -> AppResult<()> {
        if MovieRepository::soft_delete(&state.db, id).await? == 0 {
            return Err(AppError::MovieNotFound);
        }
        Ok(())
    }
}

async fn link_stars(conn: &mut PgConnection, movie_id: i64, star_ids: &[i64]) -> AppResult<()> {
    for star_id in star_ids {
        let linked = MovieRepository::link_star(conn, movie_id, *star_id)
            .await
            .map_err(|e| {
                if has_sqlstate(&e, FOREIGN_KEY_VIOLATION) {
                    AppError::StarNotFound
                } else {
                    AppError::Database(e)
                }
            })?;
        if !linked {
            return Err(AppError::StarNotFound);
        }
    }
    Ok(())
}

/// Drops repeated ids, keeping first-seen order.
fn distinct_ids(ids: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
