use super::dto::{CreateStarRequest, ListStarsQuery, StarResponse, UpdateStarRequest};
use super::model::{NewStar, Sex, Star, StarChanges};
use super::repository::StarRepository;
use crate::common::codes;
use crate::common::error::{AppError, AppResult};
use crate::common::pagination::{Pagination, PaginationMeta};
use crate::common::validation::parse_rfc3339;
use crate::modules::movie::repository::MovieRepository;
use crate::state::AppState;

pub struct StarService;

impl StarService {
    pub async fn create(state: AppState, req: CreateStarRequest) -> AppResult<Star> {
        let star = NewStar {
            name: req.name,
            sex: parse_sex(&req.sex)?,
            birth_date: parse_rfc3339(&req.birth_date, "birth_date")?,
        };

        Ok(StarRepository::create(&state.db, &star).await?)
    }

    pub async fn list(state: AppState, query: ListStarsQuery) -> AppResult<(Vec<Star>, PaginationMeta)> {
        let pagination = Pagination::new(query.page, query.limit);
        let (stars, total) =
            StarRepository::list(&state.db, pagination.limit(), pagination.offset()).await?;

        Ok((stars, pagination.meta(total)))
    }

    /// Soft-deleted stars are still returned, with `deleted_at` set.
    pub async fn find_by_id(state: AppState, id: i64) -> AppResult<StarResponse> {
        let star = StarRepository::find_by_id(&state.db, id)
            .await?
            .ok_or(AppError::StarNotFound)?;
        let movies = MovieRepository::find_by_star(&state.db, id).await?;

        Ok(StarResponse { star, movies })
    }

    pub async fn update(state: AppState, id: i64, req: UpdateStarRequest) -> AppResult<StarResponse> {
        let changes = StarChanges {
            name: req.name,
            sex: req.sex.as_deref().map(parse_sex).transpose()?,
            birth_date: req
                .birth_date
                .as_deref()
                .map(|value| parse_rfc3339(value, "birth_date"))
                .transpose()?,
        };

        let mut star = StarRepository::find_by_id(&state.db, id)
            .await?
            .filter(|star| star.deleted_at.is_none())
            .ok_or(AppError::StarNotFound)?;
        changes.apply(&mut star);

        // deleted between the read and the write
        let star = StarRepository::update(&state.db, &star)
            .await?
            .ok_or(AppError::StarNotFound)?;
        let movies = MovieRepository::find_by_star(&state.db, id).await?;

        Ok(StarResponse { star, movies })
    }

    pub async fn delete(state: AppState, id: i64) -> AppResult<()> {
        if StarRepository::soft_delete(&state.db, id).await? == 0 {
            return Err(AppError::StarNotFound);
        }
        Ok(())
    }
}

fn parse_sex(value: &str) -> AppResult<Sex> {
    value.parse().map_err(|_| AppError::InvalidInput(codes::INVALID_BODY))
}
