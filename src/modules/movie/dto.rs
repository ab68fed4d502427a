use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::model::Movie;
use super::query::validate_sort;
use crate::common::validation::validate_rfc3339;
use crate::modules::star::model::Star;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    /// RFC 3339 timestamp.
    #[validate(custom(function = "validate_rfc3339"))]
    pub release_date: String,
    #[validate(range(min = 1, max = 10))]
    pub rating: i32,
    /// Ids of live stars; at least one.
    #[validate(length(min = 1), custom(function = "validate_star_ids"))]
    pub stars_id: Vec<i64>,
}

/// Partial update. A non-empty `stars_id` replaces the whole star set; an
/// absent or empty one leaves it alone.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_movie_update"))]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_rfc3339"))]
    pub release_date: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub rating: Option<i32>,
    #[validate(custom(function = "validate_star_ids"))]
    pub stars_id: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesQuery {
    /// Case-insensitive match on the title or a star's name.
    #[validate(length(max = 150))]
    pub q: Option<String>,
    /// `field,direction`; fields `title`, `rating`, `release_date`.
    #[validate(custom(function = "validate_sort"))]
    pub sort: Option<String>,
    pub page: Option<i64>,
    #[validate(range(max = 500))]
    pub limit: Option<i64>,
}

/// A movie with its live stars.
#[derive(Debug, Serialize, ToSchema)]
pub struct MovieResponse {
    pub movie: Movie,
    pub stars: Vec<Star>,
}

fn validate_star_ids(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id <= 0) {
        return Err(ValidationError::new("star_id").with_message("star ids must be positive".into()));
    }
    Ok(())
}

fn validate_movie_update(req: &UpdateMovieRequest) -> Result<(), ValidationError> {
    let has_stars = req.stars_id.as_ref().is_some_and(|ids| !ids.is_empty());
    if req.title.is_none()
        && req.description.is_none()
        && req.release_date.is_none()
        && req.rating.is_none()
        && !has_stars
    {
        return Err(ValidationError::new("empty_update")
            .with_message("at least one field must be provided".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(stars_id: Vec<i64>) -> CreateMovieRequest {
        CreateMovieRequest {
            title: "Drive".into(),
            description: "A stunt driver moonlights as a getaway driver.".into(),
            release_date: "2011-11-03T00:00:00Z".into(),
            rating: 8,
            stars_id,
        }
    }

    fn empty_update() -> UpdateMovieRequest {
        UpdateMovieRequest {
            title: None,
            description: None,
            release_date: None,
            rating: None,
            stars_id: None,
        }
    }

    #[test]
    fn create_requires_stars() {
        assert!(create(vec![1, 2]).validate().is_ok());
        let errors = create(vec![]).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stars_id"));
    }

    #[test]
    fn create_rejects_non_positive_star_ids() {
        assert!(create(vec![1, 0]).validate().is_err());
    }

    #[test]
    fn rating_bounds() {
        let mut req = create(vec![1]);
        req.rating = 11;
        assert!(req.validate().unwrap_err().field_errors().contains_key("rating"));
        req.rating = 0;
        assert!(req.validate().is_err());
        req.rating = 10;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn update_needs_one_field() {
        assert!(empty_update().validate().is_err());

        let only_empty_stars = UpdateMovieRequest {
            stars_id: Some(vec![]),
            ..empty_update()
        };
        assert!(only_empty_stars.validate().is_err());

        let stars = UpdateMovieRequest {
            stars_id: Some(vec![3]),
            ..empty_update()
        };
        assert!(stars.validate().is_ok());
    }

    #[test]
    fn update_checks_rating_range() {
        let req = UpdateMovieRequest {
            rating: Some(42),
            ..empty_update()
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("rating"));
    }

    #[test]
    fn list_query_sort_shape() {
        let query = |sort: &str| ListMoviesQuery {
            q: None,
            sort: Some(sort.into()),
            page: None,
            limit: None,
        };
        assert!(query("title,asc").validate().is_ok());
        assert!(query("budget,asc").validate().is_ok());
        assert!(query("rating").validate().is_err());
        assert!(query("rating,sideways").validate().is_err());
    }
}
