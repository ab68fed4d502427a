use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::model::{Sex, Star};
use crate::common::validation::validate_rfc3339;
use crate::modules::movie::model::Movie;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStarRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// `male` or `female`.
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,
    /// RFC 3339 timestamp.
    #[validate(custom(function = "validate_rfc3339"))]
    pub birth_date: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_star_update"))]
pub struct UpdateStarRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,
    #[validate(custom(function = "validate_rfc3339"))]
    pub birth_date: Option<String>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStarsQuery {
    /// 1-indexed; values below 1 mean the first page.
    pub page: Option<i64>,
    /// Page size, at most 500; values below 1 mean 20.
    #[validate(range(max = 500))]
    pub limit: Option<i64>,
}

/// A star with the live movies it appears in.
#[derive(Debug, Serialize, ToSchema)]
pub struct StarResponse {
    pub star: Star,
    pub movies: Vec<Movie>,
}

pub fn validate_sex(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Sex>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("oneof").with_message("sex must be male or female".into()))
}

fn validate_star_update(req: &UpdateStarRequest) -> Result<(), ValidationError> {
    if req.name.is_none() && req.sex.is_none() && req.birth_date.is_none() {
        return Err(ValidationError::new("empty_update")
            .with_message("at least one field must be provided".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, sex: &str, birth_date: &str) -> CreateStarRequest {
        CreateStarRequest {
            name: name.into(),
            sex: sex.into(),
            birth_date: birth_date.into(),
        }
    }

    #[test]
    fn accepts_a_complete_star() {
        assert!(create("Ryan Gosling", "male", "1980-11-12T00:00:00Z").validate().is_ok());
    }

    #[test]
    fn reports_each_bad_field() {
        let errors = create("", "other", "12.11.1980").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("sex"));
        assert!(fields.contains_key("birth_date"));
    }

    #[test]
    fn empty_update_is_rejected() {
        let req = UpdateStarRequest {
            name: None,
            sex: None,
            birth_date: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn partial_update_validates_present_fields_only() {
        let ok = UpdateStarRequest {
            name: None,
            sex: Some("female".into()),
            birth_date: None,
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateStarRequest {
            name: Some(String::new()),
            sex: None,
            birth_date: None,
        };
        assert!(bad.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn limit_is_capped() {
        let query = ListStarsQuery {
            page: Some(1),
            limit: Some(501),
        };
        assert!(query.validate().is_err());
    }
}
