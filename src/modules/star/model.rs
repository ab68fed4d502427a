use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, ToSchema, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "star_sex", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Star {
    pub id: i64,
    pub name: String,
    pub sex: Sex,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub birth_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Field values for an insert.
#[derive(Debug, Clone)]
pub struct NewStar {
    pub name: String,
    pub sex: Sex,
    pub birth_date: OffsetDateTime,
}

/// Overrides for a partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct StarChanges {
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub birth_date: Option<OffsetDateTime>,
}

impl StarChanges {
    pub fn apply(self, star: &mut Star) {
        if let Some(name) = self.name {
            star.name = name;
        }
        if let Some(sex) = self.sex {
            star.sex = sex;
        }
        if let Some(birth_date) = self.birth_date {
            star.birth_date = birth_date;
        }
    }
}
