//! SQL for the movie list endpoint.
//!
//! Sort input is untrusted: only a `field,direction` shape is enforced at
//! validation time, and an unknown field quietly becomes `rating DESC`. The
//! column and direction that reach the SQL text always come from the enums
//! below, never from the request. The search term is always a bind parameter.

use sqlx::{Postgres, QueryBuilder};
use validator::ValidationError;

const MOVIE_COLUMNS: &str =
    "m.id, m.title, m.description, m.release_date, m.rating, m.created_at, m.updated_at, m.deleted_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Rating,
    ReleaseDate,
}

impl SortField {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "title" => Some(SortField::Title),
            "rating" => Some(SortField::Rating),
            "release_date" => Some(SortField::ReleaseDate),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            SortField::Title => "m.title",
            SortField::Rating => "m.rating",
            SortField::ReleaseDate => "m.release_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for MovieOrder {
    fn default() -> Self {
        Self {
            field: SortField::Rating,
            direction: SortDirection::Desc,
        }
    }
}

impl MovieOrder {
    /// Anything other than a known `field,direction` pair yields the default.
    pub fn from_param(raw: Option<&str>) -> Self {
        let Some((field, direction)) = raw.and_then(split_sort) else {
            return Self::default();
        };
        match (SortField::parse(field), SortDirection::parse(direction)) {
            (Some(field), Some(direction)) => Self { field, direction },
            _ => Self::default(),
        }
    }
}

fn split_sort(raw: &str) -> Option<(&str, &str)> {
    let (field, direction) = raw.split_once(',')?;
    if field.is_empty() || direction.contains(',') {
        return None;
    }
    Some((field, direction))
}

/// Shape check for the `sort` query parameter: exactly `field,asc|desc`.
/// The field itself is not checked here.
pub fn validate_sort(value: &str) -> Result<(), ValidationError> {
    match split_sort(value) {
        Some((_, direction)) if SortDirection::parse(direction).is_some() => Ok(()),
        _ => Err(ValidationError::new("sort_params")
            .with_message("sort must look like field,asc or field,desc".into())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieListParams {
    pub search: Option<String>,
    pub order: MovieOrder,
    pub limit: i64,
    pub offset: i64,
}

/// Escapes LIKE metacharacters and wraps the term for a substring match.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, search: Option<&str>) {
    qb.push(" WHERE m.deleted_at IS NULL");

    // the association table is only touched when there is something to match
    if let Some(term) = search {
        let pattern = like_pattern(term);
        qb.push(" AND (m.title ILIKE ")
            .push_bind(pattern.clone())
            .push(
                " OR EXISTS (SELECT 1 FROM movie_stars ms JOIN stars s ON s.id = ms.star_id \
                 WHERE ms.movie_id = m.id AND s.deleted_at IS NULL AND s.name ILIKE ",
            )
            .push_bind(pattern)
            .push("))");
    }
}

pub fn select_query(params: &MovieListParams) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {MOVIE_COLUMNS} FROM movies m"));
    push_filters(&mut qb, params.search.as_deref());

    // tie-break on id, same direction as the primary key
    let direction = params.order.direction.sql();
    qb.push(format!(
        " ORDER BY {} {direction}, m.id {direction}",
        params.order.field.column()
    ));

    qb.push(" LIMIT ").push_bind(params.limit);
    qb.push(" OFFSET ").push_bind(params.offset);
    qb
}

pub fn count_query(params: &MovieListParams) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM movies m");
    push_filters(&mut qb, params.search.as_deref());
    qb
}
