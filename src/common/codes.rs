//! `msg_code` values carried in every response envelope.

// auth
pub const LOGIN_SUCCESS: &str = "login_success";
pub const USER_CREATED: &str = "user_created";
pub const USERNAME_IS_TAKEN: &str = "username_is_taken";
pub const WRONG_CREDENTIALS: &str = "wrong_credentials";
pub const INVALID_JWT: &str = "invalid_jwt";
pub const AUTH_HEADER_REQUIRED: &str = "auth_header_is_required";

// request parsing
pub const INVALID_ID: &str = "invalid_id";
pub const INVALID_BODY: &str = "invalid_request_body";
pub const INVALID_HEADER: &str = "invalid_header";
pub const INVALID_QUERY_PARAMS: &str = "invalid_query_params";
pub const VALIDATION: &str = "validation";

// stars
pub const STAR_RECEIVED: &str = "star_received";
pub const STARS_RECEIVED: &str = "stars_received";
pub const STAR_CREATED: &str = "star_created";
pub const STAR_UPDATED: &str = "star_updated";
pub const STAR_DELETED: &str = "star_deleted";
pub const STAR_NOT_FOUND: &str = "star_not_found";

// movies
pub const MOVIE_RECEIVED: &str = "movie_received";
pub const MOVIES_RECEIVED: &str = "movies_received";
pub const MOVIE_CREATED: &str = "movie_created";
pub const MOVIE_UPDATED: &str = "movie_updated";
pub const MOVIE_DELETED: &str = "movie_deleted";
pub const MOVIE_NOT_FOUND: &str = "movie_not_found";

// general
pub const FORBIDDEN: &str = "general_forbidden";
pub const NOT_FOUND: &str = "general_not_found";
pub const UNSUPPORTED_METHOD: &str = "general_unsupported_method";
pub const INTERNAL: &str = "general_internal";
