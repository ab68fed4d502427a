//! End-to-end scenarios against a real PostgreSQL database.
//!
//! Each test gets a fresh database with migrations applied. `#[sqlx::test]`
//! reads the server from `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{admin_token, body_json, build_test_app, delete, get, patch_json, post_json, user_token};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_star(app: &Router, token: &str, name: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/filmoteka/stars",
        Some(token),
        json!({ "name": name, "sex": "male", "birth_date": "1980-11-12T00:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_movie(app: &Router, token: &str, title: &str, rating: i32, stars_id: &[i64]) -> i64 {
    let response = post_json(
        app,
        "/api/v1/filmoteka/movies",
        Some(token),
        json!({
            "title": title,
            "description": format!("{title} description"),
            "release_date": "2011-11-03T00:00:00Z",
            "rating": rating,
            "stars_id": stars_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["movie"]["id"].as_i64().unwrap()
}

fn star_ids(movie_body: &Value) -> Vec<i64> {
    let mut ids: Vec<i64> = movie_body["data"]["stars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    ids
}

fn titles(list_body: &Value) -> Vec<String> {
    list_body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn signup_twice_conflicts(pool: PgPool) {
    let app = build_test_app(pool).await;
    let body = json!({ "username": "alice", "password": "s3cret", "role": "admin" });

    let first = post_json(&app, "/api/v1/auth/signup", None, body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created = body_json(first).await;
    assert_eq!(created["msg_code"], "user_created");
    assert_eq!(created["data"]["role"], "admin");
    assert!(created["data"].get("password_hash").is_none());

    let second = post_json(&app, "/api/v1/auth/signup", None, body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["msg_code"], "username_is_taken");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_issues_a_usable_token(pool: PgPool) {
    let app = build_test_app(pool).await;
    post_json(
        &app,
        "/api/v1/auth/signup",
        None,
        json!({ "username": "bob", "password": "hunter2", "role": "user" }),
    )
    .await;

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "username": "bob", "password": "hunter2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["msg_code"], "login_success");
    assert_eq!(body["data"]["token_type"], "Bearer");
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    let list = get(&app, "/api/v1/filmoteka/movies", &token).await;
    assert_eq!(list.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn bad_password_and_unknown_user_look_the_same(pool: PgPool) {
    let app = build_test_app(pool).await;
    post_json(
        &app,
        "/api/v1/auth/signup",
        None,
        json!({ "username": "carol", "password": "right", "role": "user" }),
    )
    .await;

    for body in [
        json!({ "username": "carol", "password": "wrong" }),
        json!({ "username": "nobody", "password": "right" }),
    ] {
        let response = post_json(&app, "/api/v1/auth/login", None, body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["msg_code"], "wrong_credentials");
    }
}

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn star_round_trip_and_soft_delete(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let id = create_star(&app, &admin, "Ryan Gosling").await;

    let fetched = body_json(get(&app, &format!("/api/v1/filmoteka/star/{id}"), &user_token()).await).await;
    assert_eq!(fetched["msg_code"], "star_received");
    assert_eq!(fetched["data"]["star"]["name"], "Ryan Gosling");
    assert_eq!(fetched["data"]["star"]["sex"], "male");
    assert_eq!(fetched["data"]["star"]["birth_date"], "1980-11-12T00:00:00Z");
    assert!(fetched["data"]["star"]["deleted_at"].is_null());

    let deleted = delete(&app, &format!("/api/v1/filmoteka/star/{id}"), &admin).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["msg_code"], "star_deleted");

    let after = body_json(get(&app, &format!("/api/v1/filmoteka/star/{id}"), &admin).await).await;
    assert!(after["data"]["star"]["deleted_at"].is_string());

    let list = body_json(get(&app, "/api/v1/filmoteka/stars", &admin).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());
    assert_eq!(list["_meta"]["total_count"], 0);
    assert_eq!(list["_meta"]["page_count"], 0);

    let again = delete(&app, &format!("/api/v1/filmoteka/star/{id}"), &admin).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(again).await["msg_code"], "star_not_found");
}

#[sqlx::test(migrations = "./migrations")]
async fn star_update_returns_live_movies(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let star = create_star(&app, &admin, "Carey Mulligan").await;
    create_movie(&app, &admin, "Drive", 8, &[star]).await;
    let gone = create_movie(&app, &admin, "Shame", 7, &[star]).await;
    delete(&app, &format!("/api/v1/filmoteka/movie/{gone}"), &admin).await;

    let response = patch_json(
        &app,
        &format!("/api/v1/filmoteka/star/{star}"),
        &admin,
        json!({ "sex": "female" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["star"]["sex"], "female");
    assert_eq!(body["data"]["star"]["name"], "Carey Mulligan");
    assert_eq!(titles(&json!({ "data": body["data"]["movies"] })), vec!["Drive"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn birth_date_comes_back_in_utc(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let response = post_json(
        &app,
        "/api/v1/filmoteka/stars",
        Some(&admin),
        json!({ "name": "Oleg Yankovsky", "sex": "male", "birth_date": "1980-11-12T00:00:00+03:00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["birth_date"], "1980-11-11T21:00:00Z");

    let id = created["data"]["id"].as_i64().unwrap();
    let fetched = body_json(get(&app, &format!("/api/v1/filmoteka/star/{id}"), &admin).await).await;
    assert_eq!(fetched["data"]["star"]["birth_date"], "1980-11-11T21:00:00Z");
}

#[sqlx::test(migrations = "./migrations")]
async fn stars_list_newest_first_with_meta(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    for name in ["A", "B", "C"] {
        create_star(&app, &admin, name).await;
    }

    let body = body_json(get(&app, "/api/v1/filmoteka/stars?page=1&limit=2", &admin).await).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["C", "B"]);
    assert_eq!(
        body["_meta"],
        json!({ "total_count": 3, "page_count": 2, "current_page": 1, "per_page": 2 })
    );
}

// ---------------------------------------------------------------------------
// Movies and their stars
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn missing_star_rolls_back_movie_create(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    let admin = admin_token();
    let star = create_star(&app, &admin, "Ryan Gosling").await;

    let response = post_json(
        &app,
        "/api/v1/filmoteka/movies",
        Some(&admin),
        json!({
            "title": "Drive",
            "description": "Night driving.",
            "release_date": "2011-11-03T00:00:00Z",
            "rating": 8,
            "stars_id": [star, 9999],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["msg_code"], "star_not_found");

    let movies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(&pool)
        .await
        .unwrap();
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movie_stars")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((movies, links), (0, 0));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleted_star_cannot_be_linked(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let star = create_star(&app, &admin, "Ghost").await;
    delete(&app, &format!("/api/v1/filmoteka/star/{star}"), &admin).await;

    let response = post_json(
        &app,
        "/api/v1/filmoteka/movies",
        Some(&admin),
        json!({
            "title": "Haunted",
            "description": "Boo.",
            "release_date": "2011-11-03T00:00:00Z",
            "rating": 5,
            "stars_id": [star],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn star_set_is_replaced_not_merged(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let a = create_star(&app, &admin, "A").await;
    let b = create_star(&app, &admin, "B").await;
    let c = create_star(&app, &admin, "C").await;
    let movie = create_movie(&app, &admin, "Drive", 8, &[a]).await;
    let uri = format!("/api/v1/filmoteka/movie/{movie}");

    let first = body_json(patch_json(&app, &uri, &admin, json!({ "stars_id": [a, b, b] })).await).await;
    assert_eq!(star_ids(&first), vec![a, b]);

    let second = body_json(patch_json(&app, &uri, &admin, json!({ "stars_id": [c] })).await).await;
    assert_eq!(second["msg_code"], "movie_updated");
    assert_eq!(star_ids(&second), vec![c]);

    let third = body_json(patch_json(&app, &uri, &admin, json!({ "rating": 10 })).await).await;
    assert_eq!(third["data"]["movie"]["rating"], 10);
    assert_eq!(star_ids(&third), vec![c]);

    let fetched = body_json(get(&app, &uri, &user_token()).await).await;
    assert_eq!(fetched["data"]["movie"]["title"], "Drive");
    assert_eq!(star_ids(&fetched), vec![c]);
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_star_replacement_keeps_old_set(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let a = create_star(&app, &admin, "A").await;
    let movie = create_movie(&app, &admin, "Drive", 8, &[a]).await;
    let uri = format!("/api/v1/filmoteka/movie/{movie}");

    let response = patch_json(&app, &uri, &admin, json!({ "title": "Renamed", "stars_id": [424242] })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["msg_code"], "star_not_found");

    let fetched = body_json(get(&app, &uri, &admin).await).await;
    assert_eq!(fetched["data"]["movie"]["title"], "Drive");
    assert_eq!(star_ids(&fetched), vec![a]);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleted_movie_cannot_be_updated(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let a = create_star(&app, &admin, "A").await;
    let movie = create_movie(&app, &admin, "Drive", 8, &[a]).await;
    let uri = format!("/api/v1/filmoteka/movie/{movie}");

    assert_eq!(delete(&app, &uri, &admin).await.status(), StatusCode::OK);

    let response = patch_json(&app, &uri, &admin, json!({ "rating": 1 })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["msg_code"], "movie_not_found");

    let fetched = body_json(get(&app, &uri, &admin).await).await;
    assert!(fetched["data"]["movie"]["deleted_at"].is_string());
}

// ---------------------------------------------------------------------------
// Listing: sort, search, pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn rating_sort_reverses_and_unknown_field_falls_back(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let star = create_star(&app, &admin, "A").await;
    create_movie(&app, &admin, "Low", 3, &[star]).await;
    create_movie(&app, &admin, "High", 9, &[star]).await;
    create_movie(&app, &admin, "Mid", 6, &[star]).await;

    let user = user_token();
    let desc = titles(&body_json(get(&app, "/api/v1/filmoteka/movies?sort=rating,desc", &user).await).await);
    let asc = titles(&body_json(get(&app, "/api/v1/filmoteka/movies?sort=rating,asc", &user).await).await);
    let fallback = titles(&body_json(get(&app, "/api/v1/filmoteka/movies?sort=budget,asc", &user).await).await);
    let default = titles(&body_json(get(&app, "/api/v1/filmoteka/movies", &user).await).await);

    assert_eq!(desc, vec!["High", "Mid", "Low"]);
    assert_eq!(asc, vec!["Low", "Mid", "High"]);
    assert_eq!(fallback, desc);
    assert_eq!(default, desc);
}

#[sqlx::test(migrations = "./migrations")]
async fn search_matches_star_names_once(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let ryan_g = create_star(&app, &admin, "Ryan Gosling").await;
    let ryan_r = create_star(&app, &admin, "Ryan Reynolds").await;
    let emma = create_star(&app, &admin, "Emma Stone").await;
    create_movie(&app, &admin, "Crazy, Stupid, Love", 7, &[ryan_g, emma]).await;
    create_movie(&app, &admin, "Deadpool", 8, &[ryan_r]).await;
    create_movie(&app, &admin, "The Help", 8, &[emma]).await;

    let body = body_json(get(&app, "/api/v1/filmoteka/movies?q=ryan&sort=title,asc", &admin).await).await;
    assert_eq!(titles(&body), vec!["Crazy, Stupid, Love", "Deadpool"]);
    assert_eq!(body["_meta"]["total_count"], 2);

    let by_title = body_json(get(&app, "/api/v1/filmoteka/movies?q=HELP", &admin).await).await;
    assert_eq!(titles(&by_title), vec!["The Help"]);

    let literal = body_json(get(&app, "/api/v1/filmoteka/movies?q=%25", &admin).await).await;
    assert!(titles(&literal).is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn page_past_the_end_keeps_total(pool: PgPool) {
    let app = build_test_app(pool).await;
    let admin = admin_token();
    let star = create_star(&app, &admin, "A").await;
    for title in ["One", "Two", "Three"] {
        create_movie(&app, &admin, title, 5, &[star]).await;
    }

    let body = body_json(get(&app, "/api/v1/filmoteka/movies?page=5&limit=2", &admin).await).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(
        body["_meta"],
        json!({ "total_count": 3, "page_count": 2, "current_page": 5, "per_page": 2 })
    );

    let defaults = body_json(get(&app, "/api/v1/filmoteka/movies?page=0&limit=0", &admin).await).await;
    assert_eq!(defaults["_meta"]["current_page"], 1);
    assert_eq!(defaults["_meta"]["per_page"], 20);
}
