use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::store;
use crate::testing::{app, send};

fn band() -> Value {
    json!({
        "name": "AB",
        "genre": "Rock",
        "description": "0123456789",
        "formed_year": 1900,
    })
}

#[tokio::test]
async fn status_payload() {
    let (app, _) = app().await;
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["server"], base::CLI_NAME);
    assert_eq!(body["version"], base::VERSION);
}

#[tokio::test]
async fn venue_lifecycle() {
    let (app, _) = app().await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/venues",
        Some(json!({"name": "Blue Note", "city": "New York", "capacity": 300})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Blue Note");
    assert_eq!(created["phone"], Value::Null);
    assert!(created["created_at"].is_string());
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/api/venues/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/venues/{}", id),
        Some(json!({"capacity": 350, "city": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["capacity"], 350);
    assert_eq!(updated["city"], Value::Null);
    assert_eq!(updated["name"], "Blue Note");

    let (status, body) = send(&app, Method::DELETE, &format!("/api/venues/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Venue deleted successfully"}));

    let (status, body) = send(&app, Method::GET, &format!("/api/venues/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Venue not found"}));
}

#[tokio::test]
async fn collections_answer_with_and_without_trailing_slash() {
    let (app, _) = app().await;
    send(&app, Method::POST, "/api/users/", Some(json!({"username": "musicfan"}))).await;
    let (status, plain) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, slashed) = send(&app, Method::GET, "/api/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, slashed);
    assert_eq!(plain.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_ids_are_not_found() {
    let (app, _) = app().await;
    let (status, body) = send(&app, Method::GET, "/api/shows/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn bodies_must_be_json() {
    let (app, _) = app().await;
    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/venues")
        .header("content-type", "text/plain")
        .body(axum::body::Body::from("name=Blue Note"))
        .unwrap();
    let res = tower::ServiceExt::oneshot(app, req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_fields_leave_the_record_unchanged() {
    let (app, _) = app().await;
    let (_, created) = send(&app, Method::POST, "/api/bands", Some(band())).await;
    let id = created["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/bands/{}", id),
        Some(json!({"unknownField": 1, "id": 77, "created_at": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn band_creation_is_validated() {
    let (app, _) = app().await;
    let cases = [
        (json!({"name": "A"}), "Band name must be at least 2 characters"),
        (json!({"genre": ""}), "Genre is required"),
        (json!({"description": "short"}), "Description must be at least 10 characters"),
        (json!({"formed_year": 1899}), "Formation year must be a valid year after 1900"),
        (json!({"formed_year": "1999"}), "Formation year must be a valid year after 1900"),
    ];
    for (change, message) in cases {
        let mut body = band();
        for (key, value) in change.as_object().unwrap() {
            body[key] = value.clone();
        }
        let (status, res) = send(&app, Method::POST, "/api/bands", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(res, json!({ "error": message }));
    }

    let (status, created) = send(&app, Method::POST, "/api/bands", Some(band())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "AB");
    assert_eq!(created["formed_year"], 1900);
    assert_eq!(created["musicians"], json!([]));
}

#[tokio::test]
async fn band_updates_skip_validation() {
    let (app, _) = app().await;
    let (_, created) = send(&app, Method::POST, "/api/bands", Some(band())).await;
    let id = created["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/bands/{}", id),
        Some(json!({"description": "short", "formed_year": 1800})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], "short");
    assert_eq!(updated["formed_year"], 1800);
}

#[tokio::test]
async fn band_embeds_its_musicians() {
    let (app, _) = app().await;
    let (_, created) = send(&app, Method::POST, "/api/bands", Some(band())).await;
    let id = created["id"].as_i64().unwrap();
    let (status, musician) = send(
        &app,
        Method::POST,
        "/api/musicians",
        Some(json!({"name": "Alex", "instrument": "Drums", "band_id": id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(musician["band_id"], id);

    let (_, fetched) = send(&app, Method::GET, &format!("/api/bands/{}", id), None).await;
    assert_eq!(fetched["musicians"], json!([musician]));

    send(&app, Method::DELETE, &format!("/api/bands/{}", id), None).await;
    let (_, musicians) = send(&app, Method::GET, "/api/musicians", None).await;
    assert_eq!(musicians, json!([]));
}

fn review(rating: i64, comment: &str, user_id: i64, show_id: i64) -> Value {
    json!({
        "rating": rating,
        "comment": comment,
        "user_id": user_id,
        "show_id": show_id,
    })
}

async fn user_and_show(app: &axum::Router) -> (i64, i64) {
    let (_, user) = send(
        app,
        Method::POST,
        "/api/users",
        Some(json!({"username": "musicfan", "email": "fan@music.com"})),
    )
    .await;
    let (_, show) = send(
        app,
        Method::POST,
        "/api/shows",
        Some(json!({"title": "Rock Legends Live", "ticket_price": 75.0})),
    )
    .await;
    (user["id"].as_i64().unwrap(), show["id"].as_i64().unwrap())
}

#[tokio::test]
async fn review_creation_is_validated() {
    let (app, _) = app().await;
    let (user_id, show_id) = user_and_show(&app).await;

    let (status, res) = send(
        &app,
        Method::POST,
        "/api/reviews",
        Some(review(6, "0123456789", user_id, show_id)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Rating must be an integer between 1 and 5");

    let (status, res) = send(
        &app,
        Method::POST,
        "/api/reviews",
        Some(json!({"rating": 5, "comment": "0123456789", "show_id": show_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Valid user_id is required");

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/reviews",
        Some(review(5, "0123456789", user_id, show_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["rating"], 5);
    assert_eq!(created["show_id"], show_id);
    assert_eq!(created["user"]["id"], user_id);
    assert_eq!(created["user"]["username"], "musicfan");
}

#[tokio::test]
async fn review_updates_check_present_fields() {
    let (app, _) = app().await;
    let (user_id, show_id) = user_and_show(&app).await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/reviews",
        Some(review(4, "Great night out", user_id, show_id)),
    )
    .await;
    let uri = format!("/api/reviews/{}", created["id"]);

    let (status, res) = send(&app, Method::PATCH, &uri, Some(json!({"comment": "meh"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Comment must be at least 10 characters");

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"rating": 2}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["rating"], 2);
    assert_eq!(updated["comment"], "Great night out");
    assert_eq!(updated["user"], created["user"]);
}

#[tokio::test]
async fn show_embeds_venue_lineup_and_reviews() {
    let (app, db) = app().await;
    let (_, venue) = send(
        &app,
        Method::POST,
        "/api/venues",
        Some(json!({"name": "Madison Square Garden", "capacity": 20000})),
    )
    .await;
    let (_, show) = send(
        &app,
        Method::POST,
        "/api/shows",
        Some(json!({"title": "Rock Legends Live", "venue_id": venue["id"]})),
    )
    .await;
    assert_eq!(show["venue"], venue);
    assert_eq!(show["bands"], json!([]));
    let (_, band) = send(&app, Method::POST, "/api/bands", Some(band())).await;

    let show_id = show["id"].as_i64().unwrap() as i32;
    let band_id = band["id"].as_i64().unwrap() as i32;
    store::link_band(&db, show_id, band_id, Some(1)).await.unwrap();

    let uri = format!("/api/shows/{}", show_id);
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["venue"], venue);
    assert_eq!(fetched["bands"], json!([band]));
    assert_eq!(fetched["bands"][0]["musicians"], json!([]));
    assert_eq!(fetched["reviews"], json!([]));

    let (_, shows) = send(&app, Method::GET, "/api/shows/", None).await;
    assert_eq!(shows, json!([fetched]));
}

#[tokio::test]
async fn deleting_a_venue_removes_its_shows() {
    let (app, _) = app().await;
    let venue = json!({"name": "Blue Note"});
    let (_, venue) = send(&app, Method::POST, "/api/venues", Some(venue)).await;
    send(
        &app,
        Method::POST,
        "/api/shows",
        Some(json!({"title": "Jazz Under the Stars", "venue_id": venue["id"]})),
    )
    .await;
    let uri = format!("/api/venues/{}", venue["id"]);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, shows) = send(&app, Method::GET, "/api/shows", None).await;
    assert_eq!(shows, json!([]));
}

#[tokio::test]
async fn duplicate_usernames_are_a_server_error() {
    let (app, _) = app().await;
    let user = json!({"username": "musicfan"});
    let (status, _) = send(&app, Method::POST, "/api/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::POST, "/api/users", Some(user)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Database error"}));
}

#[tokio::test]
async fn updates_on_missing_records_are_not_found_before_validation() {
    let (app, _) = app().await;
    let cases = [
        ("/api/reviews/999", json!({"rating": 9}), "Review not found"),
        ("/api/reviews/999", json!({"comment": "meh"}), "Review not found"),
        ("/api/venues/999", json!({"capacity": "big"}), "Venue not found"),
        ("/api/bands/999", json!({"formed_year": "old"}), "Band not found"),
    ];
    for (uri, body, message) in cases {
        let (status, res) = send(&app, Method::PATCH, uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(res, json!({ "error": message }));
    }

    let (status, _) = send(&app, Method::PUT, "/api/reviews/999", Some(json!({"rating": 9}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mistyped_update_fields_are_a_bad_request() {
    let (app, _) = app().await;
    let venue = json!({"name": "Blue Note"});
    let (_, venue) = send(&app, Method::POST, "/api/venues", Some(venue)).await;
    let uri = format!("/api/venues/{}", venue["id"]);
    let (status, res) = send(&app, Method::PATCH, &uri, Some(json!({"capacity": "big"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(res["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON structure: capacity"));
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let (app, _) = app().await;
    let req = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/venues")
        .header("origin", "https://example.org")
        .body(axum::body::Body::empty())
        .unwrap();
    let res = tower::ServiceExt::oneshot(app, req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}
