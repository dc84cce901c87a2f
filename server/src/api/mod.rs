mod bands;
pub mod documents;
pub mod error;
pub mod extract;
mod musicians;
mod reviews;
mod shows;
mod users;
pub mod validation;
mod venues;

use axum::{
    routing::{get, MethodRouter},
    Router,
};
pub use error::Error;
use sea_orm::DbConn;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use documents::ServerStatus;
use extract::Json;

#[derive(Clone)]
pub struct AppState(pub DbConn);

pub fn router(conn: DbConn) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);
    let tracing = TraceLayer::new_for_http();
    Router::new()
        .route("/", get(server))
        .nest("/api", api())
        .layer(cors)
        .layer(tracing)
        .with_state(AppState(conn))
}

fn api() -> Router<AppState> {
    let routes = [
        (
            "/shows",
            get(shows::shows).post(shows::insert_show),
            get(shows::show)
                .patch(shows::update_show)
                .delete(shows::delete_show),
        ),
        (
            "/bands",
            get(bands::bands).post(bands::insert_band),
            get(bands::band)
                .patch(bands::update_band)
                .delete(bands::delete_band),
        ),
        (
            "/venues",
            get(venues::venues).post(venues::insert_venue),
            get(venues::venue)
                .patch(venues::update_venue)
                .delete(venues::delete_venue),
        ),
        (
            "/users",
            get(users::users).post(users::insert_user),
            get(users::user)
                .patch(users::update_user)
                .delete(users::delete_user),
        ),
        (
            "/reviews",
            get(reviews::reviews).post(reviews::insert_review),
            get(reviews::review)
                .patch(reviews::update_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        ),
        (
            "/musicians",
            get(musicians::musicians).post(musicians::insert_musician),
            get(musicians::musician)
                .patch(musicians::update_musician)
                .delete(musicians::delete_musician),
        ),
    ];
    routes
        .into_iter()
        .fold(Router::new(), |router, (path, collection, member)| {
            resource(router, path, collection, member)
        })
}

/// Mounts a collection with and without the trailing slash, plus its `/:id` member route.
fn resource(
    router: Router<AppState>,
    path: &str,
    collection: MethodRouter<AppState>,
    member: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, collection.clone())
        .route(&format!("{}/", path), collection)
        .route(&format!("{}/:id", path), member)
}

async fn server() -> Json<ServerStatus> {
    Json(ServerStatus {
        status: "ok".to_string(),
        server: base::CLI_NAME.to_string(),
        version: base::VERSION.to_string(),
    })
}

#[cfg(test)]
mod tests;
