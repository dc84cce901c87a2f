use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::TransactionTrait;

use crate::api::{
    documents::{Deleted, InsertUserResource, UpdateUserResource, UserResource},
    extract::{from_body, Json, Path},
    validation::Body,
    AppState, Error,
};
use crate::store;

pub fn entity_to_resource(entity: &entity::User) -> UserResource {
    UserResource {
        id: entity.id,
        username: entity.username.to_owned(),
        email: entity.email.to_owned(),
        first_name: entity.first_name.to_owned(),
        last_name: entity.last_name.to_owned(),
        created_at: entity.created_at,
    }
}

pub async fn users(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Vec<UserResource>>, Error> {
    let tx = db.begin().await?;
    let users = store::list::<entity::UserEntity, _>(&tx).await?;
    Ok(Json(users.iter().map(entity_to_resource).collect()))
}

pub async fn user(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResource>, Error> {
    let tx = db.begin().await?;
    let user = store::get::<entity::UserEntity, _>(&tx, id).await?;
    Ok(Json(entity_to_resource(&user)))
}

pub async fn insert_user(
    State(AppState(db)): State<AppState>,
    Json(input): Json<InsertUserResource>,
) -> Result<(StatusCode, Json<UserResource>), Error> {
    let tx = db.begin().await?;
    let user = store::create(&tx, input.into_active()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(entity_to_resource(&user))))
}

pub async fn update_user(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Body>,
) -> Result<Json<UserResource>, Error> {
    let tx = db.begin().await?;
    store::get::<entity::UserEntity, _>(&tx, id).await?;
    let patch: UpdateUserResource = from_body(body)?;
    let user = store::update(&tx, id, patch).await?;
    tx.commit().await?;
    Ok(Json(entity_to_resource(&user)))
}

pub async fn delete_user(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, Error> {
    let tx = db.begin().await?;
    store::delete::<entity::UserEntity, _>(&tx, id).await?;
    tx.commit().await?;
    Ok(Json(Deleted::of("User")))
}
