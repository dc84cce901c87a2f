use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};

use super::users;
use crate::api::{
    documents::{Deleted, InsertReviewResource, ReviewResource, UpdateReviewResource},
    extract::{from_body, Json, Path},
    validation::{self, Body},
    AppState, Error,
};
use crate::store;

/// The author of each review in `entities`, in the same order.
pub async fn related<C>(
    db: &C,
    entities: &[entity::Review],
) -> Result<Vec<Option<entity::User>>, DbErr>
where
    C: ConnectionTrait,
{
    let ids = entities.iter().filter_map(|r| r.user_id).collect::<Vec<_>>();
    let users = store::users_by_id(db, &ids).await?;
    Ok(entities
        .iter()
        .map(|r| r.user_id.and_then(|id| users.get(&id).cloned()))
        .collect())
}

pub fn entity_to_resource(entity: &entity::Review, user: Option<&entity::User>) -> ReviewResource {
    ReviewResource {
        id: entity.id,
        rating: entity.rating,
        comment: entity.comment.to_owned(),
        user: user.map(users::entity_to_resource),
        show_id: entity.show_id,
        created_at: entity.created_at,
    }
}

pub async fn resources<C>(
    db: &C,
    entities: &[entity::Review],
) -> Result<Vec<ReviewResource>, DbErr>
where
    C: ConnectionTrait,
{
    let related = related(db, entities).await?;
    Ok(entities
        .iter()
        .zip(related.iter())
        .map(|(review, user)| entity_to_resource(review, user.as_ref()))
        .collect())
}

async fn resource<C>(db: &C, entity: entity::Review) -> Result<ReviewResource, Error>
where
    C: ConnectionTrait,
{
    let mut resources = resources(db, std::slice::from_ref(&entity)).await?;
    resources.pop().ok_or(Error::NotFound("Review"))
}

pub async fn reviews(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Vec<ReviewResource>>, Error> {
    let tx = db.begin().await?;
    let reviews = store::list::<entity::ReviewEntity, _>(&tx).await?;
    Ok(Json(resources(&tx, &reviews).await?))
}

pub async fn review(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ReviewResource>, Error> {
    let tx = db.begin().await?;
    let review = store::get::<entity::ReviewEntity, _>(&tx, id).await?;
    Ok(Json(resource(&tx, review).await?))
}

pub async fn insert_review(
    State(AppState(db)): State<AppState>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<ReviewResource>), Error> {
    validation::new_review(&body)?;
    let input: InsertReviewResource = from_body(body)?;
    let tx = db.begin().await?;
    let review = store::create(&tx, input.into_active()).await?;
    let review = resource(&tx, review).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update_review(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Body>,
) -> Result<Json<ReviewResource>, Error> {
    let tx = db.begin().await?;
    store::get::<entity::ReviewEntity, _>(&tx, id).await?;
    validation::review_patch(&body)?;
    let patch: UpdateReviewResource = from_body(body)?;
    let review = store::update(&tx, id, patch).await?;
    let review = resource(&tx, review).await?;
    tx.commit().await?;
    Ok(Json(review))
}

pub async fn delete_review(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, Error> {
    let tx = db.begin().await?;
    store::delete::<entity::ReviewEntity, _>(&tx, id).await?;
    tx.commit().await?;
    Ok(Json(Deleted::of("Review")))
}
