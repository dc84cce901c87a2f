use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::TransactionTrait;

use crate::api::{
    documents::{Deleted, InsertVenueResource, UpdateVenueResource, VenueResource},
    extract::{from_body, Json, Path},
    validation::Body,
    AppState, Error,
};
use crate::store;

pub fn entity_to_resource(entity: &entity::Venue) -> VenueResource {
    VenueResource {
        id: entity.id,
        name: entity.name.to_owned(),
        city: entity.city.to_owned(),
        address: entity.address.to_owned(),
        capacity: entity.capacity,
        phone: entity.phone.to_owned(),
        created_at: entity.created_at,
    }
}

pub async fn venues(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Vec<VenueResource>>, Error> {
    let tx = db.begin().await?;
    let venues = store::list::<entity::VenueEntity, _>(&tx).await?;
    Ok(Json(venues.iter().map(entity_to_resource).collect()))
}

pub async fn venue(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VenueResource>, Error> {
    let tx = db.begin().await?;
    let venue = store::get::<entity::VenueEntity, _>(&tx, id).await?;
    Ok(Json(entity_to_resource(&venue)))
}

pub async fn insert_venue(
    State(AppState(db)): State<AppState>,
    Json(input): Json<InsertVenueResource>,
) -> Result<(StatusCode, Json<VenueResource>), Error> {
    let tx = db.begin().await?;
    let venue = store::create(&tx, input.into_active()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(entity_to_resource(&venue))))
}

pub async fn update_venue(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Body>,
) -> Result<Json<VenueResource>, Error> {
    let tx = db.begin().await?;
    store::get::<entity::VenueEntity, _>(&tx, id).await?;
    let patch: UpdateVenueResource = from_body(body)?;
    let venue = store::update(&tx, id, patch).await?;
    tx.commit().await?;
    Ok(Json(entity_to_resource(&venue)))
}

pub async fn delete_venue(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, Error> {
    let tx = db.begin().await?;
    store::delete::<entity::VenueEntity, _>(&tx, id).await?;
    tx.commit().await?;
    Ok(Json(Deleted::of("Venue")))
}
