use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};

use super::musicians;
use crate::api::{
    documents::{BandResource, Deleted, InsertBandResource, UpdateBandResource},
    extract::{from_body, Json, Path},
    validation::{self, Body},
    AppState, Error,
};
use crate::store;

/// The musicians of each band in `entities`, in the same order.
pub async fn related<C>(
    db: &C,
    entities: &[entity::Band],
) -> Result<Vec<Vec<entity::Musician>>, DbErr>
where
    C: ConnectionTrait,
{
    let ids = entities.iter().map(|b| b.id).collect::<Vec<_>>();
    let mut musicians = store::musicians_of_bands(db, &ids).await?;
    Ok(entities
        .iter()
        .map(|b| musicians.remove(&b.id).unwrap_or_default())
        .collect())
}

pub fn entity_to_resource(entity: &entity::Band, musicians: &[entity::Musician]) -> BandResource {
    BandResource {
        id: entity.id,
        name: entity.name.to_owned(),
        genre: entity.genre.to_owned(),
        description: entity.description.to_owned(),
        formed_year: entity.formed_year,
        musicians: musicians
            .iter()
            .map(musicians::entity_to_resource)
            .collect(),
        created_at: entity.created_at,
    }
}

async fn resources<C>(db: &C, entities: &[entity::Band]) -> Result<Vec<BandResource>, Error>
where
    C: ConnectionTrait,
{
    let related = related(db, entities).await?;
    Ok(entities
        .iter()
        .zip(related.iter())
        .map(|(band, musicians)| entity_to_resource(band, musicians))
        .collect())
}

async fn resource<C>(db: &C, entity: entity::Band) -> Result<BandResource, Error>
where
    C: ConnectionTrait,
{
    let mut resources = resources(db, std::slice::from_ref(&entity)).await?;
    resources.pop().ok_or(Error::NotFound("Band"))
}

pub async fn bands(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Vec<BandResource>>, Error> {
    let tx = db.begin().await?;
    let bands = store::list::<entity::BandEntity, _>(&tx).await?;
    Ok(Json(resources(&tx, &bands).await?))
}

pub async fn band(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BandResource>, Error> {
    let tx = db.begin().await?;
    let band = store::get::<entity::BandEntity, _>(&tx, id).await?;
    Ok(Json(resource(&tx, band).await?))
}

pub async fn insert_band(
    State(AppState(db)): State<AppState>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<BandResource>), Error> {
    validation::new_band(&body)?;
    let input: InsertBandResource = from_body(body)?;
    let tx = db.begin().await?;
    let band = store::create(&tx, input.into_active()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(entity_to_resource(&band, &[]))))
}

pub async fn update_band(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Body>,
) -> Result<Json<BandResource>, Error> {
    let tx = db.begin().await?;
    store::get::<entity::BandEntity, _>(&tx, id).await?;
    let patch: UpdateBandResource = from_body(body)?;
    let band = store::update(&tx, id, patch).await?;
    let band = resource(&tx, band).await?;
    tx.commit().await?;
    Ok(Json(band))
}

pub async fn delete_band(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, Error> {
    let tx = db.begin().await?;
    store::delete::<entity::BandEntity, _>(&tx, id).await?;
    tx.commit().await?;
    Ok(Json(Deleted::of("Band")))
}
