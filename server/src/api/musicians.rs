use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::TransactionTrait;

use crate::api::{
    documents::{Deleted, InsertMusicianResource, MusicianResource, UpdateMusicianResource},
    extract::{from_body, Json, Path},
    validation::Body,
    AppState, Error,
};
use crate::store;

pub fn entity_to_resource(entity: &entity::Musician) -> MusicianResource {
    MusicianResource {
        id: entity.id,
        name: entity.name.to_owned(),
        instrument: entity.instrument.to_owned(),
        bio: entity.bio.to_owned(),
        band_id: entity.band_id,
        created_at: entity.created_at,
    }
}

pub async fn musicians(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Vec<MusicianResource>>, Error> {
    let tx = db.begin().await?;
    let musicians = store::list::<entity::MusicianEntity, _>(&tx).await?;
    Ok(Json(musicians.iter().map(entity_to_resource).collect()))
}

pub async fn musician(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MusicianResource>, Error> {
    let tx = db.begin().await?;
    let musician = store::get::<entity::MusicianEntity, _>(&tx, id).await?;
    Ok(Json(entity_to_resource(&musician)))
}

pub async fn insert_musician(
    State(AppState(db)): State<AppState>,
    Json(input): Json<InsertMusicianResource>,
) -> Result<(StatusCode, Json<MusicianResource>), Error> {
    let tx = db.begin().await?;
    let musician = store::create(&tx, input.into_active()).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(entity_to_resource(&musician))))
}

pub async fn update_musician(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Body>,
) -> Result<Json<MusicianResource>, Error> {
    let tx = db.begin().await?;
    store::get::<entity::MusicianEntity, _>(&tx, id).await?;
    let patch: UpdateMusicianResource = from_body(body)?;
    let musician = store::update(&tx, id, patch).await?;
    tx.commit().await?;
    Ok(Json(entity_to_resource(&musician)))
}

pub async fn delete_musician(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, Error> {
    let tx = db.begin().await?;
    store::delete::<entity::MusicianEntity, _>(&tx, id).await?;
    tx.commit().await?;
    Ok(Json(Deleted::of("Musician")))
}
