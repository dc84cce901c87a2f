use axum::extract::State;
use axum::http::StatusCode;
use itertools::Itertools;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait};
use std::collections::HashMap;

use super::{bands, reviews, venues};
use crate::api::{
    documents::{
        BandResource, Deleted, InsertShowResource, ReviewResource, ShowResource,
        UpdateShowResource,
    },
    extract::{from_body, Json, Path},
    validation::Body,
    AppState, Error,
};
use crate::store;

pub struct ShowRelated {
    venue: Option<entity::Venue>,
    bands: Vec<BandResource>,
    reviews: Vec<ReviewResource>,
}

/// Venue, lineup and reviews of each show in `entities`, in the same order.
pub async fn related<C>(db: &C, entities: &[entity::Show]) -> Result<Vec<ShowRelated>, DbErr>
where
    C: ConnectionTrait,
{
    let ids = entities.iter().map(|s| s.id).collect::<Vec<_>>();
    let venue_ids = entities.iter().filter_map(|s| s.venue_id).collect::<Vec<_>>();
    let venues = store::venues_by_id(db, &venue_ids).await?;

    let mut lineups = store::bands_of_shows(db, &ids).await?;
    let unique_bands = lineups
        .values()
        .flatten()
        .unique_by(|b| b.id)
        .cloned()
        .collect::<Vec<_>>();
    let musicians = bands::related(db, &unique_bands).await?;
    let band_resources = unique_bands
        .iter()
        .zip(musicians.iter())
        .map(|(band, musicians)| (band.id, bands::entity_to_resource(band, musicians)))
        .collect::<HashMap<_, _>>();

    let mut show_reviews = store::reviews_of_shows(db, &ids).await?;
    let all_reviews = entities
        .iter()
        .flat_map(|s| show_reviews.get(&s.id).cloned().unwrap_or_default())
        .collect::<Vec<_>>();
    let mut review_resources = reviews::resources(db, &all_reviews)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect::<HashMap<_, _>>();

    Ok(entities
        .iter()
        .map(|show| ShowRelated {
            venue: show.venue_id.and_then(|id| venues.get(&id).cloned()),
            bands: lineups
                .remove(&show.id)
                .unwrap_or_default()
                .iter()
                .filter_map(|b| band_resources.get(&b.id).cloned())
                .collect(),
            reviews: show_reviews
                .remove(&show.id)
                .unwrap_or_default()
                .iter()
                .filter_map(|r| review_resources.remove(&r.id))
                .collect(),
        })
        .collect())
}

pub fn entity_to_resource(entity: &entity::Show, related: ShowRelated) -> ShowResource {
    ShowResource {
        id: entity.id,
        title: entity.title.to_owned(),
        date: entity.date.to_owned(),
        time: entity.time.to_owned(),
        ticket_price: entity.ticket_price,
        description: entity.description.to_owned(),
        venue: related.venue.as_ref().map(venues::entity_to_resource),
        bands: related.bands,
        reviews: related.reviews,
        created_at: entity.created_at,
    }
}

async fn resources<C>(db: &C, entities: &[entity::Show]) -> Result<Vec<ShowResource>, Error>
where
    C: ConnectionTrait,
{
    let related = related(db, entities).await?;
    Ok(entities
        .iter()
        .zip(related.into_iter())
        .map(|(show, related)| entity_to_resource(show, related))
        .collect())
}

async fn resource<C>(db: &C, entity: entity::Show) -> Result<ShowResource, Error>
where
    C: ConnectionTrait,
{
    let mut resources = resources(db, std::slice::from_ref(&entity)).await?;
    resources.pop().ok_or(Error::NotFound("Show"))
}

pub async fn shows(
    State(AppState(db)): State<AppState>,
) -> Result<Json<Vec<ShowResource>>, Error> {
    let tx = db.begin().await?;
    let shows = store::list::<entity::ShowEntity, _>(&tx).await?;
    Ok(Json(resources(&tx, &shows).await?))
}

pub async fn show(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ShowResource>, Error> {
    let tx = db.begin().await?;
    let show = store::get::<entity::ShowEntity, _>(&tx, id).await?;
    Ok(Json(resource(&tx, show).await?))
}

pub async fn insert_show(
    State(AppState(db)): State<AppState>,
    Json(input): Json<InsertShowResource>,
) -> Result<(StatusCode, Json<ShowResource>), Error> {
    let tx = db.begin().await?;
    let show = store::create(&tx, input.into_active()).await?;
    let show = resource(&tx, show).await?;
    tx.commit().await?;
    Ok((StatusCode::CREATED, Json(show)))
}

pub async fn update_show(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Body>,
) -> Result<Json<ShowResource>, Error> {
    let tx = db.begin().await?;
    store::get::<entity::ShowEntity, _>(&tx, id).await?;
    let patch: UpdateShowResource = from_body(body)?;
    let show = store::update(&tx, id, patch).await?;
    let show = resource(&tx, show).await?;
    tx.commit().await?;
    Ok(Json(show))
}

pub async fn delete_show(
    State(AppState(db)): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Deleted>, Error> {
    let tx = db.begin().await?;
    store::delete::<entity::ShowEntity, _>(&tx, id).await?;
    tx.commit().await?;
    Ok(Json(Deleted::of("Show")))
}
