use itertools::Itertools;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

use super::Record;

/// Rows of `E` whose `parent` column points into `ids`, grouped by parent id in storage order.
pub(super) async fn children<E, C, F>(
    db: &C,
    parent: E::Column,
    ids: &[i32],
    key: F,
) -> Result<HashMap<i32, Vec<E::Model>>, DbErr>
where
    E: Record,
    C: ConnectionTrait,
    F: Fn(&E::Model) -> Option<i32> + Send,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = E::find()
        .filter(parent.is_in(ids.iter().copied()))
        .order_by_asc(E::id_column())
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|m| key(&m).map(|k| (k, m)))
        .into_group_map())
}

async fn by_id<E, C>(db: &C, ids: &[i32]) -> Result<HashMap<i32, E::Model>, DbErr>
where
    E: Record,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let ids = ids.iter().copied().unique().collect::<Vec<_>>();
    Ok(E::find()
        .filter(E::id_column().is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (E::id_of(&m), m))
        .collect())
}

pub async fn venues_by_id<C>(db: &C, ids: &[i32]) -> Result<HashMap<i32, entity::Venue>, DbErr>
where
    C: ConnectionTrait,
{
    by_id::<entity::VenueEntity, _>(db, ids).await
}

pub async fn users_by_id<C>(db: &C, ids: &[i32]) -> Result<HashMap<i32, entity::User>, DbErr>
where
    C: ConnectionTrait,
{
    by_id::<entity::UserEntity, _>(db, ids).await
}

pub async fn musicians_of_bands<C>(
    db: &C,
    band_ids: &[i32],
) -> Result<HashMap<i32, Vec<entity::Musician>>, DbErr>
where
    C: ConnectionTrait,
{
    children::<entity::MusicianEntity, _, _>(db, entity::MusicianColumn::BandId, band_ids, |m| {
        m.band_id
    })
    .await
}

pub async fn reviews_of_shows<C>(
    db: &C,
    show_ids: &[i32],
) -> Result<HashMap<i32, Vec<entity::Review>>, DbErr>
where
    C: ConnectionTrait,
{
    children::<entity::ReviewEntity, _, _>(db, entity::ReviewColumn::ShowId, show_ids, |r| {
        r.show_id
    })
    .await
}

/// The lineup of every show in `show_ids`, following its show-band rows in storage order.
pub async fn bands_of_shows<C>(
    db: &C,
    show_ids: &[i32],
) -> Result<HashMap<i32, Vec<entity::Band>>, DbErr>
where
    C: ConnectionTrait,
{
    if show_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let links = entity::ShowBandEntity::find()
        .filter(entity::ShowBandColumn::ShowId.is_in(show_ids.iter().copied()))
        .order_by_asc(entity::ShowBandColumn::Id)
        .all(db)
        .await?;
    let band_ids = links.iter().filter_map(|l| l.band_id).collect::<Vec<_>>();
    let bands = by_id::<entity::BandEntity, _>(db, &band_ids).await?;
    Ok(links
        .into_iter()
        .filter_map(|l| {
            let band = bands.get(&l.band_id?)?;
            Some((l.show_id?, band.to_owned()))
        })
        .into_group_map())
}
