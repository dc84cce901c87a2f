use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use super::{get, purge, related::children, Error, Record};

/// Ids of the rows of `E` whose `parent` column points into `ids`.
async fn owned<E, C, F>(db: &C, parent: E::Column, ids: &[i32], key: F) -> Result<Vec<i32>, DbErr>
where
    E: Record,
    C: ConnectionTrait,
    F: Fn(&E::Model) -> Option<i32> + Send,
{
    Ok(children::<E, _, _>(db, parent, ids, key)
        .await?
        .into_values()
        .flatten()
        .map(|m| E::id_of(&m))
        .collect())
}

#[async_trait]
impl Record for entity::VenueEntity {
    const NAME: &'static str = "Venue";

    fn id_column() -> Self::Column {
        entity::VenueColumn::Id
    }

    fn created_at_column() -> Self::Column {
        entity::VenueColumn::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    async fn cascade<C>(db: &C, ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let shows = owned::<entity::ShowEntity, _, _>(
            db,
            entity::ShowColumn::VenueId,
            ids,
            |s| s.venue_id,
        )
        .await?;
        purge::<entity::ShowEntity, _>(db, &shows).await
    }
}

#[async_trait]
impl Record for entity::ShowEntity {
    const NAME: &'static str = "Show";

    fn id_column() -> Self::Column {
        entity::ShowColumn::Id
    }

    fn created_at_column() -> Self::Column {
        entity::ShowColumn::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    async fn cascade<C>(db: &C, ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        entity::ReviewEntity::delete_many()
            .filter(entity::ReviewColumn::ShowId.is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        entity::ShowBandEntity::delete_many()
            .filter(entity::ShowBandColumn::ShowId.is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Record for entity::BandEntity {
    const NAME: &'static str = "Band";

    fn id_column() -> Self::Column {
        entity::BandColumn::Id
    }

    fn created_at_column() -> Self::Column {
        entity::BandColumn::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    async fn cascade<C>(db: &C, ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        entity::MusicianEntity::delete_many()
            .filter(entity::MusicianColumn::BandId.is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        entity::ShowBandEntity::delete_many()
            .filter(entity::ShowBandColumn::BandId.is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Record for entity::UserEntity {
    const NAME: &'static str = "User";

    fn id_column() -> Self::Column {
        entity::UserColumn::Id
    }

    fn created_at_column() -> Self::Column {
        entity::UserColumn::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }

    async fn cascade<C>(db: &C, ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        entity::ReviewEntity::delete_many()
            .filter(entity::ReviewColumn::UserId.is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Record for entity::MusicianEntity {
    const NAME: &'static str = "Musician";

    fn id_column() -> Self::Column {
        entity::MusicianColumn::Id
    }

    fn created_at_column() -> Self::Column {
        entity::MusicianColumn::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }
}

#[async_trait]
impl Record for entity::ReviewEntity {
    const NAME: &'static str = "Review";

    fn id_column() -> Self::Column {
        entity::ReviewColumn::Id
    }

    fn created_at_column() -> Self::Column {
        entity::ReviewColumn::CreatedAt
    }

    fn id_of(model: &Self::Model) -> i32 {
        model.id
    }
}

pub async fn link_band<C>(
    db: &C,
    show_id: i32,
    band_id: i32,
    set_order: Option<i32>,
) -> Result<entity::ShowBand, Error>
where
    C: ConnectionTrait,
{
    get::<entity::ShowEntity, _>(db, show_id).await?;
    get::<entity::BandEntity, _>(db, band_id).await?;
    let link = entity::ShowBandActive {
        id: ActiveValue::NotSet,
        show_id: ActiveValue::Set(Some(show_id)),
        band_id: ActiveValue::Set(Some(band_id)),
        set_order: ActiveValue::Set(set_order),
    }
    .insert(db)
    .await?;
    tracing::debug!(show = show_id, band = band_id, ?set_order, "Linked band to show");
    Ok(link)
}
