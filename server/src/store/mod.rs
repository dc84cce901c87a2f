mod cascade;
mod related;

pub use cascade::link_band;
pub use related::{
    bands_of_shows, musicians_of_bands, reviews_of_shows, users_by_id, venues_by_id,
};

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Value,
};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// A table addressed by an integer id, owning the rows removed by [`Record::cascade`].
#[async_trait]
pub trait Record: EntityTrait {
    const NAME: &'static str;

    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn id_of(model: &Self::Model) -> i32;

    /// Deletes every row owned by the records in `ids`, leaving the records themselves.
    async fn cascade<C>(_db: &C, _ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(())
    }
}

/// A partial update limited to the fields an entity allows clients to change.
pub trait Patch {
    type Active: ActiveModelTrait;

    /// Copies the present fields onto `active`, returning whether anything was set.
    fn apply(self, active: &mut Self::Active) -> bool;
}

pub fn assign<V>(slot: &mut ActiveValue<V>, value: Option<V>) -> bool
where
    V: Into<Value>,
{
    match value {
        Some(value) => {
            *slot = ActiveValue::Set(value);
            true
        }
        None => false,
    }
}

pub async fn list<E, C>(db: &C) -> Result<Vec<E::Model>, Error>
where
    E: Record,
    C: ConnectionTrait,
{
    Ok(E::find().order_by_asc(E::id_column()).all(db).await?)
}

pub async fn get<E, C>(db: &C, id: i32) -> Result<E::Model, Error>
where
    E: Record,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await?
        .ok_or(Error::NotFound(E::NAME))
}

pub async fn create<A, C>(
    db: &C,
    mut active: A,
) -> Result<<A::Entity as EntityTrait>::Model, Error>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    A::Entity: Record,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    active.set(
        <A::Entity as Record>::created_at_column(),
        OffsetDateTime::now_utc().into(),
    );
    let model = active.insert(db).await?;
    tracing::debug!(
        entity = <A::Entity as Record>::NAME,
        id = <A::Entity as Record>::id_of(&model),
        "Created"
    );
    Ok(model)
}

pub async fn update<P, C>(
    db: &C,
    id: i32,
    patch: P,
) -> Result<<<P::Active as ActiveModelTrait>::Entity as EntityTrait>::Model, Error>
where
    P: Patch + Send,
    P::Active: ActiveModelBehavior + Send,
    <P::Active as ActiveModelTrait>::Entity: Record,
    <<P::Active as ActiveModelTrait>::Entity as EntityTrait>::Model: IntoActiveModel<P::Active>,
    C: ConnectionTrait,
{
    let model = get::<<P::Active as ActiveModelTrait>::Entity, _>(db, id).await?;
    let mut active = model.clone().into_active_model();
    if !patch.apply(&mut active) {
        return Ok(model);
    }
    Ok(active.update(db).await?)
}

pub async fn delete<E, C>(db: &C, id: i32) -> Result<(), Error>
where
    E: Record,
    C: ConnectionTrait,
{
    get::<E, _>(db, id).await?;
    purge::<E, _>(db, &[id]).await?;
    tracing::debug!(entity = E::NAME, id, "Deleted");
    Ok(())
}

/// Removes the records in `ids` together with everything they own.
async fn purge<E, C>(db: &C, ids: &[i32]) -> Result<(), DbErr>
where
    E: Record,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(());
    }
    E::cascade(db, ids).await?;
    E::delete_many()
        .filter(E::id_column().is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use sea_orm::{DatabaseConnection, PaginatorTrait};

    async fn venue(db: &DatabaseConnection, name: &str) -> entity::Venue {
        create(
            db,
            entity::VenueActive {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    async fn show(db: &DatabaseConnection, venue: &entity::Venue) -> entity::Show {
        create(
            db,
            entity::ShowActive {
                title: ActiveValue::Set(Some("Opening night".to_string())),
                venue_id: ActiveValue::Set(Some(venue.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    async fn band(db: &DatabaseConnection, name: &str) -> entity::Band {
        create(
            db,
            entity::BandActive {
                name: ActiveValue::Set(name.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    async fn user(db: &DatabaseConnection, username: &str) -> entity::User {
        create(
            db,
            entity::UserActive {
                username: ActiveValue::Set(username.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    async fn review(
        db: &DatabaseConnection,
        user: &entity::User,
        show: &entity::Show,
    ) -> entity::Review {
        create(
            db,
            entity::ReviewActive {
                rating: ActiveValue::Set(4),
                user_id: ActiveValue::Set(Some(user.id)),
                show_id: ActiveValue::Set(Some(show.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn created_records_read_back_equal() {
        let db = testing::database().await;
        let created = venue(&db, "Blue Note").await;
        assert!(created.created_at.is_some());
        let fetched = get::<entity::VenueEntity, _>(&db, created.id).await.unwrap();
        assert_eq!(created, fetched);

        let created = user(&db, "musicfan").await;
        let fetched = get::<entity::UserEntity, _>(&db, created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let db = testing::database().await;
        let err = get::<entity::BandEntity, _>(&db, 42).await.unwrap_err();
        assert!(matches!(err, Error::NotFound("Band")));
        let err = delete::<entity::ShowEntity, _>(&db, 42).await.unwrap_err();
        assert!(matches!(err, Error::NotFound("Show")));
    }

    #[tokio::test]
    async fn list_follows_id_order() {
        let db = testing::database().await;
        venue(&db, "First").await;
        venue(&db, "Second").await;
        let names = list::<entity::VenueEntity, _>(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["First", "Second"]);
    }

    struct NoChange;

    impl Patch for NoChange {
        type Active = entity::VenueActive;

        fn apply(self, _active: &mut Self::Active) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn empty_patch_returns_record_unchanged() {
        let db = testing::database().await;
        let created = venue(&db, "Blue Note").await;
        let updated = update(&db, created.id, NoChange).await.unwrap();
        assert_eq!(created, updated);
        assert!(matches!(
            update(&db, 99, NoChange).await,
            Err(Error::NotFound("Venue"))
        ));
    }

    #[tokio::test]
    async fn deleting_a_venue_cascades_through_its_shows() {
        let db = testing::database().await;
        let kept = venue(&db, "Kept").await;
        let doomed = venue(&db, "Doomed").await;
        let kept_show = show(&db, &kept).await;
        let doomed_show = show(&db, &doomed).await;
        let band = band(&db, "Thunder Strike").await;
        let fan = user(&db, "musicfan").await;
        link_band(&db, kept_show.id, band.id, Some(1)).await.unwrap();
        link_band(&db, doomed_show.id, band.id, Some(1)).await.unwrap();
        review(&db, &fan, &kept_show).await;
        review(&db, &fan, &doomed_show).await;

        delete::<entity::VenueEntity, _>(&db, doomed.id).await.unwrap();

        let shows = list::<entity::ShowEntity, _>(&db).await.unwrap();
        assert_eq!(shows, vec![kept_show.clone()]);
        let reviews = list::<entity::ReviewEntity, _>(&db).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].show_id, Some(kept_show.id));
        let links = entity::ShowBandEntity::find().all(&db).await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].show_id, Some(kept_show.id));
        assert!(get::<entity::BandEntity, _>(&db, band.id).await.is_ok());
    }

    #[tokio::test]
    async fn deleting_a_band_keeps_its_shows() {
        let db = testing::database().await;
        let venue = venue(&db, "Blue Note").await;
        let show = show(&db, &venue).await;
        let headliner = band(&db, "Thunder Strike").await;
        let opener = band(&db, "Neon Circuits").await;
        link_band(&db, show.id, headliner.id, Some(2)).await.unwrap();
        link_band(&db, show.id, opener.id, Some(1)).await.unwrap();
        create(
            &db,
            entity::MusicianActive {
                name: ActiveValue::Set("Alex".to_string()),
                band_id: ActiveValue::Set(Some(headliner.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        delete::<entity::BandEntity, _>(&db, headliner.id).await.unwrap();

        assert_eq!(entity::MusicianEntity::find().count(&db).await.unwrap(), 0);
        assert!(get::<entity::ShowEntity, _>(&db, show.id).await.is_ok());
        let lineups = bands_of_shows(&db, &[show.id]).await.unwrap();
        assert_eq!(lineups[&show.id], vec![opener]);
    }

    #[tokio::test]
    async fn deleting_a_user_removes_their_reviews() {
        let db = testing::database().await;
        let venue = venue(&db, "Blue Note").await;
        let show = show(&db, &venue).await;
        let fan = user(&db, "musicfan").await;
        let other = user(&db, "critic").await;
        review(&db, &fan, &show).await;
        let kept = review(&db, &other, &show).await;

        delete::<entity::UserEntity, _>(&db, fan.id).await.unwrap();

        let reviews = reviews_of_shows(&db, &[show.id]).await.unwrap();
        assert_eq!(reviews[&show.id], vec![kept]);
    }

    #[tokio::test]
    async fn lineup_follows_link_order() {
        let db = testing::database().await;
        let venue = venue(&db, "Blue Note").await;
        let show = show(&db, &venue).await;
        let second = band(&db, "Midnight Ensemble").await;
        let first = band(&db, "Thunder Strike").await;
        link_band(&db, show.id, first.id, Some(2)).await.unwrap();
        link_band(&db, show.id, second.id, Some(1)).await.unwrap();

        let lineups = bands_of_shows(&db, &[show.id]).await.unwrap();
        assert_eq!(lineups[&show.id], vec![first, second]);
        assert!(bands_of_shows(&db, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn linking_requires_both_sides() {
        let db = testing::database().await;
        let venue = venue(&db, "Blue Note").await;
        let show = show(&db, &venue).await;
        let err = link_band(&db, show.id, 7, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound("Band")));
        let err = link_band(&db, 7, 7, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound("Show")));
    }
}
