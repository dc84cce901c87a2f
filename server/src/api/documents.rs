use sea_orm::ActiveValue;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::store::{assign, Patch};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VenueResource {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MusicianResource {
    pub id: i32,
    pub name: String,
    pub instrument: Option<String>,
    pub bio: Option<String>,
    pub band_id: Option<i32>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BandResource {
    pub id: i32,
    pub name: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub formed_year: Option<i32>,
    pub musicians: Vec<MusicianResource>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserResource {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewResource {
    pub id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub user: Option<UserResource>,
    pub show_id: Option<i32>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ShowResource {
    pub id: i32,
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub ticket_price: Option<f64>,
    pub description: Option<String>,
    pub venue: Option<VenueResource>,
    pub bands: Vec<BandResource>,
    pub reviews: Vec<ReviewResource>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub message: String,
}

impl Deleted {
    pub fn of(name: &str) -> Self {
        Self {
            message: format!("{} deleted successfully", name),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    pub status: String,
    pub server: String,
    pub version: String,
}

// Distinguishes an explicit `null` (Some(None)) from an absent key (None).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn present<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<sea_orm::Value>,
{
    value.map_or(ActiveValue::NotSet, ActiveValue::Set)
}

#[derive(Deserialize, Debug, Default)]
pub struct InsertVenueResource {
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    pub phone: Option<String>,
}

impl InsertVenueResource {
    pub fn into_active(self) -> entity::VenueActive {
        entity::VenueActive {
            name: present(self.name),
            city: ActiveValue::Set(self.city),
            address: ActiveValue::Set(self.address),
            capacity: ActiveValue::Set(self.capacity),
            phone: ActiveValue::Set(self.phone),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateVenueResource {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub capacity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
}

impl Patch for UpdateVenueResource {
    type Active = entity::VenueActive;

    fn apply(self, active: &mut Self::Active) -> bool {
        [
            assign(&mut active.name, self.name),
            assign(&mut active.city, self.city),
            assign(&mut active.address, self.address),
            assign(&mut active.capacity, self.capacity),
            assign(&mut active.phone, self.phone),
        ]
        .contains(&true)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct InsertShowResource {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub ticket_price: Option<f64>,
    pub description: Option<String>,
    pub venue_id: Option<i32>,
}

impl InsertShowResource {
    pub fn into_active(self) -> entity::ShowActive {
        entity::ShowActive {
            title: ActiveValue::Set(self.title),
            date: ActiveValue::Set(self.date),
            time: ActiveValue::Set(self.time),
            ticket_price: ActiveValue::Set(self.ticket_price),
            description: ActiveValue::Set(self.description),
            venue_id: ActiveValue::Set(self.venue_id),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateShowResource {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub time: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub ticket_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub venue_id: Option<Option<i32>>,
}

impl Patch for UpdateShowResource {
    type Active = entity::ShowActive;

    fn apply(self, active: &mut Self::Active) -> bool {
        [
            assign(&mut active.title, self.title),
            assign(&mut active.date, self.date),
            assign(&mut active.time, self.time),
            assign(&mut active.ticket_price, self.ticket_price),
            assign(&mut active.description, self.description),
            assign(&mut active.venue_id, self.venue_id),
        ]
        .contains(&true)
    }
}

/// Only built from a body that already passed band validation.
#[derive(Deserialize, Debug)]
pub struct InsertBandResource {
    pub name: String,
    pub genre: String,
    pub description: String,
    pub formed_year: i32,
}

impl InsertBandResource {
    pub fn into_active(self) -> entity::BandActive {
        entity::BandActive {
            name: ActiveValue::Set(self.name),
            genre: ActiveValue::Set(Some(self.genre)),
            description: ActiveValue::Set(Some(self.description)),
            formed_year: ActiveValue::Set(Some(self.formed_year)),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateBandResource {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub formed_year: Option<Option<i32>>,
}

impl Patch for UpdateBandResource {
    type Active = entity::BandActive;

    fn apply(self, active: &mut Self::Active) -> bool {
        [
            assign(&mut active.name, self.name),
            assign(&mut active.genre, self.genre),
            assign(&mut active.description, self.description),
            assign(&mut active.formed_year, self.formed_year),
        ]
        .contains(&true)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct InsertMusicianResource {
    pub name: Option<String>,
    pub instrument: Option<String>,
    pub bio: Option<String>,
    pub band_id: Option<i32>,
}

impl InsertMusicianResource {
    pub fn into_active(self) -> entity::MusicianActive {
        entity::MusicianActive {
            name: present(self.name),
            instrument: ActiveValue::Set(self.instrument),
            bio: ActiveValue::Set(self.bio),
            band_id: ActiveValue::Set(self.band_id),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateMusicianResource {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub instrument: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub band_id: Option<Option<i32>>,
}

impl Patch for UpdateMusicianResource {
    type Active = entity::MusicianActive;

    fn apply(self, active: &mut Self::Active) -> bool {
        [
            assign(&mut active.name, self.name),
            assign(&mut active.instrument, self.instrument),
            assign(&mut active.bio, self.bio),
            assign(&mut active.band_id, self.band_id),
        ]
        .contains(&true)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct InsertUserResource {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl InsertUserResource {
    pub fn into_active(self) -> entity::UserActive {
        entity::UserActive {
            username: present(self.username),
            email: ActiveValue::Set(self.email),
            first_name: ActiveValue::Set(self.first_name),
            last_name: ActiveValue::Set(self.last_name),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateUserResource {
    pub username: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: Option<Option<String>>,
}

impl Patch for UpdateUserResource {
    type Active = entity::UserActive;

    fn apply(self, active: &mut Self::Active) -> bool {
        [
            assign(&mut active.username, self.username),
            assign(&mut active.email, self.email),
            assign(&mut active.first_name, self.first_name),
            assign(&mut active.last_name, self.last_name),
        ]
        .contains(&true)
    }
}

/// Only built from a body that already passed review validation.
#[derive(Deserialize, Debug)]
pub struct InsertReviewResource {
    pub rating: i32,
    pub comment: String,
    pub user_id: i32,
    pub show_id: i32,
}

impl InsertReviewResource {
    pub fn into_active(self) -> entity::ReviewActive {
        entity::ReviewActive {
            rating: ActiveValue::Set(self.rating),
            comment: ActiveValue::Set(Some(self.comment)),
            user_id: ActiveValue::Set(Some(self.user_id)),
            show_id: ActiveValue::Set(Some(self.show_id)),
            ..Default::default()
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateReviewResource {
    pub rating: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub user_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub show_id: Option<Option<i32>>,
}

impl Patch for UpdateReviewResource {
    type Active = entity::ReviewActive;

    fn apply(self, active: &mut Self::Active) -> bool {
        [
            assign(&mut active.rating, self.rating),
            assign(&mut active.comment, self.comment),
            assign(&mut active.user_id, self.user_id),
            assign(&mut active.show_id, self.show_id),
        ]
        .contains(&true)
    }
}
